/// Local `--limit` if given, else `fallback`. Zero means no limit.
#[must_use]
pub fn effective_limit(local: Option<u32>, fallback: u32) -> usize {
    match local.unwrap_or(fallback) {
        0 => usize::MAX,
        n => usize::try_from(n).unwrap_or(usize::MAX),
    }
}
