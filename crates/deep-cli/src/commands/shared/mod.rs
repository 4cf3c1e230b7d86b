pub mod follow;
pub mod limit;
pub mod parse;
