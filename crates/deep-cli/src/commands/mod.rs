pub mod ask;
pub mod cancel;
pub mod dispatch;
pub mod sessions;
pub mod shared;
pub mod status;
pub mod watch;

pub use dispatch::dispatch;
