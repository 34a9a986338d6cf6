//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Time (date label stamped on high scores)

pub mod storage;
pub mod time;

pub use storage::{MemoryStorage, Storage, StorageError};
pub use time::{Clock, FixedClock};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
#[cfg(target_arch = "wasm32")]
pub use time::BrowserClock;
