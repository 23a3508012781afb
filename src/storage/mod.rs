//! Durable client-side state.
//!
//! - [`Storage`], [`MemoryStorage`], [`FileStorage`] - string key/value backends
//! - [`SearchHistory`] - bounded most-recently-used city list
//! - [`HistoryRecorder`] - bus subscriber feeding the history from `weather:loaded`

mod backend;
mod history;

pub use backend::{FileStorage, MemoryStorage, Storage};
pub use history::{HistoryRecorder, SearchHistory};
