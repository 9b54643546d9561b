// Adapters layer: concrete storage backends for the usage file and the catalog.

pub mod storage;

pub use storage::{LocalStorage, MemoryStorage};
