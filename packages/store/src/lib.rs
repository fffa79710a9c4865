pub mod error;
pub mod models;
pub mod tables;

mod memory;
pub use memory::MemoryStorage;

mod file_store;
pub use file_store::FileStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorage;

pub use error::StoreError;
pub use models::Record;
pub use tables::{ObjectStore, Storage};
