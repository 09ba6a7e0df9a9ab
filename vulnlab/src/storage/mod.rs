mod config;
mod errors;
mod postgres;
mod sqlite;
mod store;
mod types;

pub use config::{DEFAULT_DATA_STORE_URL, StoreConfig, StoreType};
pub use errors::StorageError;
pub use store::LabStore;
pub use types::{Account, Profile, UserRow};
