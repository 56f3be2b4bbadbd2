pub mod error;
pub mod paths;
pub mod schema;
pub mod store;

pub use error::{Result, StoreError};
pub use paths::{data_dir, default_base_dir};
pub use store::PrefStore;
