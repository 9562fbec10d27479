pub mod error;
pub mod seed;
pub mod storage;

pub mod prelude {
    pub use crate::error::StoreError;
    pub use crate::seed::{EnvSeeder, TomlSeeder};
    pub use crate::storage::{ConfigStorage, MemoryStorage};
}

pub use error::StoreError;
pub use seed::{EnvSeeder, TomlSeeder};
pub use storage::{ConfigStorage, MemoryStorage};

/// Standard result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
