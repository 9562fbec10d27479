pub mod accessor;
pub mod backend;
pub mod error;
pub mod option_model;
pub mod path;
pub mod service;

pub mod prelude {
    pub use crate::accessor::{Bool, Float, Int, IntCsv, Obscured, Str, StrCsv};
    pub use crate::error::ModelError;
    pub use crate::option_model::{OptionModel, OptionModelRegistry, StaticOptions};
    pub use crate::path::ScopedPath;
    pub use crate::service::{ConfigService, ConfigServiceBuilder, Resolved, ValueOrigin};
}

pub use accessor::{Bool, Float, Int, IntCsv, Obscured, Str, StrCsv};
pub use error::ModelError;
pub use option_model::{OptionModel, OptionModelRegistry, StaticOptions};
pub use path::ScopedPath;
pub use service::{ConfigService, ConfigServiceBuilder, Resolved, ValueOrigin};

/// Standard result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
