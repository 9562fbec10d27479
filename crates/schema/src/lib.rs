pub mod backend;
pub mod depends;
pub mod element;
pub mod error;
pub mod kind;
pub mod meta;
pub mod option;
pub mod route;
pub mod sections;
pub mod validation;

pub mod prelude {
    pub use crate::backend::BackendKind;
    pub use crate::depends::{DependsCondition, DependsRule, DependsRuleSet, FieldValues};
    pub use crate::element::{Field, Group, Section};
    pub use crate::error::SchemaError;
    pub use crate::kind::FieldKind;
    pub use crate::meta::ElementMeta;
    pub use crate::option::{FieldOption, OptionsSource};
    pub use crate::route::Route;
    pub use crate::sections::Sections;
    pub use crate::validation::ValidationRule;
}

pub use backend::BackendKind;
pub use element::{Field, Group, Section};
pub use error::SchemaError;
pub use kind::FieldKind;
pub use route::Route;
pub use sections::Sections;
