pub mod error;
pub mod perm;
pub mod scope;

pub mod prelude {
    pub use crate::error::ScopeError;
    pub use crate::perm::ScopePerm;
    pub use crate::scope::{Scope, StoreId, StoreWebsiteMap, WebsiteId};
}

pub use error::ScopeError;
pub use perm::ScopePerm;
pub use scope::{Scope, StoreId, StoreWebsiteMap, WebsiteId};
