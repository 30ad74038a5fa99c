//! Profile types and operations

pub mod key;
pub mod object_filter;
pub mod store;
pub mod templates;
mod types;

pub use key::{KeyError, ProfileKey};
pub use object_filter::ObjectNameFilter;
pub use store::{GroupNode, ProfileLocation, ProfileStore};
pub use templates::{FilterTemplate, FilterTemplateStore, TEMPLATE_KEY_PREFIX};
pub use types::*;
