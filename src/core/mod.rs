pub mod advisor;
pub mod classifier;
pub mod engine;
pub mod expander;
pub mod reasons;
pub mod scorer;

pub use crate::domain::model::{CatalogItem, Intent, RankedItem, Recommendation, UserProfile};
pub use crate::domain::ports::{CatalogProvider, ProfileProvider, ResponseTemplates};
pub use crate::utils::error::Result;
