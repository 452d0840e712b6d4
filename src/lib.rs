pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{AdvisorConfig, LocalFiles};
pub use crate::core::{
    advisor::Advisor,
    engine::{AssistantEngine, AssistantReply},
};
pub use crate::domain::model::{
    CatalogItem, ClassificationResult, Difficulty, Intent, IntentRule, MatchTier, RankedItem,
    Recommendation, SortKey, UserProfile,
};
pub use crate::utils::error::{AdvisorError, Result};
