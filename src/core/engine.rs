use crate::core::advisor::Advisor;
use crate::domain::model::{Intent, RankedItem, Recommendation, SortKey};
use crate::domain::ports::{CatalogProvider, ProfileProvider, ResponseTemplates};
use crate::utils::error::Result;
use serde::Serialize;
use std::sync::Arc;

/// 回給 transport 的完整回覆
#[derive(Debug, Clone, Serialize)]
pub struct AssistantReply {
    pub intent: Intent,
    pub message: Option<String>,
    pub items: Vec<RankedItem>,
}

/// 呼叫端: 先解析 profile/catalog，再交給純核心處理
pub struct AssistantEngine<C: CatalogProvider, P: ProfileProvider, T: ResponseTemplates> {
    advisor: Arc<Advisor>,
    catalog: C,
    profile: P,
    templates: T,
}

impl<C: CatalogProvider, P: ProfileProvider, T: ResponseTemplates> AssistantEngine<C, P, T> {
    pub fn new(advisor: Arc<Advisor>, catalog: C, profile: P, templates: T) -> Self {
        Self {
            advisor,
            catalog,
            profile,
            templates,
        }
    }

    pub async fn respond(&self, text: &str) -> Result<AssistantReply> {
        self.respond_sorted(text, SortKey::Catalog).await
    }

    pub async fn respond_sorted(&self, text: &str, sort: SortKey) -> Result<AssistantReply> {
        let intent = self.advisor.classify(text).intent;
        tracing::info!("Classified message as '{}'", intent);

        let recommendation = if intent.is_recommendation() {
            // 只有推薦才需要外部資料
            let (profile, catalog) = tokio::try_join!(self.profile.profile(), self.catalog.catalog())?;
            tracing::debug!(
                "Resolved profile ({} interests, {} skills) and {} catalog items",
                profile.interests.len(),
                profile.skills.len(),
                catalog.len()
            );
            if profile.is_empty() {
                tracing::warn!("Profile has no interests, skills or history; using popular courses");
            }
            self.advisor.handle_with(text, &profile, &catalog, sort)
        } else {
            Recommendation {
                intent,
                items: Vec::new(),
            }
        };

        tracing::info!("Returning {} ranked items", recommendation.items.len());

        Ok(AssistantReply {
            intent: recommendation.intent,
            message: self
                .templates
                .response_for(recommendation.intent)
                .map(str::to_string),
            items: recommendation.items,
        })
    }
}
