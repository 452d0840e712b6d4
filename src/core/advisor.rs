use crate::config::toml_config::AdvisorConfig;
use crate::core::classifier::IntentClassifier;
use crate::core::expander::InterestExpander;
use crate::core::reasons::ReasonEngine;
use crate::core::scorer::{apply_sort, RecommendationScorer, ScoredBatch, ScoringInput};
use crate::domain::model::{CatalogItem, ClassificationResult, Recommendation, SortKey, UserProfile};
use crate::utils::error::Result;

/// 單一入口: 分類意圖，必要時排序課程。純函式，不做 I/O
#[derive(Debug, Clone)]
pub struct Advisor {
    classifier: IntentClassifier,
    expander: InterestExpander,
    scorer: RecommendationScorer,
}

impl Advisor {
    pub fn new(
        classifier: IntentClassifier,
        expander: InterestExpander,
        scorer: RecommendationScorer,
    ) -> Self {
        Self {
            classifier,
            expander,
            scorer,
        }
    }

    pub fn from_config(config: &AdvisorConfig) -> Self {
        let classifier = IntentClassifier::new(config.intents.clone(), config.fallback_intent());
        let expander = InterestExpander::new(config.synonyms.iter());
        let reasons = ReasonEngine::new(config.reasons.clone(), config.default_reason());

        tracing::debug!(
            "Advisor '{}' built with {} intent rules, {} synonym entries, {} reason rules",
            config.advisor.name,
            classifier.rules().len(),
            expander.len(),
            reasons.rules().len()
        );

        let scorer = RecommendationScorer::new(config.scoring_policy(), reasons);

        Self::new(classifier, expander, scorer)
    }

    /// 使用內建規則表
    pub fn builtin() -> Result<Self> {
        Ok(Self::from_config(&AdvisorConfig::builtin()?))
    }

    pub fn classify(&self, text: &str) -> ClassificationResult {
        self.classifier.classify(text)
    }

    /// 不看意圖，直接依 profile 排序
    pub fn rank(&self, profile: &UserProfile, catalog: &[CatalogItem]) -> ScoredBatch {
        let expanded = self.expander.expand(&profile.interests);
        self.scorer.score(
            catalog,
            ScoringInput {
                expanded_keywords: &expanded,
                interests: &profile.interests,
                skills: &profile.skills,
                completed_titles: &profile.completed_item_titles,
            },
        )
    }

    pub fn handle(&self, text: &str, profile: &UserProfile, catalog: &[CatalogItem]) -> Recommendation {
        self.handle_with(text, profile, catalog, SortKey::Catalog)
    }

    pub fn handle_with(
        &self,
        text: &str,
        profile: &UserProfile,
        catalog: &[CatalogItem],
        sort: SortKey,
    ) -> Recommendation {
        let intent = self.classify(text).intent;
        if !intent.is_recommendation() {
            return Recommendation {
                intent,
                items: Vec::new(),
            };
        }

        let batch = self.rank(profile, catalog);
        tracing::debug!("Ranked {} items via {:?} tier", batch.items.len(), batch.tier);

        let mut items = batch.items;
        apply_sort(&mut items, sort);
        Recommendation { intent, items }
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn expander(&self) -> &InterestExpander {
        &self.expander
    }

    pub fn scorer(&self) -> &RecommendationScorer {
        &self.scorer
    }
}
