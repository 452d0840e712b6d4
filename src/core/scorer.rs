//! Tiered course filter and positional scorer.
//!
//! Tiers are either/or for the whole call: expanded interest keywords,
//! then skills, then the first `popular_count` catalog items.
//! Matched items keep catalog order and get `score_base - score_step * index`.

use std::collections::{BTreeSet, HashSet};

use crate::core::reasons::{ProfileView, ReasonEngine};
use crate::domain::model::{CatalogItem, MatchTier, RankedItem, SortKey};

pub const DEFAULT_POPULAR_COUNT: usize = 6;
pub const DEFAULT_SCORE_BASE: i32 = 90;
pub const DEFAULT_SCORE_STEP: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub popular_count: usize,
    pub score_base: i32,
    pub score_step: i32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            popular_count: DEFAULT_POPULAR_COUNT,
            score_base: DEFAULT_SCORE_BASE,
            score_step: DEFAULT_SCORE_STEP,
        }
    }
}

impl ScoringPolicy {
    fn score_at(&self, index: usize) -> i32 {
        let index = i32::try_from(index).unwrap_or(i32::MAX);
        self.score_base
            .saturating_sub(self.score_step.saturating_mul(index))
    }
}

/// 單次打分的輸入
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub expanded_keywords: &'a BTreeSet<String>,
    /// 未展開的原始興趣，只用於 reason
    pub interests: &'a BTreeSet<String>,
    pub skills: &'a BTreeSet<String>,
    pub completed_titles: &'a BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredBatch {
    pub tier: MatchTier,
    pub items: Vec<RankedItem>,
}

#[derive(Debug, Clone)]
pub struct RecommendationScorer {
    policy: ScoringPolicy,
    reasons: ReasonEngine,
}

impl RecommendationScorer {
    pub fn new(policy: ScoringPolicy, reasons: ReasonEngine) -> Self {
        Self { policy, reasons }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn score(&self, catalog: &[CatalogItem], input: ScoringInput<'_>) -> ScoredBatch {
        let keywords = normalized(input.expanded_keywords);
        let skills = normalized(input.skills);

        let (tier, eligible): (MatchTier, Vec<&CatalogItem>) = if !keywords.is_empty() {
            (MatchTier::Interest, matching(catalog, &keywords))
        } else if !skills.is_empty() {
            (MatchTier::Skill, matching(catalog, &skills))
        } else {
            (
                MatchTier::Popular,
                distinct(catalog.iter())
                    .take(self.policy.popular_count)
                    .collect(),
            )
        };

        tracing::debug!(
            "Tier {:?} selected {} of {} catalog items",
            tier,
            eligible.len(),
            catalog.len()
        );

        let view = ProfileView::from_parts(input.interests, input.skills, input.completed_titles);

        let items = eligible
            .into_iter()
            .enumerate()
            .map(|(index, item)| RankedItem {
                item: item.clone(),
                relevance_score: self.policy.score_at(index),
                reason: self.reasons.reason_for(item, &view),
            })
            .collect();

        ScoredBatch { tier, items }
    }
}

/// 分數已綁在項目上，重排不影響分數
pub fn apply_sort(items: &mut [RankedItem], sort: SortKey) {
    match sort {
        SortKey::Catalog => {}
        SortKey::Title => items.sort_by_key(|r| r.item.title.to_lowercase()),
        SortKey::Difficulty => items.sort_by_key(|r| r.item.difficulty),
    }
}

fn normalized(values: &BTreeSet<String>) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

fn matching<'a>(catalog: &'a [CatalogItem], needles: &[String]) -> Vec<&'a CatalogItem> {
    distinct(catalog.iter())
        .filter(|item| needles.iter().any(|n| item.mentions(n)))
        .collect()
}

/// 同一 id 只保留第一次出現
fn distinct<'a>(items: impl Iterator<Item = &'a CatalogItem>) -> impl Iterator<Item = &'a CatalogItem> {
    let mut seen: HashSet<&'a str> = HashSet::new();
    items.filter(move |item| {
        let item: &'a CatalogItem = *item;
        seen.insert(item.id.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reasons::DEFAULT_REASON;
    use crate::domain::model::Difficulty;

    fn course(id: &str, title: &str, category: &str) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            description: String::new(),
            tags: BTreeSet::new(),
            difficulty: Difficulty::Beginner,
        }
    }

    fn scorer() -> RecommendationScorer {
        RecommendationScorer::new(ScoringPolicy::default(), ReasonEngine::new(vec![], DEFAULT_REASON))
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn input<'a>(
        keywords: &'a BTreeSet<String>,
        skills: &'a BTreeSet<String>,
        empty: &'a BTreeSet<String>,
    ) -> ScoringInput<'a> {
        ScoringInput {
            expanded_keywords: keywords,
            interests: empty,
            skills,
            completed_titles: empty,
        }
    }

    #[test]
    fn test_empty_catalog_yields_empty_result() {
        let kw = set(&["rust"]);
        let empty = BTreeSet::new();
        let batch = scorer().score(&[], input(&kw, &empty, &empty));
        assert!(batch.items.is_empty());
        assert_eq!(batch.tier, MatchTier::Interest);
    }

    #[test]
    fn test_matches_keep_catalog_order_with_decreasing_scores() {
        let catalog = vec![
            course("c1", "Cloud Basics", "Cloud"),
            course("c2", "Painting", "Art"),
            course("c3", "AWS Deep Dive", "Cloud"),
        ];
        let kw = set(&["aws", "cloud"]);
        let empty = BTreeSet::new();

        let batch = scorer().score(&catalog, input(&kw, &empty, &empty));
        let ids: Vec<&str> = batch.items.iter().map(|r| r.item.id.as_str()).collect();

        assert_eq!(ids, vec!["c1", "c3"]);
        assert_eq!(batch.items[0].relevance_score, 90);
        assert_eq!(batch.items[1].relevance_score, 85);
    }

    #[test]
    fn test_skills_used_only_without_keywords() {
        let catalog = vec![
            course("c1", "Python for Data", "Data Science"),
            course("c2", "Rust Systems", "Programming"),
        ];
        let kw = set(&["rust"]);
        let skills = set(&["python"]);
        let no_kw = BTreeSet::new();
        let empty = BTreeSet::new();

        let by_interest = scorer().score(&catalog, input(&kw, &skills, &empty));
        assert_eq!(by_interest.tier, MatchTier::Interest);
        assert_eq!(by_interest.items.len(), 1);
        assert_eq!(by_interest.items[0].item.id, "c2");

        let by_skill = scorer().score(&catalog, input(&no_kw, &skills, &empty));
        assert_eq!(by_skill.tier, MatchTier::Skill);
        assert_eq!(by_skill.items.len(), 1);
        assert_eq!(by_skill.items[0].item.id, "c1");
    }

    #[test]
    fn test_popular_fallback_takes_first_n() {
        let catalog: Vec<CatalogItem> = (1..=8)
            .map(|i| course(&format!("c{}", i), &format!("Course {}", i), "General"))
            .collect();
        let empty = BTreeSet::new();

        let batch = scorer().score(&catalog, input(&empty, &empty, &empty));
        let ids: Vec<&str> = batch.items.iter().map(|r| r.item.id.as_str()).collect();

        assert_eq!(batch.tier, MatchTier::Popular);
        assert_eq!(ids, vec!["c1", "c2", "c3", "c4", "c5", "c6"]);
        assert!(batch.items.iter().all(|r| r.reason == DEFAULT_REASON));
    }

    #[test]
    fn test_duplicate_ids_are_ranked_once() {
        let catalog = vec![
            course("c1", "Cloud Basics", "Cloud"),
            course("c1", "Cloud Basics", "Cloud"),
            course("c2", "Cloud Security", "Cloud"),
        ];
        let kw = set(&["cloud"]);
        let empty = BTreeSet::new();

        let batch = scorer().score(&catalog, input(&kw, &empty, &empty));
        let ids: Vec<&str> = batch.items.iter().map(|r| r.item.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
        assert_eq!(batch.items[1].relevance_score, 85);
    }

    #[test]
    fn test_no_padding_when_few_items_match() {
        let catalog = vec![
            course("c1", "Painting", "Art"),
            course("c2", "Sculpture", "Art"),
        ];
        let kw = set(&["blockchain"]);
        let empty = BTreeSet::new();

        let batch = scorer().score(&catalog, input(&kw, &empty, &empty));
        assert!(batch.items.is_empty());
    }

    #[test]
    fn test_sort_by_title_keeps_scores() {
        let catalog = vec![
            course("c1", "Zig Basics", "Programming"),
            course("c2", "Ada Basics", "Programming"),
        ];
        let kw = set(&["programming"]);
        let empty = BTreeSet::new();

        let mut items = scorer().score(&catalog, input(&kw, &empty, &empty)).items;
        apply_sort(&mut items, SortKey::Title);

        assert_eq!(items[0].item.id, "c2");
        assert_eq!(items[0].relevance_score, 85);
        assert_eq!(items[1].item.id, "c1");
        assert_eq!(items[1].relevance_score, 90);
    }
}
