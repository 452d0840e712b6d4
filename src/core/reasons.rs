//! Layered reason rules for ranked courses.
//!
//! Layers are fixed: progression > interest > skill > category > default.
//! Within one layer the configured order decides.

use crate::domain::model::{CatalogItem, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_REASON: &str = "Recommended based on your profile";

/// 完成某課程後的下一步
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRule {
    pub completed_contains: Vec<String>,
    pub candidate_contains: Vec<String>,
    pub reason: String,
}

/// 領域規則，interest 與 skill 兩層共用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRule {
    pub domain: String,
    pub profile_contains: Vec<String>,
    pub item_contains: Vec<String>,
    pub beginner: String,
    pub advanced: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category_contains: Vec<String>,
    pub beginner: String,
    pub advanced: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReasonRule {
    Progression(ProgressionRule),
    Interest(DomainRule),
    Skill(DomainRule),
    Category(CategoryRule),
}

impl ReasonRule {
    fn layer(&self) -> u8 {
        match self {
            ReasonRule::Progression(_) => 0,
            ReasonRule::Interest(_) => 1,
            ReasonRule::Skill(_) => 2,
            ReasonRule::Category(_) => 3,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ReasonRule::Progression(_) => "progression",
            ReasonRule::Interest(_) => "interest",
            ReasonRule::Skill(_) => "skill",
            ReasonRule::Category(_) => "category",
        }
    }
}

/// 每次請求先把 profile 轉成小寫，避免逐項重算
#[derive(Debug, Clone, Default)]
pub struct ProfileView {
    interests: Vec<String>,
    skills: Vec<String>,
    /// (original, lower-cased)
    completed: Vec<(String, String)>,
}

impl ProfileView {
    pub fn new(profile: &UserProfile) -> Self {
        Self::from_parts(
            &profile.interests,
            &profile.skills,
            &profile.completed_item_titles,
        )
    }

    pub fn from_parts(
        interests: &BTreeSet<String>,
        skills: &BTreeSet<String>,
        completed: &BTreeSet<String>,
    ) -> Self {
        Self {
            interests: lowered(interests.iter()),
            skills: lowered(skills.iter()),
            completed: completed
                .iter()
                .filter(|t| !t.trim().is_empty())
                .map(|t| (t.clone(), t.to_lowercase()))
                .collect(),
        }
    }
}

fn lowered<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    values
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

fn any_contains(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|n| !n.is_empty() && haystack.contains(&n.to_lowercase()))
}

#[derive(Debug, Clone)]
pub struct ReasonEngine {
    rules: Vec<ReasonRule>,
    default_reason: String,
}

impl ReasonEngine {
    pub fn new(mut rules: Vec<ReasonRule>, default_reason: impl Into<String>) -> Self {
        // stable: 同層維持設定順序
        rules.sort_by_key(ReasonRule::layer);
        Self {
            rules,
            default_reason: default_reason.into(),
        }
    }

    pub fn reason_for(&self, item: &CatalogItem, profile: &ProfileView) -> String {
        self.rules
            .iter()
            .find_map(|rule| self.apply(rule, item, profile))
            .unwrap_or_else(|| self.default_reason.clone())
    }

    pub fn rules(&self) -> &[ReasonRule] {
        &self.rules
    }

    fn apply(&self, rule: &ReasonRule, item: &CatalogItem, profile: &ProfileView) -> Option<String> {
        match rule {
            ReasonRule::Progression(rule) => {
                let candidate = format!("{} {}", item.title, item.category).to_lowercase();
                if !any_contains(&candidate, &rule.candidate_contains) {
                    return None;
                }
                profile
                    .completed
                    .iter()
                    .find(|(_, lower)| any_contains(lower, &rule.completed_contains))
                    .map(|(original, _)| render(&rule.reason, item, "", original))
            }
            ReasonRule::Interest(rule) => domain_reason(rule, item, &profile.interests),
            ReasonRule::Skill(rule) => domain_reason(rule, item, &profile.skills),
            ReasonRule::Category(rule) => {
                if any_contains(&item.category.to_lowercase(), &rule.category_contains) {
                    Some(render(pick(item, &rule.beginner, &rule.advanced), item, "", ""))
                } else {
                    None
                }
            }
        }
    }
}

fn domain_reason(rule: &DomainRule, item: &CatalogItem, declared: &[String]) -> Option<String> {
    let declared_match = declared
        .iter()
        .any(|value| any_contains(value, &rule.profile_contains));
    if !declared_match {
        return None;
    }

    let item_text = format!(
        "{} {} {}",
        item.category,
        item.title,
        item.tags.iter().cloned().collect::<Vec<_>>().join(" ")
    )
    .to_lowercase();
    if !any_contains(&item_text, &rule.item_contains) {
        return None;
    }

    Some(render(pick(item, &rule.beginner, &rule.advanced), item, &rule.domain, ""))
}

fn pick<'a>(item: &CatalogItem, beginner: &'a str, advanced: &'a str) -> &'a str {
    if item.difficulty.is_beginner() {
        beginner
    } else {
        advanced
    }
}

fn render(template: &str, item: &CatalogItem, domain: &str, completed: &str) -> String {
    template
        .replace("{title}", &item.title)
        .replace("{category}", &item.category)
        .replace("{difficulty}", item.difficulty.as_str())
        .replace("{domain}", domain)
        .replace("{completed}", completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Difficulty;

    fn course(title: &str, category: &str, difficulty: Difficulty) -> CatalogItem {
        CatalogItem {
            id: title.to_lowercase().replace(' ', "-"),
            title: title.to_string(),
            category: category.to_string(),
            description: String::new(),
            tags: Default::default(),
            difficulty,
        }
    }

    fn web_interest() -> ReasonRule {
        ReasonRule::Interest(DomainRule {
            domain: "Web Development".to_string(),
            profile_contains: vec!["web".to_string()],
            item_contains: vec!["web".to_string(), "css".to_string()],
            beginner: "Start your {domain} journey with {title}".to_string(),
            advanced: "Deepen your {domain} expertise with {title}".to_string(),
        })
    }

    fn html_to_css() -> ReasonRule {
        ReasonRule::Progression(ProgressionRule {
            completed_contains: vec!["html".to_string()],
            candidate_contains: vec!["css".to_string()],
            reason: "Next step after {completed}".to_string(),
        })
    }

    #[test]
    fn test_progression_beats_interest_regardless_of_config_order() {
        let engine = ReasonEngine::new(vec![web_interest(), html_to_css()], DEFAULT_REASON);
        let profile = UserProfile::new(["web development"], Vec::<String>::new(), ["HTML Basics"]);
        let item = course("CSS Layouts", "Web Development", Difficulty::Beginner);

        let reason = engine.reason_for(&item, &ProfileView::new(&profile));
        assert_eq!(reason, "Next step after HTML Basics");
    }

    #[test]
    fn test_interest_phrasing_follows_difficulty() {
        let engine = ReasonEngine::new(vec![web_interest()], DEFAULT_REASON);
        let view = ProfileView::new(&UserProfile::new(
            ["Web"],
            Vec::<String>::new(),
            Vec::<String>::new(),
        ));

        let easy = course("HTML Basics", "Web Development", Difficulty::Beginner);
        let hard = course("Web Performance", "Web Development", Difficulty::Expert);

        assert_eq!(
            engine.reason_for(&easy, &view),
            "Start your Web Development journey with HTML Basics"
        );
        assert_eq!(
            engine.reason_for(&hard, &view),
            "Deepen your Web Development expertise with Web Performance"
        );
    }

    #[test]
    fn test_skill_rule_uses_skills_not_interests() {
        let engine = ReasonEngine::new(
            vec![ReasonRule::Skill(DomainRule {
                domain: "Python".to_string(),
                profile_contains: vec!["python".to_string()],
                item_contains: vec!["data".to_string()],
                beginner: "Put your {domain} skills to work".to_string(),
                advanced: "Stretch your {domain} skills".to_string(),
            })],
            DEFAULT_REASON,
        );
        let item = course("Data Wrangling", "Data Science", Difficulty::Intermediate);

        let by_interest = UserProfile::new(["python"], Vec::<String>::new(), Vec::<String>::new());
        let by_skill = UserProfile::new(Vec::<String>::new(), ["Python"], Vec::<String>::new());

        assert_eq!(engine.reason_for(&item, &ProfileView::new(&by_interest)), DEFAULT_REASON);
        assert_eq!(
            engine.reason_for(&item, &ProfileView::new(&by_skill)),
            "Stretch your Python skills"
        );
    }

    #[test]
    fn test_category_rule_then_default() {
        let engine = ReasonEngine::new(
            vec![ReasonRule::Category(CategoryRule {
                category_contains: vec!["data".to_string()],
                beginner: "A gentle {category} introduction".to_string(),
                advanced: "An {difficulty} {category} course".to_string(),
            })],
            DEFAULT_REASON,
        );
        let view = ProfileView::default();

        let data = course("Statistics", "Data Science", Difficulty::Advanced);
        let art = course("Drawing", "Art", Difficulty::Beginner);

        assert_eq!(engine.reason_for(&data, &view), "An Advanced Data Science course");
        assert_eq!(engine.reason_for(&art, &view), DEFAULT_REASON);
    }

    #[test]
    fn test_rules_are_grouped_by_layer() {
        let engine = ReasonEngine::new(vec![web_interest(), html_to_css()], DEFAULT_REASON);
        let kinds: Vec<&str> = engine.rules().iter().map(ReasonRule::kind).collect();
        assert_eq!(kinds, vec!["progression", "interest"]);
    }
}
