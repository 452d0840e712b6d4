use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// 使用者意圖 (封閉集合)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    CourseSearch,
    CourseRecommendation,
    PlanCreate,
    PlanUpdate,
    ProgressCheck,
    QuizHelp,
    Feedback,
    Motivation,
    GeneralHelp,
}

impl Intent {
    pub const ALL: [Intent; 9] = [
        Intent::CourseSearch,
        Intent::CourseRecommendation,
        Intent::PlanCreate,
        Intent::PlanUpdate,
        Intent::ProgressCheck,
        Intent::QuizHelp,
        Intent::Feedback,
        Intent::Motivation,
        Intent::GeneralHelp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::CourseSearch => "course_search",
            Intent::CourseRecommendation => "course_recommendation",
            Intent::PlanCreate => "plan_create",
            Intent::PlanUpdate => "plan_update",
            Intent::ProgressCheck => "progress_check",
            Intent::QuizHelp => "quiz_help",
            Intent::Feedback => "feedback",
            Intent::Motivation => "motivation",
            Intent::GeneralHelp => "general_help",
        }
    }

    /// 只有推薦意圖會觸發課程排序
    pub fn is_recommendation(&self) -> bool {
        matches!(self, Intent::CourseRecommendation)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Intent::ALL
            .iter()
            .copied()
            .find(|intent| intent.as_str() == normalized)
            .ok_or_else(|| format!("Unknown intent: {}", s))
    }
}

/// 一條意圖規則: 依序比對關鍵字，第一個命中者勝出
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: Vec<String>,
}

impl IntentRule {
    pub fn new<K>(intent: Intent, keywords: K) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self {
            intent,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(alias = "beginner", alias = "BEGINNER")]
    Beginner,
    #[serde(alias = "intermediate", alias = "INTERMEDIATE")]
    Intermediate,
    #[serde(alias = "advanced", alias = "ADVANCED")]
    Advanced,
    #[serde(alias = "expert", alias = "EXPERT")]
    Expert,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
        }
    }

    pub fn is_beginner(&self) -> bool {
        matches!(self, Difficulty::Beginner)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(format!("Unknown difficulty: {}", s)),
        }
    }
}

/// 使用者檔案，由 profile provider 提供，核心只讀不寫
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub interests: BTreeSet<String>,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub completed_item_titles: BTreeSet<String>,
}

impl UserProfile {
    pub fn new<I, S, C>(interests: I, skills: S, completed: C) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            interests: interests.into_iter().map(Into::into).collect(),
            skills: skills.into_iter().map(Into::into).collect(),
            completed_item_titles: completed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.interests.is_empty() && self.skills.is_empty() && self.completed_item_titles.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub difficulty: Difficulty,
}

impl CatalogItem {
    /// 任一文字欄位 (category/title/description/tags) 包含 needle，不分大小寫
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        if needle.is_empty() {
            return false;
        }
        self.category.to_lowercase().contains(&needle)
            || self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedItem {
    pub item: CatalogItem,
    pub relevance_score: i32,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub intent: Intent,
}

/// 排序結果來自哪一層
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Interest,
    Skill,
    Popular,
}

/// 呼叫端要求的排序方式，預設維持目錄順序
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Catalog,
    Title,
    Difficulty,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "catalog" => Ok(SortKey::Catalog),
            "title" => Ok(SortKey::Title),
            "difficulty" => Ok(SortKey::Difficulty),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

/// 單次請求的輸出
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub intent: Intent,
    pub items: Vec<RankedItem>,
}
