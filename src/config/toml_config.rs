use crate::core::reasons::{ReasonRule, DEFAULT_REASON};
use crate::core::scorer::{ScoringPolicy, DEFAULT_POPULAR_COUNT, DEFAULT_SCORE_BASE, DEFAULT_SCORE_STEP};
use crate::domain::model::{Intent, IntentRule};
use crate::domain::ports::ResponseTemplates;
use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// 內建規則表，編譯時嵌入
pub const BUILTIN_CONFIG: &str = include_str!("../../config/advisor.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    pub advisor: AdvisorSettings,
    pub intents: Vec<IntentRule>,
    #[serde(default)]
    pub synonyms: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub reasons: Vec<ReasonRule>,
    #[serde(default)]
    pub responses: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorSettings {
    pub name: String,
    pub version: Option<String>,
    pub popular_count: Option<usize>,
    pub score_base: Option<i32>,
    pub score_step: Option<i32>,
    pub fallback_intent: Option<Intent>,
    pub default_reason: Option<String>,
}

impl AdvisorConfig {
    /// 內建設定
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CONFIG)
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdvisorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${STUDY_DEFAULT_REASON})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdvisorError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("advisor.name", &self.advisor.name)?;

        if self.intents.is_empty() {
            return Err(AdvisorError::MissingConfigError {
                field: "intents".to_string(),
            });
        }
        for (i, rule) in self.intents.iter().enumerate() {
            validation::validate_keywords(&format!("intents[{}].keywords", i), &rule.keywords)?;
        }

        if let Some(count) = self.advisor.popular_count {
            validation::validate_positive_number("advisor.popular_count", count, 1)?;
        }
        if let Some(base) = self.advisor.score_base {
            validation::validate_range("advisor.score_base", base, 1, 100_000)?;
        }
        if let Some(step) = self.advisor.score_step {
            validation::validate_range("advisor.score_step", step, 1, 10_000)?;
        }
        if let Some(reason) = &self.advisor.default_reason {
            validation::validate_non_empty_string("advisor.default_reason", reason)?;
        }

        for (tag, related) in &self.synonyms {
            validation::validate_keywords("synonyms", std::slice::from_ref(tag))?;
            for keyword in related {
                validation::validate_non_empty_string(&format!("synonyms.{}", tag), keyword)?;
            }
        }

        for (i, rule) in self.reasons.iter().enumerate() {
            Self::validate_reason(&format!("reasons[{}]", i), rule)?;
        }

        for key in self.responses.keys() {
            if key.parse::<Intent>().is_err() {
                return Err(AdvisorError::InvalidConfigValueError {
                    field: "responses".to_string(),
                    value: key.clone(),
                    reason: "Response key is not a known intent".to_string(),
                });
            }
        }

        Ok(())
    }

    fn validate_reason(field: &str, rule: &ReasonRule) -> Result<()> {
        match rule {
            ReasonRule::Progression(r) => {
                validation::validate_keywords(&format!("{}.completed_contains", field), &r.completed_contains)?;
                validation::validate_keywords(&format!("{}.candidate_contains", field), &r.candidate_contains)?;
                validation::validate_non_empty_string(&format!("{}.reason", field), &r.reason)
            }
            ReasonRule::Interest(r) | ReasonRule::Skill(r) => {
                validation::validate_non_empty_string(&format!("{}.domain", field), &r.domain)?;
                validation::validate_keywords(&format!("{}.profile_contains", field), &r.profile_contains)?;
                validation::validate_keywords(&format!("{}.item_contains", field), &r.item_contains)?;
                validation::validate_non_empty_string(&format!("{}.beginner", field), &r.beginner)?;
                validation::validate_non_empty_string(&format!("{}.advanced", field), &r.advanced)
            }
            ReasonRule::Category(r) => {
                validation::validate_keywords(&format!("{}.category_contains", field), &r.category_contains)?;
                validation::validate_non_empty_string(&format!("{}.beginner", field), &r.beginner)?;
                validation::validate_non_empty_string(&format!("{}.advanced", field), &r.advanced)
            }
        }
    }

    pub fn scoring_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            popular_count: self.advisor.popular_count.unwrap_or(DEFAULT_POPULAR_COUNT),
            score_base: self.advisor.score_base.unwrap_or(DEFAULT_SCORE_BASE),
            score_step: self.advisor.score_step.unwrap_or(DEFAULT_SCORE_STEP),
        }
    }

    pub fn fallback_intent(&self) -> Intent {
        self.advisor.fallback_intent.unwrap_or(Intent::GeneralHelp)
    }

    pub fn default_reason(&self) -> &str {
        self.advisor.default_reason.as_deref().unwrap_or(DEFAULT_REASON)
    }
}

impl ResponseTemplates for AdvisorConfig {
    fn response_for(&self, intent: Intent) -> Option<&str> {
        self.responses.get(intent.as_str()).map(String::as_str)
    }
}

impl Validate for AdvisorConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
