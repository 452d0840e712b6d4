//! Keyword intent classifier.
//!
//! Rules are walked top to bottom and keywords left to right; the first
//! substring hit decides the intent. Table order is part of the contract.

use crate::domain::model::{ClassificationResult, Intent, IntentRule};

#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
    fallback: Intent,
}

impl IntentClassifier {
    /// 關鍵字一律轉小寫，空字串直接丟棄
    pub fn new(rules: Vec<IntentRule>, fallback: Intent) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| IntentRule {
                intent: rule.intent,
                keywords: rule
                    .keywords
                    .iter()
                    .map(|k| k.to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();

        Self { rules, fallback }
    }

    pub fn classify(&self, text: &str) -> ClassificationResult {
        let normalized = text.to_lowercase();

        for rule in &self.rules {
            if let Some(keyword) = rule.keywords.iter().find(|k| normalized.contains(k.as_str())) {
                tracing::debug!("Intent '{}' matched keyword '{}'", rule.intent, keyword);
                return ClassificationResult {
                    intent: rule.intent,
                };
            }
        }

        tracing::debug!("No intent keyword matched, falling back to '{}'", self.fallback);
        ClassificationResult {
            intent: self.fallback,
        }
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    pub fn fallback(&self) -> Intent {
        self.fallback
    }
}
