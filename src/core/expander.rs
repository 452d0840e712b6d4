//! Interest tag expansion.
//!
//! Maps declared interests to related keywords through a synonym table,
//! e.g. "ai" → "artificial intelligence", "machine learning".
//! Unknown tags pass through as literal keywords.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct InterestExpander {
    synonyms: BTreeMap<String, BTreeSet<String>>,
}

impl InterestExpander {
    /// 建表時把每個 canonical tag 放進自己的集合
    pub fn new<I, K, V>(table: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let mut synonyms: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for (tag, related) in table {
            let tag = tag.as_ref().trim().to_lowercase();
            if tag.is_empty() {
                continue;
            }

            let entry = synonyms.entry(tag.clone()).or_default();
            entry.insert(tag);
            entry.extend(
                related
                    .into_iter()
                    .map(|k| k.as_ref().trim().to_lowercase())
                    .filter(|k| !k.is_empty()),
            );
        }

        Self { synonyms }
    }

    pub fn expand<I>(&self, interests: I) -> BTreeSet<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut expanded = BTreeSet::new();

        for interest in interests {
            let tag = interest.as_ref().trim().to_lowercase();
            if tag.is_empty() {
                continue;
            }

            match self.synonyms.get(&tag) {
                Some(related) => expanded.extend(related.iter().cloned()),
                None => {
                    expanded.insert(tag);
                }
            }
        }

        tracing::debug!("Expanded interests into {} keywords", expanded.len());
        expanded
    }

    pub fn synonyms_for(&self, tag: &str) -> Option<&BTreeSet<String>> {
        self.synonyms.get(&tag.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expander() -> InterestExpander {
        InterestExpander::new([
            ("ai", vec!["artificial intelligence", "machine learning"]),
            ("Web Development", vec!["html", "CSS"]),
        ])
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let empty: Vec<&str> = vec![];
        assert!(expander().expand(empty).is_empty());
    }

    #[test]
    fn test_known_tag_expands_to_synonyms() {
        let out = expander().expand(["AI"]);
        assert!(out.contains("ai"));
        assert!(out.contains("artificial intelligence"));
        assert!(out.contains("machine learning"));
    }

    #[test]
    fn test_unknown_tag_passes_through_lower_cased() {
        let out = expander().expand(["Quantum Computing"]);
        assert_eq!(out.len(), 1);
        assert!(out.contains("quantum computing"));
    }

    #[test]
    fn test_canonical_tag_is_in_its_own_set() {
        let table = InterestExpander::new([("cloud", Vec::<&str>::new())]);
        assert!(table.synonyms_for("Cloud").unwrap().contains("cloud"));

        let out = expander().expand(["web development"]);
        assert!(out.contains("web development"));
        assert!(out.contains("css"));
    }

    #[test]
    fn test_expansion_is_order_independent() {
        let e = expander();
        assert_eq!(e.expand(["ai", "robotics"]), e.expand(["robotics", "ai"]));
    }
}
