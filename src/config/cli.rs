use crate::core::{CatalogProvider, ProfileProvider};
use crate::domain::model::{CatalogItem, Difficulty, UserProfile};
use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::validate_file_extension;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

/// 本機檔案當作 catalog/profile 來源
#[derive(Debug, Clone, Default)]
pub struct LocalFiles {
    catalog_path: Option<String>,
    profile_path: Option<String>,
}

impl LocalFiles {
    pub fn new(catalog_path: Option<String>, profile_path: Option<String>) -> Self {
        Self {
            catalog_path,
            profile_path,
        }
    }

    pub fn catalog_path(&self) -> Option<&str> {
        self.catalog_path.as_deref()
    }

    pub fn profile_path(&self) -> Option<&str> {
        self.profile_path.as_deref()
    }
}

#[async_trait]
impl CatalogProvider for LocalFiles {
    async fn catalog(&self) -> Result<Vec<CatalogItem>> {
        let path = self
            .catalog_path
            .as_deref()
            .ok_or_else(|| AdvisorError::MissingConfigError {
                field: "catalog".to_string(),
            })?;
        validate_file_extension(path, &["json", "csv"])?;

        let data = tokio::fs::read(path).await.map_err(|e| AdvisorError::ProviderError {
            provider: "catalog".to_string(),
            message: format!("{}: {}", path, e),
        })?;
        let items = if is_csv(path) {
            parse_catalog_csv(&data)?
        } else {
            parse_catalog_json(&data)?
        };

        tracing::debug!("Loaded {} catalog items from {}", items.len(), path);
        Ok(items)
    }
}

#[async_trait]
impl ProfileProvider for LocalFiles {
    async fn profile(&self) -> Result<UserProfile> {
        let Some(path) = self.profile_path.as_deref() else {
            tracing::debug!("No profile file given, using an empty profile");
            return Ok(UserProfile::default());
        };
        validate_file_extension(path, &["json"])?;

        let data = tokio::fs::read(path).await.map_err(|e| AdvisorError::ProviderError {
            provider: "profile".to_string(),
            message: format!("{}: {}", path, e),
        })?;
        Ok(serde_json::from_slice(&data)?)
    }
}

fn is_csv(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

pub fn parse_catalog_json(data: &[u8]) -> Result<Vec<CatalogItem>> {
    Ok(serde_json::from_slice(data)?)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    title: String,
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: String,
    difficulty: Difficulty,
}

/// CSV header: id,title,category,description,tags,difficulty (tags 以 ';' 分隔)
pub fn parse_catalog_csv(data: &[u8]) -> Result<Vec<CatalogItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut items = Vec::new();
    for row in reader.deserialize::<CatalogRow>() {
        let row = row?;
        items.push(CatalogItem {
            id: row.id,
            title: row.title,
            category: row.category,
            description: row.description,
            tags: row
                .tags
                .split(';')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            difficulty: row.difficulty,
        });
    }

    Ok(items)
}
