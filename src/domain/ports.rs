use crate::domain::model::{CatalogItem, Intent, UserProfile};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 課程目錄來源
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn catalog(&self) -> Result<Vec<CatalogItem>>;
}

/// 使用者檔案來源
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn profile(&self) -> Result<UserProfile>;
}

/// 依意圖查詢的罐頭回覆
pub trait ResponseTemplates: Send + Sync {
    fn response_for(&self, intent: Intent) -> Option<&str>;
}
