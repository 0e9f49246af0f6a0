//! Service category listings

use super::{ApiClient, Page};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A service category workers register under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Fetch a page of categories
pub async fn find_all(client: &ApiClient, page: u32, size: u32) -> Result<Page<Category>> {
    client
        .get(
            "/category/findAll",
            &[("page", page.to_string()), ("size", size.to_string())],
        )
        .await
}
