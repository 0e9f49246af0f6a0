//! Finder API client and typed endpoint bindings

pub mod categories;
mod client;
pub mod reviews;
pub mod workers;

pub use client::ApiClient;

use serde::{Deserialize, Serialize};

/// Page envelope the API wraps every listing in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(rename = "totalElements")]
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Number of pages at the given page size
    pub fn total_pages(&self, page_size: u32) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(page_size as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_envelope_deserializes() {
        let page: Page<String> =
            serde_json::from_str(r#"{"content":["a","b"],"totalElements":13}"#).unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 13);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Page::<()> {
            content: vec![],
            total_elements: 13,
        };
        assert_eq!(page.total_pages(6), 3);
        assert_eq!(page.total_pages(13), 1);
        assert_eq!(page.total_pages(0), 0);
    }
}
