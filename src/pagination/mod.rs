//! Pagination parameters for list endpoints.

use crate::client::Params;
use serde_json::json;

/// Default page size for paginated requests.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Maximum page size the API will serve.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page/per-page query parameters bounding list-endpoint result size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    page: u32,
    per_page: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Creates page parameters. The page is 1-indexed and the page size is
    /// clamped to [`MAX_PAGE_SIZE`].
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.min(MAX_PAGE_SIZE),
        }
    }

    /// The page to fetch.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The page size.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Produces the `{page, per_page}` request parameters.
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("page".to_string(), json!(self.page));
        params.insert("per_page".to_string(), json!(self.per_page));
        params
    }

    /// Merges the pagination parameters into an existing parameter map.
    pub fn merge_into(&self, mut params: Params) -> Params {
        params.insert("page".to_string(), json!(self.page));
        params.insert("per_page".to_string(), json!(self.per_page));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params() {
        let params = PageParams::new(2, 50).to_params();
        assert_eq!(params.get("page"), Some(&json!(2)));
        assert_eq!(params.get("per_page"), Some(&json!(50)));
    }

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_per_page_clamped() {
        assert_eq!(PageParams::new(1, 500).per_page(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_floor() {
        assert_eq!(PageParams::new(0, 30).page(), 1);
    }
}
