//! Pagination query parameters and response metadata.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 500;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers,
/// which also works when the struct is flattened into another query type.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Validates pagination parameters and converts them to offset/limit.
    ///
    /// Page defaults to 1 and must be positive; page size defaults to 50 and
    /// must be between 1 and 500.
    pub fn validate_and_get_offset_limit(&self) -> Result<(usize, usize), String> {
        let page = self.page();
        let page_size = self.page_size();

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(format!("Page size must be between 1 and {}", MAX_PAGE_SIZE));
        }

        let offset = (page as usize - 1) * page_size as usize;
        Ok((offset, page_size as usize))
    }
}

/// Pagination metadata for responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: usize,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(params: &PaginationParams, total_items: usize) -> Self {
        let page_size = params.page_size();
        Self {
            page: params.page(),
            page_size,
            total_items,
            total_pages: total_items.div_ceil(page_size.max(1) as usize) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<u32>, page_size: Option<u32>) -> PaginationParams {
        PaginationParams { page, page_size }
    }

    #[test]
    fn test_defaults() {
        let (offset, limit) = params(None, None).validate_and_get_offset_limit().unwrap();
        assert_eq!(offset, 0);
        assert_eq!(limit, 50);
    }

    #[test]
    fn test_custom_page_and_size() {
        let (offset, limit) = params(Some(3), Some(20)).validate_and_get_offset_limit().unwrap();
        assert_eq!(offset, 40);
        assert_eq!(limit, 20);
    }

    #[test]
    fn test_page_zero_is_error() {
        assert!(params(Some(0), None).validate_and_get_offset_limit().is_err());
    }

    #[test]
    fn test_page_size_bounds() {
        assert!(params(None, Some(0)).validate_and_get_offset_limit().is_err());
        assert!(params(None, Some(1)).validate_and_get_offset_limit().is_ok());
        assert!(params(None, Some(500)).validate_and_get_offset_limit().is_ok());
        assert!(params(None, Some(501)).validate_and_get_offset_limit().is_err());
    }

    #[test]
    fn test_meta_total_pages() {
        assert_eq!(PaginationMeta::new(&params(None, Some(10)), 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(&params(None, Some(10)), 10).total_pages, 1);
        assert_eq!(PaginationMeta::new(&params(None, Some(10)), 11).total_pages, 2);
    }

    #[test]
    fn test_parses_from_query_strings() {
        let p: PaginationParams = serde_json::from_str(r#"{"page": "2", "page_size": "25"}"#).unwrap();
        assert_eq!(p.page, Some(2));
        assert_eq!(p.page_size, Some(25));
    }
}
