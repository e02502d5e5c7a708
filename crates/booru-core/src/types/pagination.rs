//! Offset pagination for list endpoints.
//!
//! Every listing accepts `{limit, offset, sort, keywords}` and answers with
//! `{list, meta: {per_page, page, total}}`, where `page` is derived as
//! `ceil((offset + 1) / limit)`.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Default page size.
pub const DEFAULT_LIMIT: i64 = 50;
/// Largest page size a caller may request; larger values are clamped.
pub const MAX_LIMIT: i64 = 500;

/// Raw listing parameters as received from the query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery {
    /// Maximum number of rows to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of matching rows to skip.
    #[serde(default)]
    pub offset: i64,
    /// Ordering expression, `"<column> [asc|desc]"`.
    #[serde(default)]
    pub sort: Option<String>,
    /// Case-insensitive substring filter.
    #[serde(default)]
    pub keywords: String,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            sort: None,
            keywords: String::new(),
        }
    }
}

/// A validated `LIMIT`/`OFFSET` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// SQL `LIMIT`, always in `1..=MAX_LIMIT`.
    pub limit: i64,
    /// SQL `OFFSET`, never negative.
    pub offset: i64,
}

impl PageQuery {
    /// Create a query for the given window with no filter.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit,
            offset,
            ..Self::default()
        }
    }

    /// Validate the window.
    ///
    /// `limit <= 0` and `offset < 0` are rejected; a limit above
    /// [`MAX_LIMIT`] is clamped.
    pub fn window(&self) -> AppResult<PageWindow> {
        if self.limit <= 0 {
            return Err(AppError::validation("limit must be greater than zero"));
        }
        if self.offset < 0 {
            return Err(AppError::validation("offset must not be negative"));
        }
        Ok(PageWindow {
            limit: self.limit.min(MAX_LIMIT),
            offset: self.offset,
        })
    }

    /// Build an `ILIKE` pattern matching `keywords` anywhere in a column.
    ///
    /// `%`, `_` and `\` in the keywords are escaped so they match literally.
    pub fn keyword_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.keywords.len() + 2);
        pattern.push('%');
        for c in self.keywords.trim().chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

/// Page metadata returned alongside the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Page size that was applied.
    pub per_page: i64,
    /// 1-based page number containing `offset`.
    pub page: i64,
    /// Total number of matching rows, ignoring the window.
    pub total: i64,
}

impl PageMeta {
    /// Derive metadata for a window and total count.
    pub fn new(window: PageWindow, total: i64) -> Self {
        Self {
            per_page: window.limit,
            page: (window.offset / window.limit).saturating_add(1),
            total,
        }
    }
}

/// One page of rows plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Rows in this window.
    pub list: Vec<T>,
    /// Window metadata.
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Create a page.
    pub fn new(list: Vec<T>, window: PageWindow, total: i64) -> Self {
        Self {
            list,
            meta: PageMeta::new(window, total),
        }
    }

    /// Convert every row, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            list: self.list.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_page_number_is_ceiling_of_offset_plus_one_over_limit() {
        let first = PageQuery::new(10, 0).window().unwrap();
        assert_eq!(PageMeta::new(first, 25).page, 1);

        let third = PageQuery::new(10, 20).window().unwrap();
        let meta = PageMeta::new(third, 25);
        assert_eq!(meta.page, 3);
        assert_eq!(meta.total, 25);
        assert_eq!(meta.per_page, 10);

        // Offsets that do not fall on a page boundary.
        let mid = PageQuery::new(10, 9).window().unwrap();
        assert_eq!(PageMeta::new(mid, 25).page, 1);
        let mid = PageQuery::new(10, 10).window().unwrap();
        assert_eq!(PageMeta::new(mid, 25).page, 2);
    }

    #[test]
    fn test_page_number_at_max_offset_saturates() {
        let window = PageQuery::new(1, i64::MAX).window().unwrap();
        let meta = PageMeta::new(window, 0);
        assert_eq!(meta.page, i64::MAX);
        assert_eq!(meta.per_page, 1);
    }

    #[test]
    fn test_non_positive_limit_is_rejected() {
        for limit in [0, -1, i64::MIN] {
            let err = PageQuery::new(limit, 0).window().unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
    }

    #[test]
    fn test_negative_offset_is_rejected() {
        let err = PageQuery::new(10, -5).window().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_limit_is_clamped() {
        let window = PageQuery::new(10_000, 0).window().unwrap();
        assert_eq!(window.limit, MAX_LIMIT);
    }

    #[test]
    fn test_defaults() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 50);
        assert_eq!(query.offset, 0);
        assert!(query.sort.is_none());
        assert_eq!(query.keyword_pattern(), "%%");
    }

    #[test]
    fn test_keyword_pattern_escapes_wildcards() {
        let query = PageQuery {
            keywords: "50%_off\\".to_string(),
            ..PageQuery::default()
        };
        assert_eq!(query.keyword_pattern(), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn test_map_keeps_meta() {
        let window = PageQuery::new(2, 2).window().unwrap();
        let page = Page::new(vec![1, 2], window, 5).map(|n| n * 10);
        assert_eq!(page.list, vec![10, 20]);
        assert_eq!(page.meta.page, 2);
        assert_eq!(page.meta.total, 5);
    }
}
