use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Listing query exactly as the client sent it.
///
/// Values stay as strings so that unparsable input degrades to the defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
}

impl PageQuery {
    pub fn normalize(&self) -> PageRequest {
        let parse = |raw: &Option<String>| {
            raw.as_deref().and_then(|value| value.trim().parse::<i64>().ok())
        };
        PageRequest::new(
            parse(&self.page).unwrap_or(0),
            parse(&self.size).unwrap_or(0),
            self.keyword.clone().unwrap_or_default(),
        )
    }
}

/// A normalized listing request: `page >= 1`, `size >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u64,
    size: u64,
    keyword: String,
}

impl PageRequest {
    /// Builds a request from untrusted numbers. `page < 1` becomes
    /// [`DEFAULT_PAGE`] and `size < 1` becomes [`DEFAULT_PAGE_SIZE`].
    pub fn new(page: i64, size: i64, keyword: impl Into<String>) -> Self {
        let page = u64::try_from(page)
            .ok()
            .filter(|page| *page >= 1)
            .unwrap_or(DEFAULT_PAGE);
        let size = u64::try_from(size)
            .ok()
            .filter(|size| *size >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self {
            page,
            size,
            keyword: keyword.into(),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Zero-based offset of the first row on this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE as i64, DEFAULT_PAGE_SIZE as i64, "")
    }
}

/// One page of a listing plus the unwindowed match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_values_fall_back_to_defaults() {
        for (page, size) in [(0, 0), (-4, -1), (0, 25), (3, 0)] {
            let request = PageRequest::new(page, size, "");
            assert!(request.page() >= 1);
            assert!(request.size() >= 1);
        }
        let request = PageRequest::new(-1, 0, "");
        assert_eq!((request.page(), request.size()), (1, 10));
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 10, "").offset(), 0);
        assert_eq!(PageRequest::new(3, 10, "").offset(), 20);
        assert_eq!(PageRequest::new(i64::MAX, i64::MAX, "").offset(), u64::MAX);
    }

    #[test]
    fn garbage_query_values_are_treated_as_missing() {
        let query = PageQuery {
            page: Some("two".into()),
            size: Some("".into()),
            keyword: Some("ali".into()),
        };
        let request = query.normalize();
        assert_eq!((request.page(), request.size()), (1, 10));
        assert_eq!(request.keyword(), "ali");

        let request = PageQuery {
            page: Some("2".into()),
            size: Some(" 5 ".into()),
            keyword: None,
        }
        .normalize();
        assert_eq!((request.page(), request.size()), (2, 5));
        assert_eq!(request.keyword(), "");
    }
}
