//! Offset-windowed listings over a ranked, keyword-filtered row set.
//!
//! Rows matching the filter are ranked 1..=n under the order key, ties keeping
//! storage order. A window `(offset, size)` selects ranks in
//! `(offset, offset + size]`; `total` is always the full match count.

#[cfg(feature = "database")]
pub mod sql;

use std::cmp::Ordering;

use gusen_model::{Page, PageRequest};

/// Engine-level window. Built from a normalized [`PageRequest`], so `size`
/// is never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    offset: u64,
    size: u64,
    keyword: String,
}

impl PageWindow {
    /// `size` is clamped to at least one.
    pub fn new(offset: u64, size: u64, keyword: impl Into<String>) -> Self {
        Self {
            offset,
            size: size.max(1),
            keyword: keyword.into(),
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Highest rank inside the window.
    pub fn upper_bound(&self) -> u64 {
        self.offset.saturating_add(self.size)
    }

    pub fn contains_rank(&self, rank: u64) -> bool {
        rank > self.offset && rank <= self.upper_bound()
    }
}

impl From<&PageRequest> for PageWindow {
    fn from(request: &PageRequest) -> Self {
        Self::new(request.offset(), request.size(), request.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

impl<T> Listing<T> {
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
        }
    }

    pub fn into_page(self, request: &PageRequest) -> Page<T> {
        Page {
            items: self.rows,
            page: request.page(),
            size: request.size(),
            total: self.total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Case-sensitive substring match; an empty keyword matches everything.
pub fn matches_keyword(haystack: &str, keyword: &str) -> bool {
    keyword.is_empty() || haystack.contains(keyword)
}

/// In-process realisation of the windowing algorithm over rows held in
/// storage order.
pub fn window<T, K, F, O>(
    rows: &[T],
    filter: F,
    order_key: O,
    direction: SortDirection,
    window: &PageWindow,
) -> Listing<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> bool,
    O: Fn(&T) -> K,
{
    let mut matching: Vec<&T> = rows.iter().filter(|row| filter(row)).collect();
    let total = matching.len() as u64;

    // `sort_by` is stable, so equal keys keep storage order.
    matching.sort_by(|a, b| direction.apply(order_key(a).cmp(&order_key(b))));

    let rows = matching
        .into_iter()
        .zip(1u64..)
        .filter(|(_, rank)| window.contains_rank(*rank))
        .map(|(row, _)| row.clone())
        .collect();

    Listing { rows, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        name: String,
        created: u32,
    }

    fn rows(n: u32) -> Vec<Row> {
        (0..n)
            .map(|i| Row {
                name: format!("user-{i:02}"),
                created: i,
            })
            .collect()
    }

    fn list(data: &[Row], offset: u64, size: u64, keyword: &str) -> Listing<Row> {
        let page = PageWindow::new(offset, size, keyword);
        window(
            data,
            |row| matches_keyword(&row.name, page.keyword()),
            |row| row.created,
            SortDirection::Ascending,
            &page,
        )
    }

    #[test]
    fn windows_over_twenty_five_rows() {
        let data = rows(25);

        let first = list(&data, 0, 10, "");
        assert_eq!(first.rows.len(), 10);
        assert_eq!(first.total, 25);
        assert_eq!(first.rows[0].created, 0);

        let last = list(&data, 20, 10, "");
        assert_eq!(last.rows.len(), 5);
        assert_eq!(last.total, 25);
        assert_eq!(last.rows[4].created, 24);

        let beyond = list(&data, 30, 10, "");
        assert!(beyond.rows.is_empty());
        assert_eq!(beyond.total, 25);
    }

    #[test]
    fn rank_follows_order_key_not_storage_order() {
        let mut data = rows(5);
        data.reverse();
        let listing = list(&data, 0, 3, "");
        let created: Vec<u32> = listing.rows.iter().map(|r| r.created).collect();
        assert_eq!(created, vec![0, 1, 2]);
    }

    #[test]
    fn ties_keep_storage_order_in_both_directions() {
        let data = vec![
            Row { name: "b".into(), created: 1 },
            Row { name: "a".into(), created: 1 },
            Row { name: "c".into(), created: 0 },
        ];
        let page = PageWindow::new(0, 10, "");
        let asc = window(&data, |_| true, |r| r.created, SortDirection::Ascending, &page);
        let names: Vec<&str> = asc.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);

        let desc = window(&data, |_| true, |r| r.created, SortDirection::Descending, &page);
        let names: Vec<&str> = desc.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn total_counts_filtered_rows_only() {
        let data = rows(25);
        let listing = list(&data, 0, 3, "user-1");
        assert_eq!(listing.total, 10);
        assert_eq!(listing.rows.len(), 3);
        assert!(listing.rows.iter().all(|r| r.name.starts_with("user-1")));
    }

    #[test]
    fn keyword_match_is_case_sensitive_substring() {
        assert!(matches_keyword("Alice Admin", "ce Ad"));
        assert!(matches_keyword("anything", ""));
        assert!(!matches_keyword("Alice", "alice"));
    }

    #[test]
    fn window_bounds_saturate() {
        let page = PageWindow::new(u64::MAX - 1, 10, "");
        assert_eq!(page.upper_bound(), u64::MAX);
        assert!(page.contains_rank(u64::MAX));
        assert_eq!(PageWindow::new(0, 0, "").size(), 1);
    }
}
