use sqlx::{Postgres, QueryBuilder};

use super::PageWindow;

/// Relational realisation of the windowing algorithm.
///
/// Rows are ranked with `ROW_NUMBER() OVER (ORDER BY ..)` inside a sub-select
/// that already applies the keyword filter, so ranks are dense over matching
/// rows only. The count query applies the same filter with no window.
///
/// Every identifier here is a compile-time constant; only the keyword and
/// the bounds are bound as parameters.
#[derive(Debug, Clone, Copy)]
pub struct RankedWindow {
    pub table: &'static str,
    pub columns: &'static str,
    /// Columns OR-ed together in the keyword filter.
    pub search_columns: &'static [&'static str],
    /// Full `ORDER BY` body, including any tie-break column.
    pub order_by: &'static str,
}

impl RankedWindow {
    pub fn rows_query(&self, window: &PageWindow) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        builder.push(self.columns);
        builder.push(" FROM (SELECT ");
        builder.push(self.columns);
        builder.push(", ROW_NUMBER() OVER (ORDER BY ");
        builder.push(self.order_by);
        builder.push(") AS row_rank FROM ");
        builder.push(self.table);
        self.push_filter(&mut builder, window.keyword());
        builder.push(") AS ranked WHERE row_rank > ");
        builder.push_bind(clamp_i64(window.offset()));
        builder.push(" AND row_rank <= ");
        builder.push_bind(clamp_i64(window.upper_bound()));
        builder.push(" ORDER BY row_rank");
        builder
    }

    pub fn count_query(&self, window: &PageWindow) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ");
        builder.push(self.table);
        self.push_filter(&mut builder, window.keyword());
        builder
    }

    fn push_filter(&self, builder: &mut QueryBuilder<'static, Postgres>, keyword: &str) {
        if keyword.is_empty() || self.search_columns.is_empty() {
            return;
        }
        let pattern = like_pattern(keyword);
        builder.push(" WHERE (");
        for (index, column) in self.search_columns.iter().enumerate() {
            if index > 0 {
                builder.push(" OR ");
            }
            builder.push(*column);
            builder.push(" LIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" ESCAPE '\\'");
        }
        builder.push(")");
    }
}

/// `%keyword%` with LIKE metacharacters escaped, so the match is a literal
/// substring test.
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const USERS: RankedWindow = RankedWindow {
        table: "users",
        columns: "login_id, full_name",
        search_columns: &["full_name", "email"],
        order_by: "created_at ASC, login_id ASC",
    };

    #[test]
    fn rows_query_ranks_inside_filtered_subselect() {
        let builder = USERS.rows_query(&PageWindow::new(20, 10, "ali"));
        assert_eq!(
            builder.sql(),
            "SELECT login_id, full_name FROM (SELECT login_id, full_name, \
             ROW_NUMBER() OVER (ORDER BY created_at ASC, login_id ASC) AS row_rank \
             FROM users WHERE (full_name LIKE $1 ESCAPE '\\' OR email LIKE $2 ESCAPE '\\')) \
             AS ranked WHERE row_rank > $3 AND row_rank <= $4 ORDER BY row_rank"
        );
    }

    #[test]
    fn empty_keyword_drops_the_filter() {
        let window = PageWindow::new(0, 10, "");
        assert_eq!(USERS.count_query(&window).sql(), "SELECT COUNT(*) FROM users");
        assert!(!USERS.rows_query(&window).sql().contains("WHERE ("));
    }

    #[test]
    fn count_query_uses_the_same_filter() {
        let builder = USERS.count_query(&PageWindow::new(0, 10, "x"));
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM users WHERE (full_name LIKE $1 ESCAPE '\\' \
             OR email LIKE $2 ESCAPE '\\')"
        );
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
        assert_eq!(like_pattern("ops"), "%ops%");
    }
}
