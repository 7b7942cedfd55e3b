//! Query options and SELECT construction for log search

use super::schema::{SEARCH_COLUMNS, SELECT_COLUMNS, TABLE_NAME};
use crate::filter::StatusCodeFilter;

/// Query options for listing log records
#[derive(Debug, Clone, Default)]
pub struct HttpLogQuery {
    /// Maximum results
    pub limit: u32,
    /// Offset into the ordered result; `None` emits no OFFSET clause
    pub offset: Option<u32>,
    /// Status code range, ignored when it has no condition
    pub status_filter: Option<StatusCodeFilter>,
    /// Only failed exchanges; takes precedence over `status_filter`
    pub only_errors: bool,
    /// Case-sensitive substring matched against every text-bearing column
    pub search: Option<String>,
}

impl HttpLogQuery {
    /// Create a query returning at most `limit` rows
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    /// Set the offset
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the status code filter
    #[must_use]
    pub fn status(mut self, filter: StatusCodeFilter) -> Self {
        self.status_filter = Some(filter);
        self
    }

    /// Restrict to failed exchanges
    #[must_use]
    pub fn only_errors(mut self, only_errors: bool) -> Self {
        self.only_errors = only_errors;
        self
    }

    /// Set the search text
    ///
    /// Headers are matched against their stored JSON text, so a header
    /// containing `"` or `\` is only found by searching for the escaped
    /// form (`\"`, `\\`).
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    fn active_search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    fn active_status_filter(&self) -> Option<&StatusCodeFilter> {
        self.status_filter.as_ref().filter(|f| f.has_condition())
    }
}

/// A value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    /// Integer parameter
    Int(i64),
    /// Text parameter
    Text(String),
}

/// SQL text plus its positional parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectStatement {
    /// Statement with `?` placeholders
    pub sql: String,
    /// Parameters in placeholder order
    pub binds: Vec<BindValue>,
}

impl SelectStatement {
    /// Build the SELECT for a query
    ///
    /// The status condition (error-only first, else the range) comes before
    /// the search group; when both exist the search group is parenthesized
    /// and AND-ed on.
    #[must_use]
    pub fn build(query: &HttpLogQuery) -> Self {
        let mut binds = Vec::new();
        let mut condition = String::new();

        if query.only_errors {
            condition.push_str(
                "((error_message IS NOT NULL AND error_message <> '') \
                 OR (code >= 400 AND code <= 599))",
            );
        } else if let Some(filter) = query.active_status_filter() {
            let (min, max) = filter.bounds();
            condition.push_str("(code >= ? AND code <= ?)");
            binds.push(BindValue::Int(i64::from(min)));
            binds.push(BindValue::Int(i64::from(max)));
        }

        if let Some(text) = query.active_search() {
            let search = SEARCH_COLUMNS
                .iter()
                .map(|column| format!("instr({column}, ?) > 0"))
                .collect::<Vec<_>>()
                .join(" OR ");
            binds.extend(SEARCH_COLUMNS.iter().map(|_| BindValue::Text(text.to_string())));

            if condition.is_empty() {
                condition = search;
            } else {
                condition = format!("{condition} AND ({search})");
            }
        }

        let mut sql = format!("SELECT {SELECT_COLUMNS} FROM {TABLE_NAME}");
        if !condition.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&condition);
        }
        sql.push_str(" ORDER BY _id ASC LIMIT ?");
        binds.push(BindValue::Int(i64::from(query.limit)));

        if let Some(offset) = query.offset {
            sql.push_str(" OFFSET ?");
            binds.push(BindValue::Int(i64::from(offset)));
        }

        Self { sql, binds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn where_clause(stmt: &SelectStatement) -> Option<&str> {
        let start = stmt.sql.find(" WHERE ")? + " WHERE ".len();
        let end = stmt.sql.find(" ORDER BY ")?;
        Some(&stmt.sql[start..end])
    }

    #[test]
    fn test_no_conditions() {
        let stmt = SelectStatement::build(&HttpLogQuery::new(20));
        assert!(where_clause(&stmt).is_none());
        assert!(stmt.sql.ends_with("ORDER BY _id ASC LIMIT ?"));
        assert_eq!(stmt.binds, vec![BindValue::Int(20)]);
    }

    #[test]
    fn test_offset_clause() {
        let stmt = SelectStatement::build(&HttpLogQuery::new(3).offset(2));
        assert!(stmt.sql.ends_with("LIMIT ? OFFSET ?"));
        assert_eq!(stmt.binds, vec![BindValue::Int(3), BindValue::Int(2)]);
    }

    #[test]
    fn test_status_range_only() {
        let stmt = SelectStatement::build(&HttpLogQuery::new(10).status(StatusCodeFilter::success()));
        assert_eq!(where_clause(&stmt), Some("(code >= ? AND code <= ?)"));
        assert_eq!(
            stmt.binds,
            vec![BindValue::Int(200), BindValue::Int(299), BindValue::Int(10)]
        );
    }

    #[test]
    fn test_empty_filter_is_ignored() {
        let stmt =
            SelectStatement::build(&HttpLogQuery::new(10).status(StatusCodeFilter::default()));
        assert!(where_clause(&stmt).is_none());
    }

    #[test]
    fn test_only_errors_overrides_range() {
        let stmt = SelectStatement::build(
            &HttpLogQuery::new(10)
                .status(StatusCodeFilter::success())
                .only_errors(true),
        );
        let clause = where_clause(&stmt).unwrap();
        assert!(clause.contains("code >= 400 AND code <= 599"));
        assert!(!clause.contains('?'));
        assert_eq!(stmt.binds, vec![BindValue::Int(10)]);
    }

    #[test]
    fn test_search_only() {
        let stmt = SelectStatement::build(&HttpLogQuery::new(5).search("abc"));
        let clause = where_clause(&stmt).unwrap();
        assert!(clause.starts_with("instr(query_id, ?) > 0 OR "));
        assert!(clause.ends_with("instr(headers, ?) > 0"));
        assert_eq!(clause.matches(" OR ").count(), SEARCH_COLUMNS.len() - 1);
        assert_eq!(stmt.binds.len(), SEARCH_COLUMNS.len() + 1);
        assert_eq!(stmt.binds[0], BindValue::Text("abc".into()));
    }

    #[test]
    fn test_empty_search_is_ignored() {
        let stmt = SelectStatement::build(&HttpLogQuery::new(5).search(""));
        assert!(where_clause(&stmt).is_none());
    }

    #[test]
    fn test_status_and_search_combined() {
        let stmt = SelectStatement::build(
            &HttpLogQuery::new(5)
                .status(StatusCodeFilter::client_error())
                .search("x"),
        );
        let clause = where_clause(&stmt).unwrap();
        assert!(clause.starts_with("(code >= ? AND code <= ?) AND (instr(query_id, ?) > 0"));
        assert!(clause.ends_with(')'));
        assert_eq!(stmt.binds[0], BindValue::Int(400));
        assert_eq!(stmt.binds[1], BindValue::Int(499));
        assert_eq!(stmt.binds[2], BindValue::Text("x".into()));
    }

    #[test]
    fn test_search_text_is_never_inlined() {
        let stmt = SelectStatement::build(&HttpLogQuery::new(5).search("'; DROP TABLE x; --"));
        assert!(!stmt.sql.contains("DROP"));
    }
}
