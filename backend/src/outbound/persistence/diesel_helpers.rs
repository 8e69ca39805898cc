//! Shared helpers for Diesel repository implementations.
//!
//! - classification of Diesel errors into connection/query failures
//! - detection of unique and foreign-key violations
//! - integer conversions between PostgreSQL columns and domain types
//! - `LIKE` pattern escaping

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::PageRequest;

use super::pool::PoolError;

/// Map a pool failure into a repository-specific connection error.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.message().to_owned())
}

/// Map Diesel errors into query/connection constructors.
///
/// Callers that care about constraint violations should inspect the error
/// with [`constraint_violation`] first.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Constraint violation reported by PostgreSQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Violation {
    Unique { constraint: Option<String> },
    ForeignKey { constraint: Option<String> },
}

impl Violation {
    /// Whether the violated constraint name contains `fragment`.
    pub(crate) fn mentions(&self, fragment: &str) -> bool {
        let (Self::Unique { constraint } | Self::ForeignKey { constraint }) = self;
        constraint
            .as_deref()
            .is_some_and(|name| name.contains(fragment))
    }
}

/// Inspect `error` for a unique or foreign-key violation.
pub(crate) fn constraint_violation(error: &DieselError) -> Option<Violation> {
    let DieselError::DatabaseError(kind, info) = error else {
        return None;
    };
    let constraint = info.constraint_name().map(str::to_owned);
    match kind {
        DatabaseErrorKind::UniqueViolation => Some(Violation::Unique { constraint }),
        DatabaseErrorKind::ForeignKeyViolation => Some(Violation::ForeignKey { constraint }),
        _ => None,
    }
}

/// Convert a non-negative `int4` column into a domain `u32`.
pub(crate) fn column_to_u32(value: i32, column: &'static str) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("column {column} holds negative value {value}"))
}

/// Convert a domain `u32` into an `int4` parameter.
pub(crate) fn u32_to_column(value: u32, column: &'static str) -> Result<i32, String> {
    i32::try_from(value).map_err(|_| format!("value {value} overflows column {column}"))
}

/// Convert a `COUNT(*)` result into a total.
pub(crate) fn count_to_total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

/// `(LIMIT, OFFSET)` parameters for a page request.
pub(crate) fn limit_offset(page: PageRequest) -> (i64, i64) {
    (i64::from(page.limit()), i64::from(page.offset()))
}

/// Build a `LIKE` pattern matching any value that contains `needle`.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Build a constraint violation as PostgreSQL would report it.
#[cfg(test)]
pub(crate) fn violation(kind: DatabaseErrorKind, constraint: &'static str) -> DieselError {
    #[derive(Debug)]
    struct ConstraintInfo(&'static str);

    impl diesel::result::DatabaseErrorInformation for ConstraintInfo {
        fn message(&self) -> &str {
            "constraint violated"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some(self.0)
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    DieselError::DatabaseError(kind, Box::new(ConstraintInfo(constraint)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("egg", "%egg%")]
    #[case::percent("50%", "%50\\%%")]
    #[case::underscore("a_b", "%a\\_b%")]
    #[case::backslash("a\\b", "%a\\\\b%")]
    fn contains_pattern_escapes_wildcards(#[case] needle: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(needle), expected);
    }

    #[rstest]
    fn negative_column_values_are_rejected() {
        assert_eq!(column_to_u32(7, "amount"), Ok(7));
        assert!(column_to_u32(-1, "amount").is_err());
    }

    #[rstest]
    fn oversized_values_do_not_wrap() {
        assert_eq!(u32_to_column(32_000, "amount"), Ok(32_000));
        assert!(u32_to_column(u32::MAX, "amount").is_err());
    }

    #[rstest]
    fn page_request_maps_to_limit_and_offset() {
        let (limit, offset) = limit_offset(PageRequest::new(Some(6), Some(12)));
        assert_eq!((limit, offset), (6, 12));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let mapped: String = map_basic_diesel_error(
            DieselError::NotFound,
            |m| format!("query:{m}"),
            |m| format!("connection:{m}"),
        );
        assert_eq!(mapped, "query:record not found");
        assert!(constraint_violation(&DieselError::NotFound).is_none());
    }

    #[rstest]
    fn violations_keep_their_constraint_name() {
        let error = violation(DatabaseErrorKind::ForeignKeyViolation, "favorites_recipe_id_fkey");
        let found = constraint_violation(&error).expect("violation");
        assert!(found.mentions("recipe_id"));
        assert!(!found.mentions("user_id"));

        let check = violation(DatabaseErrorKind::CheckViolation, "follows_not_self");
        assert!(constraint_violation(&check).is_none());
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let mapped: String = map_basic_pool_error(PoolError::checkout("timed out"), |m| m);
        assert_eq!(mapped, "timed out");
    }
}
