//! Sorting types for list endpoints.
//!
//! A raw `sort` parameter is only ever turned into SQL after it has been
//! matched against a per-entity column whitelist.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A validated sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortField {
    /// Whitelisted column name.
    pub field: &'static str,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortField {
    /// Create an ascending sort on the given column.
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    /// Create a descending sort on the given column.
    pub const fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// Parse `"<column> [asc|desc]"` against `allowed` columns.
    ///
    /// A missing or blank expression yields `default`. Matching is
    /// case-insensitive. Anything else is a validation error.
    pub fn parse(
        raw: Option<&str>,
        allowed: &[&'static str],
        default: SortField,
    ) -> AppResult<Self> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(default);
        };

        let mut parts = raw.split_whitespace();
        let column = parts.next().unwrap_or_default();
        let direction = match parts.next() {
            None => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(d) => {
                return Err(AppError::validation(format!("Invalid sort direction '{d}'")));
            }
        };
        if parts.next().is_some() {
            return Err(AppError::validation(format!("Invalid sort expression '{raw}'")));
        }

        let field = allowed
            .iter()
            .copied()
            .find(|c| c.eq_ignore_ascii_case(column))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Cannot sort by '{column}'. Expected one of: {}",
                    allowed.join(", ")
                ))
            })?;

        Ok(Self { field, direction })
    }

    /// Render as an `ORDER BY` item, optionally qualified by a table alias.
    pub fn to_sql(&self, alias: Option<&str>) -> String {
        match alias {
            Some(alias) => format!("{alias}.{} {}", self.field, self.direction.as_sql()),
            None => format!("{} {}", self.field, self.direction.as_sql()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const COLUMNS: &[&str] = &["name", "created_at"];
    const DEFAULT: SortField = SortField::asc("name");

    #[test]
    fn test_empty_sort_uses_default() {
        assert_eq!(SortField::parse(None, COLUMNS, DEFAULT).unwrap(), DEFAULT);
        assert_eq!(SortField::parse(Some("  "), COLUMNS, DEFAULT).unwrap(), DEFAULT);
    }

    #[test]
    fn test_parses_column_and_direction() {
        let sort = SortField::parse(Some("created_at DESC"), COLUMNS, DEFAULT).unwrap();
        assert_eq!(sort, SortField::desc("created_at"));
        assert_eq!(sort.to_sql(Some("u")), "u.created_at DESC");

        let sort = SortField::parse(Some("NAME"), COLUMNS, DEFAULT).unwrap();
        assert_eq!(sort.to_sql(None), "name ASC");
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let err = SortField::parse(Some("password asc"), COLUMNS, DEFAULT).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_injection_attempt_is_rejected() {
        for raw in [
            "name; DROP TABLE users",
            "name asc, (SELECT 1)",
            "name sideways",
            "name asc extra",
        ] {
            let err = SortField::parse(Some(raw), COLUMNS, DEFAULT).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "{raw}");
        }
    }
}
