//! Ordering for child listings.
//!
//! Sort fields come from a fixed allow-list and map to static column
//! names, so caller input never reaches the SQL text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    #[default]
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

/// Fields a child listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildSortField {
    /// Creation timestamp.
    #[default]
    CreatedAt,
    /// Last update timestamp.
    UpdatedAt,
    /// Display name.
    Name,
}

impl ChildSortField {
    /// Column name in the children union.
    pub fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Name => "name",
        }
    }

    /// ORDER BY expression in the children union.
    ///
    /// Names compare bytewise so every store orders `Zeta` before `alpha`.
    pub fn sort_expr(&self) -> &'static str {
        match self {
            Self::Name => "name COLLATE \"C\"",
            other => other.column(),
        }
    }
}

/// A parsed `<field>[ <asc|desc>]` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChildOrder {
    /// Field to sort by.
    pub field: ChildSortField,
    /// Sort direction.
    pub direction: SortDirection,
}

impl ChildOrder {
    /// Parse an optional order string, falling back to `created_at DESC`.
    pub fn parse_or_default(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(s) => s.parse(),
        }
    }
}

impl FromStr for ChildOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let field = match parts.next() {
            Some("created_at") => ChildSortField::CreatedAt,
            Some("updated_at") => ChildSortField::UpdatedAt,
            Some("name") => ChildSortField::Name,
            Some(other) => {
                return Err(AppError::invalid_argument(format!(
                    "Unsupported order field '{other}'"
                )));
            }
            None => return Err(AppError::invalid_argument("Empty order_by value")),
        };
        let direction = match parts.next() {
            None => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(other) => {
                return Err(AppError::invalid_argument(format!(
                    "Unsupported order direction '{other}'"
                )));
            }
        };
        if parts.next().is_some() {
            return Err(AppError::invalid_argument(format!(
                "Malformed order_by value '{s}'"
            )));
        }
        Ok(Self { field, direction })
    }
}

impl fmt::Display for ChildOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.column(), self.direction.as_sql())
    }
}
