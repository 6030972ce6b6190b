//! Sorting types for item listings.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
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

/// Sortable item fields exposed by the listing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Sort by display name.
    #[default]
    Name,
    /// Sort by last modification timestamp.
    DateModified,
    /// Sort by byte size (folders count as zero).
    Size,
    /// Sort by item type.
    Type,
}

impl SortKey {
    /// Return the items-table ORDER BY expression for this key.
    ///
    /// The expressions are fixed strings so callers can interpolate them
    /// into queries without any injection surface. Folder sizes are NULL
    /// in the table and must sort as zero.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Name => "name COLLATE NOCASE",
            Self::DateModified => "date_modified",
            Self::Size => "COALESCE(size, 0)",
            Self::Type => "item_type",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_wire_names() {
        assert_eq!(
            serde_json::from_str::<SortKey>("\"dateModified\"").unwrap(),
            SortKey::DateModified
        );
        assert_eq!(
            serde_json::from_str::<SortDirection>("\"desc\"").unwrap(),
            SortDirection::Desc
        );
    }

    #[test]
    fn sql_fragments() {
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
        assert_eq!(SortKey::Size.as_sql(), "COALESCE(size, 0)");
    }
}
