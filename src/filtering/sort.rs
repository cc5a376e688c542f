use sea_orm::{ColumnTrait, sea_query::Order};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::fields::FieldTable;
use crate::errors::CriteriaError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case is descending, anything else ascending.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// One sort key, addressed by its search-field key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SortOrder {
    pub key: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Parse `name:desc,age` style sort parameters. Blank segments are ignored.
#[must_use]
pub fn parse_sort(raw: &str) -> Vec<SortOrder> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once(':') {
            Some((key, direction)) => SortOrder {
                key: key.trim().to_string(),
                direction: SortDirection::parse(direction),
            },
            None => SortOrder::asc(segment),
        })
        .collect()
}

/// Resolve sort keys to columns. No keys means ascending by `default_column`.
///
/// # Errors
///
/// Returns [`CriteriaError::FieldResolution`] for a key the field table does not know.
pub fn resolve_order<C>(
    fields: &FieldTable<C>,
    sort: &[SortOrder],
    default_column: C,
) -> Result<Vec<(C, Order)>, CriteriaError>
where
    C: ColumnTrait + Copy,
{
    if sort.is_empty() {
        return Ok(vec![(default_column, Order::Asc)]);
    }
    sort.iter()
        .map(|order| {
            fields
                .resolve(&order.key)
                .map(|field| (field.column, order.direction.into()))
        })
        .collect()
}
