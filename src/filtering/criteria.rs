use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Comparison applied by a single [`SearchFieldCriteria`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchOperation {
    GreaterThan,
    LessThan,
    GreaterThanEqual,
    LessThanEqual,
    NotEqual,
    Equal,
    Match,
    Like,
    MatchStart,
    MatchEnd,
    In,
    NotIn,
}

impl SearchOperation {
    /// Whether the operation needs the field to have a total order.
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(
            self,
            Self::GreaterThan | Self::LessThan | Self::GreaterThanEqual | Self::LessThanEqual
        )
    }

    /// Whether the operation is a case-insensitive text pattern.
    #[must_use]
    pub const fn is_text_match(self) -> bool {
        matches!(
            self,
            Self::Match | Self::Like | Self::MatchStart | Self::MatchEnd
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GreaterThan => "GREATER_THAN",
            Self::LessThan => "LESS_THAN",
            Self::GreaterThanEqual => "GREATER_THAN_EQUAL",
            Self::LessThanEqual => "LESS_THAN_EQUAL",
            Self::NotEqual => "NOT_EQUAL",
            Self::Equal => "EQUAL",
            Self::Match => "MATCH",
            Self::Like => "LIKE",
            Self::MatchStart => "MATCH_START",
            Self::MatchEnd => "MATCH_END",
            Self::In => "IN",
            Self::NotIn => "NOT_IN",
        }
    }
}

impl fmt::Display for SearchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name any [`SearchOperation`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search operation '{0}'")]
pub struct UnknownOperation(pub String);

impl FromStr for SearchOperation {
    type Err = UnknownOperation;

    /// Accepts canonical names, short aliases and comparison symbols.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim().to_ascii_uppercase().as_str() {
            "GREATER_THAN" | "GT" | ">" => Self::GreaterThan,
            "LESS_THAN" | "LT" | "<" => Self::LessThan,
            "GREATER_THAN_EQUAL" | "GTE" | ">=" => Self::GreaterThanEqual,
            "LESS_THAN_EQUAL" | "LTE" | "<=" => Self::LessThanEqual,
            "NOT_EQUAL" | "NE" | "NEQ" | "!=" => Self::NotEqual,
            "EQUAL" | "EQ" | "=" => Self::Equal,
            "MATCH" => Self::Match,
            "LIKE" => Self::Like,
            "MATCH_START" | "STARTS" => Self::MatchStart,
            "MATCH_END" | "ENDS" => Self::MatchEnd,
            "IN" => Self::In,
            "NOT_IN" | "NIN" => Self::NotIn,
            _ => return Err(UnknownOperation(s.to_string())),
        };
        Ok(op)
    }
}

/// One `(key, value, operation)` triple. The value is always the string form of the operand;
/// it is coerced to the field's type when the criteria are compiled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchFieldCriteria {
    pub key: String,
    pub value: String,
    pub operation: SearchOperation,
}

impl SearchFieldCriteria {
    pub fn new(key: impl Into<String>, value: impl Into<String>, operation: SearchOperation) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            operation,
        }
    }
}

/// Ordered list of criteria, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria(Vec<SearchFieldCriteria>);

impl Criteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, criteria: SearchFieldCriteria) {
        self.0.push(criteria);
    }

    /// Builder form of [`Criteria::add`].
    #[must_use]
    pub fn and(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        operation: SearchOperation,
    ) -> Self {
        self.add(SearchFieldCriteria::new(key, value, operation));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[SearchFieldCriteria] {
        &self.0
    }
}

impl From<Vec<SearchFieldCriteria>> for Criteria {
    fn from(criteria: Vec<SearchFieldCriteria>) -> Self {
        Self(criteria)
    }
}

impl AsRef<[SearchFieldCriteria]> for Criteria {
    fn as_ref(&self) -> &[SearchFieldCriteria] {
        &self.0
    }
}

impl IntoIterator for Criteria {
    type Item = SearchFieldCriteria;
    type IntoIter = std::vec::IntoIter<SearchFieldCriteria>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
