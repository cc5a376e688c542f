use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sea_orm::{ColumnTrait, Value};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use crate::errors::CriteriaError;

/// Storage type of a searchable field, used to coerce string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Boolean,
    Uuid,
    /// `YYYY-MM-DD`
    Date,
    /// Naive timestamp column. Accepts `YYYY-MM-DDTHH:MM:SS[.f]` (a space may replace the `T`)
    /// or RFC 3339, which is converted to UTC first.
    DateTime,
    /// UTC timestamp column. RFC 3339, normalised to UTC.
    DateTimeUtc,
}

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

fn parse_naive_date_time(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

impl FieldKind {
    /// Whether ordered comparisons make sense for this kind.
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        !matches!(self, Self::Boolean | Self::Uuid)
    }

    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }

    /// Parse `raw` into a bindable value of this kind.
    #[must_use]
    pub fn coerce(self, raw: &str) -> Option<Value> {
        match self {
            Self::Text => Some(raw.to_string().into()),
            Self::Integer => raw.trim().parse::<i64>().ok().map(Value::from),
            Self::Float => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Value::from),
            Self::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true.into()),
                "false" => Some(false.into()),
                _ => None,
            },
            Self::Uuid => Uuid::parse_str(raw.trim()).ok().map(Value::from),
            Self::Date => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .ok()
                .map(Value::from),
            Self::DateTime => parse_naive_date_time(raw.trim()).map(Value::from),
            Self::DateTimeUtc => DateTime::parse_from_rfc3339(raw.trim())
                .ok()
                .map(|dt| Value::from(dt.with_timezone(&Utc))),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Uuid => "uuid",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::DateTimeUtc => "date-time-utc",
        };
        f.write_str(name)
    }
}

/// A field that may appear in search criteria, probes and sort keys.
#[derive(Debug, Clone, Copy)]
pub struct SearchField<C> {
    pub key: &'static str,
    pub column: C,
    pub kind: FieldKind,
}

impl<C> SearchField<C> {
    pub const fn new(key: &'static str, column: C, kind: FieldKind) -> Self {
        Self { key, column, kind }
    }

    pub const fn text(key: &'static str, column: C) -> Self {
        Self::new(key, column, FieldKind::Text)
    }

    pub const fn integer(key: &'static str, column: C) -> Self {
        Self::new(key, column, FieldKind::Integer)
    }

    pub const fn float(key: &'static str, column: C) -> Self {
        Self::new(key, column, FieldKind::Float)
    }

    pub const fn boolean(key: &'static str, column: C) -> Self {
        Self::new(key, column, FieldKind::Boolean)
    }

    pub const fn uuid(key: &'static str, column: C) -> Self {
        Self::new(key, column, FieldKind::Uuid)
    }

    pub const fn date(key: &'static str, column: C) -> Self {
        Self::new(key, column, FieldKind::Date)
    }

    pub const fn date_time(key: &'static str, column: C) -> Self {
        Self::new(key, column, FieldKind::DateTime)
    }

    pub const fn date_time_utc(key: &'static str, column: C) -> Self {
        Self::new(key, column, FieldKind::DateTimeUtc)
    }
}

/// Lookup from field key to typed column for one entity.
///
/// Built once per entity type from [`CrudEntity::search_fields`](crate::CrudEntity::search_fields);
/// every key the compiler accepts is listed here, so an unknown key is always a
/// [`CriteriaError::FieldResolution`].
#[derive(Debug, Clone)]
pub struct FieldTable<C> {
    fields: Vec<SearchField<C>>,
    index: HashMap<&'static str, usize>,
}

impl<C: ColumnTrait + Copy> FieldTable<C> {
    /// Later duplicates of a key replace earlier ones.
    #[must_use]
    pub fn new(fields: Vec<SearchField<C>>) -> Self {
        let mut deduped: Vec<SearchField<C>> = Vec::with_capacity(fields.len());
        let mut index = HashMap::with_capacity(fields.len());
        for field in fields {
            if let Some(&position) = index.get(field.key) {
                deduped[position] = field;
            } else {
                index.insert(field.key, deduped.len());
                deduped.push(field);
            }
        }
        Self {
            fields: deduped,
            index,
        }
    }

    /// # Errors
    ///
    /// Returns [`CriteriaError::FieldResolution`] when `key` is not in the table.
    pub fn resolve(&self, key: &str) -> Result<&SearchField<C>, CriteriaError> {
        self.index
            .get(key)
            .map(|&position| &self.fields[position])
            .ok_or_else(|| CriteriaError::FieldResolution {
                key: key.to_string(),
            })
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &SearchField<C>> {
        self.fields.iter()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.key).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_coercion() {
        assert_eq!(FieldKind::Integer.coerce(" 42 "), Some(Value::from(42_i64)));
        assert_eq!(FieldKind::Integer.coerce("4.2"), None);
        assert_eq!(FieldKind::Integer.coerce("abc"), None);
    }

    #[test]
    fn test_float_coercion_rejects_non_finite() {
        assert_eq!(FieldKind::Float.coerce("2.5"), Some(Value::from(2.5_f64)));
        assert_eq!(FieldKind::Float.coerce("NaN"), None);
        assert_eq!(FieldKind::Float.coerce("inf"), None);
    }

    #[test]
    fn test_boolean_coercion_is_case_insensitive() {
        assert_eq!(FieldKind::Boolean.coerce("TRUE"), Some(Value::from(true)));
        assert_eq!(FieldKind::Boolean.coerce("false"), Some(Value::from(false)));
        assert_eq!(FieldKind::Boolean.coerce("yes"), None);
    }

    #[test]
    fn test_uuid_and_date_coercion() {
        let id = "550e8400-e29b-41d4-a716-446655440000";
        assert_eq!(
            FieldKind::Uuid.coerce(id),
            Some(Value::from(Uuid::parse_str(id).unwrap()))
        );
        assert_eq!(FieldKind::Uuid.coerce("not-a-uuid"), None);

        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(FieldKind::Date.coerce("2024-02-29"), Some(Value::from(date)));
        assert_eq!(FieldKind::Date.coerce("2023-02-29"), None);
        assert_eq!(FieldKind::DateTime.coerce("2024-01-01"), None);
        assert_eq!(FieldKind::DateTimeUtc.coerce("2024-01-01T10:00:00"), None);
    }

    #[test]
    fn test_date_time_kinds_bind_their_column_types() {
        let naive = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        for raw in [
            "2024-01-01T10:00:00",
            "2024-01-01 10:00:00",
            "2024-01-01T10:00:00Z",
            "2024-01-01T12:00:00+02:00",
        ] {
            assert_eq!(FieldKind::DateTime.coerce(raw), Some(Value::from(naive)), "{raw}");
        }

        assert_eq!(
            FieldKind::DateTimeUtc.coerce("2024-01-01T12:00:00+02:00"),
            Some(Value::from(naive.and_utc()))
        );
    }

    #[test]
    fn test_text_is_taken_verbatim() {
        assert_eq!(
            FieldKind::Text.coerce("  spaced "),
            Some(Value::from("  spaced ".to_string()))
        );
    }

    #[test]
    fn test_ordering_support() {
        assert!(FieldKind::Integer.is_ordered());
        assert!(FieldKind::Date.is_ordered());
        assert!(FieldKind::Text.is_ordered());
        assert!(!FieldKind::Boolean.is_ordered());
        assert!(!FieldKind::Uuid.is_ordered());
    }
}
