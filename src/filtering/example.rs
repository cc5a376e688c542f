use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, Condition, EntityTrait, Value};

use super::conditions::PredicateCompiler;
use super::criteria::{Criteria, SearchOperation};
use crate::errors::CriteriaError;

/// Turns a partially populated probe into criteria and compiles them.
///
/// Only fields listed in the compiler's field table take part. A field participates when the
/// probe holds a non-null value for it (`Set` or `Unchanged`); `NotSet` and SQL `NULL` are
/// skipped. Text fields become [`SearchOperation::Match`], every other kind
/// [`SearchOperation::Equal`]. An empty probe therefore compiles to the always-true condition.
pub struct ExampleMatcher<'a, C> {
    compiler: &'a PredicateCompiler<C>,
}

impl<'a, C: ColumnTrait + Copy> ExampleMatcher<'a, C> {
    #[must_use]
    pub fn new(compiler: &'a PredicateCompiler<C>) -> Self {
        Self { compiler }
    }

    /// Criteria implied by `probe`, in field-table order.
    pub fn criteria<A>(&self, probe: &A) -> Criteria
    where
        A: ActiveModelTrait,
        <A as ActiveModelTrait>::Entity: EntityTrait<Column = C>,
    {
        let mut criteria = Criteria::new();
        for field in self.compiler.fields().iter() {
            let value = match probe.get(field.column) {
                ActiveValue::Set(value) | ActiveValue::Unchanged(value) => value,
                ActiveValue::NotSet => continue,
            };
            let Some(literal) = render_value(&value) else {
                continue;
            };
            let operation = if field.kind.is_text() {
                SearchOperation::Match
            } else {
                SearchOperation::Equal
            };
            criteria = criteria.and(field.key, literal, operation);
        }
        criteria
    }

    /// # Errors
    ///
    /// Propagates the compiler's error for a probe value its field cannot accept.
    pub fn compile<A>(&self, probe: &A) -> Result<Condition, CriteriaError>
    where
        A: ActiveModelTrait,
        <A as ActiveModelTrait>::Entity: EntityTrait<Column = C>,
    {
        let criteria = self.criteria(probe);
        self.compiler.compile(criteria.as_slice())
    }
}

/// Literal form of a probe value, as the compiler expects it. `None` for nulls and for value
/// types no field kind can hold.
fn render_value(value: &Value) -> Option<String> {
    let literal = match value {
        Value::Bool(Some(v)) => v.to_string(),
        Value::TinyInt(Some(v)) => v.to_string(),
        Value::SmallInt(Some(v)) => v.to_string(),
        Value::Int(Some(v)) => v.to_string(),
        Value::BigInt(Some(v)) => v.to_string(),
        Value::TinyUnsigned(Some(v)) => v.to_string(),
        Value::SmallUnsigned(Some(v)) => v.to_string(),
        Value::Unsigned(Some(v)) => v.to_string(),
        Value::BigUnsigned(Some(v)) => v.to_string(),
        Value::Float(Some(v)) => v.to_string(),
        Value::Double(Some(v)) => v.to_string(),
        Value::String(Some(v)) => v.to_string(),
        Value::Char(Some(v)) => v.to_string(),
        Value::Uuid(Some(v)) => v.to_string(),
        Value::ChronoDate(Some(v)) => v.format("%Y-%m-%d").to_string(),
        Value::ChronoDateTime(Some(v)) => v.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        Value::ChronoDateTimeUtc(Some(v)) => v.to_rfc3339(),
        Value::ChronoDateTimeLocal(Some(v)) => v.to_rfc3339(),
        Value::ChronoDateTimeWithTimeZone(Some(v)) => v.to_rfc3339(),
        other => {
            tracing::debug!(value = ?other, "Skipping probe value");
            return None;
        }
    };
    Some(literal)
}
