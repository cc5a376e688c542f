use sea_orm::{
    ColumnTrait, Condition, Value,
    sea_query::{Expr, Func, SimpleExpr},
};

use super::criteria::{SearchFieldCriteria, SearchOperation};
use super::fields::{FieldKind, FieldTable, SearchField};
use crate::errors::CriteriaError;

/// Default separator between the elements of an `IN`/`NOT_IN` value.
pub const DEFAULT_IN_DELIMITER: char = ',';

/// Escape character for LIKE patterns. Not a backslash, whose quoting differs between backends.
const LIKE_ESCAPE: char = '!';

/// Escape LIKE wildcards so user input only ever matches literally.
/// The escape character itself is escaped first.
pub(crate) fn escape_like_wildcards(input: &str) -> String {
    input
        .replace(LIKE_ESCAPE, "!!")
        .replace('%', "!%")
        .replace('_', "!_")
}

/// Case-insensitive `UPPER(column) LIKE UPPER(pattern) ESCAPE '!'`.
///
/// Both sides are folded by the database so they always agree, whatever case mapping the
/// backend's `UPPER` implements.
fn text_match<C: ColumnTrait>(column: C, pattern: String) -> SimpleExpr {
    Expr::cust_with_exprs(
        format!("$1 LIKE $2 ESCAPE '{LIKE_ESCAPE}'"),
        [
            SimpleExpr::from(Func::upper(Expr::col((column.entity_name(), column)))),
            SimpleExpr::from(Func::upper(Expr::val(pattern))),
        ],
    )
}

/// Compiles search criteria into a single `AND` condition for one entity.
///
/// The field table is resolved once at construction and shared by every call, so a compiler
/// is cheap to keep around for the lifetime of a service.
#[derive(Debug, Clone)]
pub struct PredicateCompiler<C> {
    fields: FieldTable<C>,
    in_delimiter: char,
}

impl<C: ColumnTrait + Copy> PredicateCompiler<C> {
    #[must_use]
    pub fn new(fields: FieldTable<C>) -> Self {
        Self {
            fields,
            in_delimiter: DEFAULT_IN_DELIMITER,
        }
    }

    #[must_use]
    pub fn with_in_delimiter(mut self, delimiter: char) -> Self {
        self.in_delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn fields(&self) -> &FieldTable<C> {
        &self.fields
    }

    /// Conjunction of every criterion, in order. An empty slice yields the always-true
    /// condition.
    ///
    /// # Errors
    ///
    /// Returns the error of the first criterion that fails to compile. No partial condition
    /// is ever produced.
    pub fn compile(&self, criteria: &[SearchFieldCriteria]) -> Result<Condition, CriteriaError> {
        criteria.iter().try_fold(Condition::all(), |condition, criterion| {
            Ok(condition.add(self.compile_one(criterion)?))
        })
    }

    /// Expression for a single criterion.
    ///
    /// # Errors
    ///
    /// - [`CriteriaError::FieldResolution`] for a key outside the field table
    /// - [`CriteriaError::UnsupportedOperation`] for ordering on unordered kinds or text
    ///   matching on non-text kinds
    /// - [`CriteriaError::ValueCoercion`] for a literal the field's kind cannot parse
    pub fn compile_one(&self, criterion: &SearchFieldCriteria) -> Result<SimpleExpr, CriteriaError> {
        let field = self.fields.resolve(&criterion.key)?;
        let operation = criterion.operation;
        check_supported(field, operation)?;

        let column = field.column;
        let raw = criterion.value.as_str();
        let expr = match operation {
            SearchOperation::Equal => ColumnTrait::eq(&column, coerce(field, raw)?),
            SearchOperation::NotEqual => column.ne(coerce(field, raw)?),
            SearchOperation::GreaterThan => column.gt(coerce(field, raw)?),
            SearchOperation::GreaterThanEqual => column.gte(coerce(field, raw)?),
            SearchOperation::LessThan => column.lt(coerce(field, raw)?),
            SearchOperation::LessThanEqual => column.lte(coerce(field, raw)?),
            SearchOperation::Match | SearchOperation::Like => {
                text_match(column, format!("%{}%", escape_like_wildcards(raw)))
            }
            SearchOperation::MatchStart => {
                text_match(column, format!("{}%", escape_like_wildcards(raw)))
            }
            SearchOperation::MatchEnd => {
                text_match(column, format!("%{}", escape_like_wildcards(raw)))
            }
            SearchOperation::In => column.is_in(self.coerce_set(field, raw)?),
            SearchOperation::NotIn => column.is_not_in(self.coerce_set(field, raw)?),
        };
        Ok(expr)
    }

    /// Elements are trimmed and blank elements skipped.
    fn coerce_set(&self, field: &SearchField<C>, raw: &str) -> Result<Vec<Value>, CriteriaError> {
        raw.split(self.in_delimiter)
            .map(str::trim)
            .filter(|element| !element.is_empty())
            .map(|element| coerce(field, element))
            .collect()
    }
}

fn check_supported<C>(field: &SearchField<C>, operation: SearchOperation) -> Result<(), CriteriaError> {
    let supported = if operation.is_ordering() {
        field.kind.is_ordered()
    } else if operation.is_text_match() {
        field.kind == FieldKind::Text
    } else {
        true
    };

    if supported {
        Ok(())
    } else {
        Err(CriteriaError::UnsupportedOperation {
            key: field.key.to_string(),
            operation,
            kind: field.kind,
        })
    }
}

fn coerce<C>(field: &SearchField<C>, raw: &str) -> Result<Value, CriteriaError> {
    field
        .kind
        .coerce(raw)
        .ok_or_else(|| CriteriaError::ValueCoercion {
            key: field.key.to_string(),
            value: raw.to_string(),
            kind: field.kind,
        })
}
