//! Validation Support
//!
//! DTOs implement [`Validatable`] to declare field constraints. The orchestrator validates the
//! incoming DTO before `post` (with [`ValidationGroup::Post`]) and `put` (with
//! [`ValidationGroup::Put`]); any violation aborts the operation before the database is touched.
//!
//! Violations carry a message *code* and positional arguments rather than text. The HTTP layer
//! resolves them through a [`MessageSource`](crate::messages::MessageSource).
//!
//! # Example
//!
//! ```rust,ignore
//! use crudbase::validation::{Validatable, ValidationErrors, ValidationGroup, validators};
//!
//! impl Validatable for CustomerDto {
//!     fn validate(&self, _group: ValidationGroup) -> Result<(), ValidationErrors> {
//!         let mut errors = ValidationErrors::new();
//!         errors.check(validators::not_empty("name", self.name.as_deref().unwrap_or_default()));
//!         errors.check(validators::max_chars("name", self.name.as_deref().unwrap_or_default(), 64));
//!         errors.result()
//!     }
//! }
//! ```

use serde::Serialize;
use std::fmt;

use crate::messages::codes;

/// Which operation the DTO is being validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationGroup {
    Post,
    Put,
}

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Field path, e.g. `name`
    pub path: String,
    /// Message catalog code
    pub code: String,
    /// Positional message arguments
    pub args: Vec<String>,
}

impl ValidationError {
    #[must_use]
    pub fn new(path: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code: code.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    #[must_use]
    pub fn not_empty(path: impl Into<String>) -> Self {
        Self::new(path, codes::FIELD_NOT_EMPTY)
    }

    #[must_use]
    pub fn max_chars(path: impl Into<String>, max: usize) -> Self {
        Self::new(path, codes::FIELD_MAX_CHARS).with_args(vec![max.to_string()])
    }

    #[must_use]
    pub fn min_max_value(path: impl Into<String>, min: impl fmt::Display, max: impl fmt::Display) -> Self {
        Self::new(path, codes::FIELD_MIN_MAX_VALUE).with_args(vec![min.to_string(), max.to_string()])
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.code)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Record the error of a single validator, if any.
    pub fn check(&mut self, outcome: Result<(), ValidationError>) {
        if let Err(error) = outcome {
            self.add(error);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// # Errors
    ///
    /// Returns `self` when at least one error was recorded.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Implemented by DTOs accepted by `post` and `put`.
///
/// The default accepts everything.
pub trait Validatable {
    /// # Errors
    ///
    /// Returns every violated constraint.
    fn validate(&self, group: ValidationGroup) -> Result<(), ValidationErrors> {
        let _ = group;
        Ok(())
    }
}

/// Helper validators for common constraints.
pub mod validators {
    use super::ValidationError;
    use std::fmt;

    /// Fails when the trimmed value is empty.
    pub fn not_empty(field: &str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::not_empty(field));
        }
        Ok(())
    }

    /// Counts characters, not bytes.
    pub fn max_chars(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
        if value.chars().count() > max {
            return Err(ValidationError::max_chars(field, max));
        }
        Ok(())
    }

    pub fn min_max_value<T: PartialOrd + fmt::Display>(
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Result<(), ValidationError> {
        if value < min || value > max {
            return Err(ValidationError::min_max_value(field, min, max));
        }
        Ok(())
    }
}
