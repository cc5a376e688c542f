//! Message catalog used to turn error codes into user-facing text.
//!
//! Codes are plain strings so applications can ship their own catalogs (one per locale, loaded
//! however they like) behind [`MessageSource`]. Placeholders `{0}`, `{1}`, ... are replaced by
//! positional arguments.

use std::collections::HashMap;

pub mod codes {
    pub const ENTITY_NOT_FOUND: &str = "entity-not-found";
    pub const VALIDATION_ERRORS: &str = "validation-errors";
    pub const FIELD_MAX_CHARS: &str = "field-max-chars";
    pub const FIELD_NOT_EMPTY: &str = "field-notEmpty";
    pub const FIELD_MIN_MAX_VALUE: &str = "field-min-max-value";
    pub const UNKNOWN_FIELD: &str = "criteria-unknown-field";
    pub const INVALID_VALUE: &str = "criteria-invalid-value";
    pub const UNSUPPORTED_OPERATION: &str = "criteria-unsupported-operation";
    pub const ID_MISMATCH: &str = "id-mismatch";
    pub const DATABASE_ERROR: &str = "database-error";
}

const ENGLISH: &[(&str, &str)] = &[
    (codes::ENTITY_NOT_FOUND, "{0} with id {1} not found"),
    (codes::VALIDATION_ERRORS, "Validation errors"),
    (codes::FIELD_MAX_CHARS, "must not exceed {0} characters"),
    (codes::FIELD_NOT_EMPTY, "must not be empty"),
    (codes::FIELD_MIN_MAX_VALUE, "must be between {0} and {1}"),
    (codes::UNKNOWN_FIELD, "Unknown search field '{0}'"),
    (codes::INVALID_VALUE, "Value '{1}' for field '{0}' is not a valid {2}"),
    (
        codes::UNSUPPORTED_OPERATION,
        "Operation {1} is not supported on {2} field '{0}'",
    ),
    (codes::ID_MISMATCH, "Body id {0} does not match path id {1}"),
    (codes::DATABASE_ERROR, "A database error occurred"),
];

/// Resolves message codes to text.
pub trait MessageSource: Send + Sync {
    /// Raw template for `code`, if the catalog knows it.
    fn template(&self, code: &str) -> Option<&str>;

    /// Resolved message without arguments. Unknown codes resolve to themselves.
    fn message(&self, code: &str) -> String {
        self.message_with(code, &[])
    }

    /// Resolved message with `{n}` placeholders substituted.
    fn message_with(&self, code: &str, args: &[String]) -> String {
        let Some(template) = self.template(code) else {
            return code.to_string();
        };
        args.iter()
            .enumerate()
            .fold(template.to_string(), |message, (position, arg)| {
                message.replace(&format!("{{{position}}}"), arg)
            })
    }
}

/// In-memory catalog, seeded with English defaults.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    /// An empty catalog; every code resolves to itself.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn english() -> Self {
        let templates = ENGLISH
            .iter()
            .map(|(code, template)| ((*code).to_string(), (*template).to_string()))
            .collect();
        Self { templates }
    }

    pub fn insert(&mut self, code: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(code.into(), template.into());
    }

    /// Replace or add templates, e.g. from [`CrudConfig::messages`](crate::CrudConfig).
    #[must_use]
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (code, template) in overrides {
            self.insert(code, template);
        }
        self
    }
}

impl MessageSource for MessageCatalog {
    fn template(&self, code: &str) -> Option<&str> {
        self.templates.get(code).map(String::as_str)
    }
}
