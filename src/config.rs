use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::filtering::DEFAULT_IN_DELIMITER;
use crate::messages::{MessageCatalog, MessageSource};

/// Service-wide settings. Every field has a default, so any subset may be given.
///
/// ```json
/// {"default_page_size": 20, "max_page_size": 100, "in_delimiter": ";",
///  "messages": {"validation-errors": "Erreurs de validation"}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudConfig {
    /// Page size used when a request names none. `None` keeps such requests unbounded.
    pub default_page_size: Option<u64>,
    /// Upper bound applied to every requested page size.
    pub max_page_size: Option<u64>,
    /// Separator between elements of `IN`/`NOT_IN` values.
    pub in_delimiter: char,
    /// Message template overrides, keyed by code.
    pub messages: HashMap<String, String>,
}

impl Default for CrudConfig {
    fn default() -> Self {
        Self {
            default_page_size: None,
            max_page_size: None,
            in_delimiter: DEFAULT_IN_DELIMITER,
            messages: HashMap::new(),
        }
    }
}

impl CrudConfig {
    /// # Errors
    ///
    /// Returns the parse error for malformed JSON or mistyped fields.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Page size actually used for a request. Zero is raised to one.
    #[must_use]
    pub fn effective_page_size(&self, requested: Option<u64>) -> Option<u64> {
        let size = requested.or(self.default_page_size)?;
        let size = self.max_page_size.map_or(size, |max| size.min(max));
        Some(size.max(1))
    }

    /// English catalog with this config's overrides applied.
    #[must_use]
    pub fn message_source(&self) -> Arc<dyn MessageSource> {
        Arc::new(MessageCatalog::english().with_overrides(self.messages.clone()))
    }
}
