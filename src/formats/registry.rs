//! Format registry for document output
//!
//! Each format implements [`Formatter`] and registers under its name.

use crate::embed::StyleDocument;
use crate::registry::Registry;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    FormatNotFound(String),
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

pub trait Formatter: Send + Sync {
    /// Registry name (e.g. "treeviz", "json")
    fn name(&self) -> &str;

    fn serialize(&self, document: &StyleDocument) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

/// Output formats by name, as used by `tagstyle inspect --format`
pub struct FormatRegistry {
    formatters: Registry<Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: Registry::new(),
        }
    }

    /// Replaces any formatter of the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.has(name)
    }

    pub fn serialize(&self, document: &StyleDocument, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(document)
    }

    pub fn list_formats(&self) -> Vec<String> {
        self.formatters.names()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::TreevizFormatter);
        registry.register(super::JsonFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
