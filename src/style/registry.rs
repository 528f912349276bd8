//! Dialect registry
//!
//! Dialects register under their [`Dialect::name`] and are looked up by the
//! syntax configuration (`dialect: scss`) and the CLI.

use super::dialect::{CssDialect, LessDialect, ScssDialect};
use super::Dialect;
use crate::registry::Registry;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DialectNotFound(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DialectNotFound(name) => write!(f, "Dialect '{name}' not found"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Registry of style dialects
pub struct DialectRegistry {
    dialects: Registry<Arc<dyn Dialect>>,
}

impl DialectRegistry {
    pub fn new() -> Self {
        DialectRegistry {
            dialects: Registry::new(),
        }
    }

    /// Register a dialect, replacing any dialect of the same name
    pub fn register<D: Dialect + 'static>(&mut self, dialect: D) {
        self.dialects
            .insert(dialect.name().to_string(), Arc::new(dialect));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Dialect> {
        self.dialects.get(name).map(|d| d.as_ref())
    }

    /// Shared handle to a dialect, for owners that outlive the registry
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Dialect>, RegistryError> {
        self.dialects
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::DialectNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.dialects.has(name)
    }

    /// All dialect names (sorted)
    pub fn list_dialects(&self) -> Vec<String> {
        self.dialects.names()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(CssDialect);
        registry.register(ScssDialect);
        registry.register(LessDialect);
        registry
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
