//! Syntax configuration
//!
//! A syntax pairs a style dialect with the tag-matching table for one
//! styling library. Presets live in a [`SyntaxRegistry`]; a [`SyntaxOptions`]
//! can also be loaded from YAML or JSON:
//!
//! ```yaml
//! id: styled-components
//! dialect: scss
//! matcher:
//!   primary: styled
//!   secondary: attrs
//!   helpers: [keyframes, createGlobalStyle, css]
//! ```
//!
//! [`Syntax`] is the entry point most callers want: `parse` a host file into
//! a [`StyleDocument`], `stringify` it back.

use crate::embed::{
    stringify_document, write_document, Assembler, MatcherConfig, NormalizedBlock, StyleDocument,
};
use crate::host::{HostParseError, HostParser, TemplateScanner};
use crate::style::{Builder, Dialect, DialectRegistry, ParseOptions, RegistryError};
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug)]
pub enum SyntaxError {
    Io { path: String, message: String },
    Config(String),
    Dialect(RegistryError),
    UnknownSyntax(String),
    Host(HostParseError),
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::Io { path, message } => write!(f, "Cannot read '{path}': {message}"),
            SyntaxError::Config(message) => write!(f, "Invalid syntax configuration: {message}"),
            SyntaxError::Dialect(error) => write!(f, "{error}"),
            SyntaxError::UnknownSyntax(name) => write!(f, "Syntax '{name}' not found"),
            SyntaxError::Host(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for SyntaxError {}

impl From<RegistryError> for SyntaxError {
    fn from(error: RegistryError) -> Self {
        SyntaxError::Dialect(error)
    }
}

impl From<HostParseError> for SyntaxError {
    fn from(error: HostParseError) -> Self {
        SyntaxError::Host(error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxOptions {
    /// Library id, also used to derive the disable directive
    pub id: String,
    /// Registered dialect name
    pub dialect: String,
    pub matcher: MatcherConfig,
    /// Replaces `tagstyle-<id>-disable-next-line`
    pub disable_directive: Option<String>,
}

impl Default for SyntaxOptions {
    fn default() -> Self {
        Self {
            id: "styled-components".to_string(),
            dialect: "css".to_string(),
            matcher: MatcherConfig::default(),
            disable_directive: None,
        }
    }
}

impl SyntaxOptions {
    pub fn with_dialect(dialect: &str) -> Self {
        Self {
            dialect: dialect.to_string(),
            ..Self::default()
        }
    }

    /// Line comment text that disables extraction for the next statement
    pub fn directive(&self) -> String {
        self.disable_directive
            .clone()
            .unwrap_or_else(|| format!("tagstyle-{}-disable-next-line", self.id))
    }

    pub fn from_yaml(text: &str) -> Result<Self, SyntaxError> {
        serde_yaml::from_str(text).map_err(|e| SyntaxError::Config(e.to_string()))
    }

    pub fn from_json(text: &str) -> Result<Self, SyntaxError> {
        serde_json::from_str(text).map_err(|e| SyntaxError::Config(e.to_string()))
    }

    /// Load from a `.json` file, or YAML for any other extension
    pub fn from_file(path: &Path) -> Result<Self, SyntaxError> {
        let text = fs::read_to_string(path).map_err(|e| SyntaxError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&text),
            _ => Self::from_yaml(&text),
        }
    }
}

/// Named syntax presets
pub struct SyntaxRegistry {
    syntaxes: Registry<SyntaxOptions>,
}

impl SyntaxRegistry {
    pub fn new() -> Self {
        SyntaxRegistry {
            syntaxes: Registry::new(),
        }
    }

    pub fn register(&mut self, name: &str, options: SyntaxOptions) {
        self.syntaxes.insert(name, options);
    }

    pub fn get(&self, name: &str) -> Option<&SyntaxOptions> {
        self.syntaxes.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.syntaxes.has(name)
    }

    /// All preset names (sorted)
    pub fn list_syntaxes(&self) -> Vec<String> {
        self.syntaxes.names()
    }

    /// Build the named preset against `dialects`
    pub fn build(&self, name: &str, dialects: &DialectRegistry) -> Result<Syntax, SyntaxError> {
        let options = self
            .get(name)
            .ok_or_else(|| SyntaxError::UnknownSyntax(name.to_string()))?;
        Syntax::new(options.clone(), dialects)
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("styled-components", SyntaxOptions::with_dialect("css"));
        registry.register("styled-components-scss", SyntaxOptions::with_dialect("scss"));
        registry.register("styled-components-less", SyntaxOptions::with_dialect("less"));
        registry
    }
}

impl Default for SyntaxRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// A configured parser/printer for host files
pub struct Syntax {
    options: SyntaxOptions,
    directive: String,
    dialect: Arc<dyn Dialect>,
    host: Box<dyn HostParser + Send + Sync>,
}

impl Syntax {
    pub fn new(options: SyntaxOptions, dialects: &DialectRegistry) -> Result<Self, SyntaxError> {
        let dialect = dialects.resolve(&options.dialect)?;
        Ok(Self {
            directive: options.directive(),
            options,
            dialect,
            host: Box::new(TemplateScanner),
        })
    }

    /// Replace the built-in template scanner
    pub fn with_host(mut self, host: impl HostParser + Send + Sync + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    pub fn options(&self) -> &SyntaxOptions {
        &self.options
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    fn assembler(&self) -> Assembler<'_> {
        Assembler {
            host: self.host.as_ref(),
            dialect: self.dialect.as_ref(),
            matcher: &self.options.matcher,
            disable_directive: &self.directive,
        }
    }

    pub fn parse(&self, source: &str) -> Result<StyleDocument, HostParseError> {
        self.parse_with(source, &ParseOptions::default())
    }

    pub fn parse_with(
        &self,
        source: &str,
        options: &ParseOptions,
    ) -> Result<StyleDocument, HostParseError> {
        self.assembler().parse(source, options)
    }

    pub fn normalized_blocks(&self, source: &str) -> Result<Vec<NormalizedBlock>, HostParseError> {
        self.assembler().normalized_blocks(source)
    }

    pub fn stringify(&self, document: &StyleDocument) -> String {
        stringify_document(document, self.dialect())
    }

    pub fn write(&self, document: &StyleDocument, builder: &mut dyn Builder) {
        write_document(document, self.dialect(), builder);
    }
}
