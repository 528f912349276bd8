//! Document assembly
//!
//! Drives one host file through the pipeline: host parser, disable
//! directive, matcher, then per block extractor, indent normalizer, dialect
//! parser and position corrector. Roots are collected in host order, each
//! carrying the host text in front of it; the last one also carries the host
//! text after it.
//!
//! A block the dialect cannot parse is left out and recorded as a
//! [`SkippedBlock`]. The cursor does not move past it, so its text becomes
//! part of the next root's leading text (or the trailing text).

use super::config::{BlockConfig, Offsets};
use super::correct::PositionCorrector;
use super::diagnostics::{Diagnostic, SkipReason, SkippedBlock};
use super::extract::extract;
use super::indent::{base_indentation, normalize};
use super::matcher::MatcherConfig;
use crate::host::{HostParseError, HostParser, TaggedTemplate};
use crate::position::{Range, SourceLocation};
use crate::style::{Dialect, ParseOptions, Root, StyleParseError};
use serde::Serialize;

/// The style blocks of one host file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleDocument {
    /// The full host text
    pub source: String,
    pub roots: Vec<Root>,
    pub skipped: Vec<SkippedBlock>,
}

impl StyleDocument {
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.skipped.iter().map(Diagnostic::from).collect()
    }
}

/// Normalized text of one candidate block, before dialect parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedBlock {
    /// Template content in the host file
    pub range: Range,
    pub text: String,
    pub expression_strings: Vec<String>,
}

/// Everything needed to turn host source into a [`StyleDocument`]
pub struct Assembler<'a> {
    pub host: &'a dyn HostParser,
    pub dialect: &'a dyn Dialect,
    pub matcher: &'a MatcherConfig,
    /// Line comment text that switches extraction off for a statement
    pub disable_directive: &'a str,
}

impl<'a> Assembler<'a> {
    pub fn parse(&self, source: &str, options: &ParseOptions) -> Result<StyleDocument, HostParseError> {
        let module = self.host.parse_module(source)?;
        let location = SourceLocation::new(source);
        let options = options.without_map();

        let mut document = StyleDocument {
            source: source.to_string(),
            ..StyleDocument::default()
        };
        let mut cursor = 0;

        for template in self.candidates(&module.templates) {
            let Some(content) = template.content_range() else {
                continue;
            };
            if content.start < cursor {
                document.skipped.push(SkippedBlock {
                    range: location.byte_range_to_range(&content),
                    reason: SkipReason::Nested,
                });
                continue;
            }

            match self.block(template, source, &options) {
                Ok(mut root) => {
                    let prefix = root.block.as_ref().map_or(0, BlockConfig::prefix_offset);
                    root.leading_text = source[cursor..content.start + prefix].to_string();
                    cursor = content.end;
                    document.roots.push(root);
                }
                Err(error) => document.skipped.push(SkippedBlock {
                    range: location.byte_range_to_range(&content),
                    reason: SkipReason::Parse(error),
                }),
            }
        }

        if let Some(last) = document.roots.last_mut() {
            last.trailing_text = Some(source[cursor..].to_string());
        }
        Ok(document)
    }

    /// The normalized text of every candidate block, nested ones included
    pub fn normalized_blocks(&self, source: &str) -> Result<Vec<NormalizedBlock>, HostParseError> {
        let module = self.host.parse_module(source)?;
        let location = SourceLocation::new(source);

        Ok(self
            .candidates(&module.templates)
            .filter_map(|template| {
                let content = template.content_range()?;
                let extracted = extract(template, source);
                let normalized = normalize(&extracted.text, Self::base(template));
                Some(NormalizedBlock {
                    range: location.byte_range_to_range(&content),
                    text: normalized.source,
                    expression_strings: extracted.expression_strings,
                })
            })
            .collect())
    }

    fn candidates<'t>(
        &'t self,
        templates: &'t [TaggedTemplate],
    ) -> impl Iterator<Item = &'t TaggedTemplate> + 't {
        templates.iter().filter(move |template| {
            !template.has_leading_comment(self.disable_directive) && self.matcher.matches(template)
        })
    }

    fn base(template: &TaggedTemplate) -> usize {
        template
            .closing_delimiter()
            .map_or(0, |position| base_indentation(position.column))
    }

    fn block(
        &self,
        template: &TaggedTemplate,
        source: &str,
        options: &ParseOptions,
    ) -> Result<Root, StyleParseError> {
        let extracted = extract(template, source);
        let normalized = normalize(&extracted.text, Self::base(template));
        let config = BlockConfig {
            source_offsets: Offsets {
                prefix: normalized.prefix,
                ..Offsets::default()
            },
            css_offsets: Offsets::default(),
            base_indentations: normalized.base_indentations,
            expression_strings: extracted.expression_strings,
        };

        let mut root = self.dialect.parse(&normalized.source, options)?;
        if let Some(corrector) = PositionCorrector::new(template, &normalized.source, &config) {
            corrector.correct_root(&mut root);
        }
        root.block = Some(config);
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::serialize::stringify_document;
    use crate::host::TemplateScanner;
    use crate::style::CssDialect;

    const DIRECTIVE: &str = "tagstyle-styled-components-disable-next-line";

    fn assemble(source: &str) -> StyleDocument {
        let matcher = MatcherConfig::default();
        let assembler = Assembler {
            host: &TemplateScanner,
            dialect: &CssDialect,
            matcher: &matcher,
            disable_directive: DIRECTIVE,
        };
        assembler.parse(source, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn test_leading_and_trailing_text() {
        let source = "const A = styled.div`\n  color: red;\n`;\nconst B = css`a: b;`;\n";
        let document = assemble(source);

        assert_eq!(document.roots.len(), 2);
        assert_eq!(document.roots[0].leading_text, "const A = styled.div`\n");
        assert_eq!(document.roots[1].leading_text, "`;\nconst B = css`");
        assert_eq!(document.roots[0].trailing_text, None);
        assert_eq!(document.roots[1].trailing_text.as_deref(), Some("`;\n"));
        assert_eq!(stringify_document(&document, &CssDialect), source);
    }

    #[test]
    fn test_unparseable_block_stays_host_text() {
        let source = "css`a: b;`;\ncss`.x {`;\ncss`c: d;`;";
        let document = assemble(source);

        assert_eq!(document.roots.len(), 2);
        assert_eq!(document.skipped.len(), 1);
        assert!(matches!(document.skipped[0].reason, SkipReason::Parse(_)));
        assert_eq!(document.roots[1].leading_text, "`;\ncss`.x {`;\ncss`");
        assert_eq!(stringify_document(&document, &CssDialect), source);
    }

    #[test]
    fn test_no_blocks() {
        let source = "const x = 1;\n";
        let document = assemble(source);
        assert!(document.is_empty());
        assert_eq!(stringify_document(&document, &CssDialect), source);
    }

    #[test]
    fn test_nested_block_is_skipped() {
        let source = "styled.div`\n  ${p => p.on && css`color: red;`}\n`";
        let document = assemble(source);

        assert_eq!(document.roots.len(), 1);
        assert_eq!(document.skipped[0].reason, SkipReason::Nested);
        assert_eq!(stringify_document(&document, &CssDialect), source);
    }

    #[test]
    fn test_disable_directive() {
        let source = format!("// {DIRECTIVE}\nconst A = styled.div`a: b;`;\nconst B = css`c: d;`;");
        let document = assemble(&source);

        assert_eq!(document.roots.len(), 1);
        assert_eq!(document.roots[0].declarations()[0].prop, "c");
    }
}
