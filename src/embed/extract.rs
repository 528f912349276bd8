//! Template text extraction
//!
//! Joins the literal segments of one template into style text, replacing
//! each `${...}` hole with a placeholder comment and keeping the verbatim
//! hole text aside.

use super::placeholder;
use crate::host::TaggedTemplate;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Style text with placeholders, before de-indentation
    pub text: String,
    /// Host text from the end of quasi `i` to the start of quasi `i + 1`
    pub expression_strings: Vec<String>,
}

pub fn extract(template: &TaggedTemplate, source: &str) -> ExtractionResult {
    let mut result = ExtractionResult::default();

    for (i, quasi) in template.quasis.iter().enumerate() {
        result.text.push_str(&quasi.raw);

        let Some(next) = template.quasis.get(i + 1) else {
            break;
        };
        result.text.push_str(&placeholder::create(i));
        let hole = source
            .get(quasi.range.end..next.range.start)
            .unwrap_or_default();
        result.expression_strings.push(hole.to_string());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostParser, TemplateScanner};

    fn extract_first(source: &str) -> ExtractionResult {
        let module = TemplateScanner.parse_module(source).unwrap();
        extract(&module.templates[0], source)
    }

    #[test]
    fn test_no_holes() {
        let result = extract_first("styled.div`color: red;`");
        assert_eq!(result.text, "color: red;");
        assert!(result.expression_strings.is_empty());
    }

    #[test]
    fn test_holes_keep_their_delimiters() {
        let result = extract_first("styled.div`color: ${c}; ${p => p.x && `a`}`");
        assert_eq!(result.text, "color: /*STYLE_EXPR:0*/; /*STYLE_EXPR:1*/");
        assert_eq!(result.expression_strings, vec!["${c}", "${p => p.x && `a`}"]);
    }

    #[test]
    fn test_multi_line_hole() {
        let result = extract_first("css`a: ${\n  x\n};`");
        assert_eq!(result.text, "a: /*STYLE_EXPR:0*/;");
        assert_eq!(result.expression_strings, vec!["${\n  x\n}"]);
    }
}
