//! JSON output: the document as serde sees it

use super::registry::{FormatError, Formatter};
use crate::embed::StyleDocument;

pub fn to_json_str(document: &StyleDocument) -> Result<String, FormatError> {
    serde_json::to_string_pretty(document).map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, document: &StyleDocument) -> Result<String, FormatError> {
        to_json_str(document)
    }

    fn description(&self) -> &str {
        "Full document as JSON, positions and raws included"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxRegistry;
    use crate::style::DialectRegistry;

    #[test]
    fn test_json_carries_host_positions() {
        let syntax = SyntaxRegistry::default()
            .build("styled-components", &DialectRegistry::default())
            .unwrap();
        let document = syntax.parse("css`a: ${b};`").unwrap();
        let json: serde_json::Value = serde_json::from_str(&to_json_str(&document).unwrap()).unwrap();

        let decl = &json["roots"][0]["nodes"][0];
        assert_eq!(decl["type"], "declaration");
        assert_eq!(decl["source"]["start"]["column"], 5);
        assert_eq!(decl["source"]["span"]["start"], 4);
        assert_eq!(json["roots"][0]["block"]["expression_strings"][0], "${b}");
    }
}
