//! Which tagged templates hold style text
//!
//! With the default configuration these tags match:
//!
//! | Shape                         | Example                          |
//! |-------------------------------|----------------------------------|
//! | helper identifier             | `` css`...` ``, `` keyframes`...` `` |
//! | member of the primary         | `` styled.div`...` ``              |
//! | call of the primary           | `` styled(Button)`...` ``          |
//! | secondary call on a member    | `` styled.div.attrs(...)`...` ``   |
//! | secondary call on a call      | `` styled(Button).attrs(...)`...` `` |
//!
//! The bare primary (`` styled`...` ``) is not a style block.

use crate::host::{TagExpr, TaggedTemplate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub primary: String,
    pub secondary: String,
    pub helpers: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            primary: "styled".to_string(),
            secondary: "attrs".to_string(),
            helpers: vec![
                "keyframes".to_string(),
                "createGlobalStyle".to_string(),
                "css".to_string(),
            ],
        }
    }
}

impl MatcherConfig {
    pub fn matches(&self, template: &TaggedTemplate) -> bool {
        self.matches_tag(&template.tag)
    }

    pub fn matches_tag(&self, tag: &TagExpr) -> bool {
        match tag {
            TagExpr::Identifier(name) => self.is_helper(name),
            TagExpr::Member { object, .. } => self.is_primary(object),
            TagExpr::Call(callee) => match callee.as_ref() {
                TagExpr::Member { object, property } if *property == self.secondary => {
                    match object.as_ref() {
                        TagExpr::Member { object, .. } => self.is_primary(object),
                        TagExpr::Call(inner) => self.is_primary(inner),
                        _ => false,
                    }
                }
                other => self.is_primary(other),
            },
            TagExpr::Computed(_) | TagExpr::Other => false,
        }
    }

    fn is_primary(&self, expr: &TagExpr) -> bool {
        matches!(expr, TagExpr::Identifier(name) if *name == self.primary)
    }

    fn is_helper(&self, name: &str) -> bool {
        self.helpers.iter().any(|h| h == name)
    }
}
