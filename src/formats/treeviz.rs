//! Treeviz formatter
//!
//! One line per node, nesting drawn with box characters:
//!
//! <prefix><connector> <icon> <label> (label truncated to 30 characters)
//!
//! Icons
//!     Document: ⧉
//!     Root (one extracted block): ⊤
//!     Rule: §
//!     AtRule: @
//!     Declaration: ≔
//!     Comment: "
//!     Placeholder (a `${...}` hole): $
//!
//! Placeholders are labelled with the hole's host text.

use super::registry::{FormatError, Formatter};
use crate::embed::{placeholder, BlockConfig, StyleDocument};
use crate::style::{Node, NodeRef, Root};
use std::collections::HashMap;

fn truncate(s: &str, max_chars: usize) -> String {
    let flat = s.replace('\n', "↵");
    if flat.chars().count() > max_chars {
        let mut truncated = flat.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        flat
    }
}

fn placeholder_text<'a>(node: NodeRef<'_>, block: Option<&'a BlockConfig>) -> Option<&'a str> {
    let NodeRef::Comment(comment) = node else {
        return None;
    };
    let index = placeholder::parse_comment(&comment.text)?;
    block?.expression(index)
}

fn icon(node: NodeRef<'_>, block: Option<&BlockConfig>) -> &'static str {
    match node {
        NodeRef::Root(_) => "⊤",
        NodeRef::Rule(_) => "§",
        NodeRef::AtRule(_) => "@",
        NodeRef::Declaration(_) => "≔",
        NodeRef::Comment(_) if placeholder_text(node, block).is_some() => "$",
        NodeRef::Comment(_) => "\"",
    }
}

fn label(node: NodeRef<'_>, block: Option<&BlockConfig>) -> String {
    match node {
        NodeRef::Root(root) => root
            .source
            .as_ref()
            .map_or_else(|| "block".to_string(), |range| range.start.to_string()),
        NodeRef::Rule(rule) => rule.selector.clone(),
        NodeRef::AtRule(at_rule) if at_rule.params.is_empty() => format!("@{}", at_rule.name),
        NodeRef::AtRule(at_rule) => format!("@{} {}", at_rule.name, at_rule.params),
        NodeRef::Declaration(decl) => format!("{}: {}", decl.prop, decl.value),
        NodeRef::Comment(comment) => placeholder_text(node, block)
            .map_or_else(|| comment.text.trim().to_string(), str::to_string),
    }
}

struct Treeviz<'a> {
    out: String,
    block: Option<&'a BlockConfig>,
    show_linum: bool,
}

impl<'a> Treeviz<'a> {
    fn node(&mut self, node: NodeRef<'_>, prefix: &str, is_last: bool) {
        let connector = if is_last { "└─" } else { "├─" };
        if self.show_linum {
            let line = node.source().map_or(0, |range| range.start.line);
            self.out.push_str(&format!("{line:02} "));
        }
        self.out.push_str(&format!(
            "{}{} {} {}\n",
            prefix,
            connector,
            icon(node, self.block),
            truncate(&label(node, self.block), 30)
        ));

        let children = node.nodes();
        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        for (i, child) in children.iter().enumerate() {
            self.node(Node::as_ref(child), &child_prefix, i + 1 == children.len());
        }
    }

    fn root(&mut self, root: &'a Root, is_last: bool) {
        self.block = root.block.as_ref();
        self.node(NodeRef::Root(root), "", is_last);
    }
}

pub fn to_treeviz_str(document: &StyleDocument) -> String {
    to_treeviz_str_with_params(document, &HashMap::new())
}

pub fn to_treeviz_str_with_params(
    document: &StyleDocument,
    params: &HashMap<String, String>,
) -> String {
    let show_linum = params
        .get("show-linum")
        .map(|v| v != "false")
        .unwrap_or(false);

    let count = document.roots.len();
    let mut treeviz = Treeviz {
        out: format!("⧉ {} block{}\n", count, if count == 1 { "" } else { "s" }),
        block: None,
        show_linum,
    };
    for (i, root) in document.roots.iter().enumerate() {
        treeviz.root(root, i + 1 == count);
    }
    treeviz.out
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, document: &StyleDocument) -> Result<String, FormatError> {
        Ok(to_treeviz_str(document))
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }
}
