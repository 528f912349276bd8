//! Style-sheet syntax tree
//!
//! A closed set of node kinds, each carrying the raw text needed to print it
//! back byte-for-byte. Semantic fields (`prop`, `value`, `selector`, `params`)
//! hold the text exactly as written; the surrounding whitespace lives in the
//! per-kind raws structs.
//!
//! Raw fields are `Option`al: the parser always fills them, while nodes built
//! by hand leave them `None` and the printer falls back to default spacing.
//!
//! Nodes that went through position correction also carry [`CorrectedRaws`]:
//! re-indented copies of their raws, valid only while the raw they were
//! computed from is unchanged.

use crate::embed::BlockConfig;
use crate::position::Range;
use serde::Serialize;
use std::collections::BTreeMap;

/// Names a raw string of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RawKey {
    Before,
    Between,
    After,
    AfterName,
    Prop,
    /// Selector, declaration value, at-rule params or comment text
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectedRaw {
    pub original: String,
    pub corrected: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CorrectedRaws {
    entries: BTreeMap<RawKey, CorrectedRaw>,
}

impl CorrectedRaws {
    pub fn insert(&mut self, key: RawKey, original: &str, corrected: String) {
        self.entries.insert(
            key,
            CorrectedRaw {
                original: original.to_string(),
                corrected,
            },
        );
    }

    /// The corrected text for `key`, if it was computed from `current`
    pub fn get(&self, key: RawKey, current: &str) -> Option<&str> {
        self.entries
            .get(&key)
            .filter(|entry| entry.original == current)
            .map(|entry| entry.corrected.as_str())
    }

    pub fn entry(&self, key: RawKey) -> Option<&CorrectedRaw> {
        self.entries.get(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RootRaws {
    pub after: Option<String>,
    /// Whether the last child carries its terminating `;`
    pub semicolon: bool,
}

/// One parsed style block
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Root {
    pub nodes: Vec<Node>,
    pub raws: RootRaws,
    pub source: Option<Range>,
    pub corrected: CorrectedRaws,
    /// File name handed to the dialect parser, if any
    pub from: Option<String>,
    /// Extraction bookkeeping, present on roots that came out of a host file
    pub block: Option<BlockConfig>,
    /// Host text between the previous block (or file start) and this block's content
    pub leading_text: String,
    /// Host text after the content, set on the last root of a document only
    pub trailing_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleRaws {
    pub before: Option<String>,
    pub between: Option<String>,
    pub after: Option<String>,
    pub semicolon: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub selector: String,
    pub nodes: Vec<Node>,
    /// A `;`-terminated rule without a block (LESS mixin call)
    pub mixin: bool,
    pub raws: RuleRaws,
    pub source: Option<Range>,
    pub corrected: CorrectedRaws,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AtRuleRaws {
    pub before: Option<String>,
    pub after_name: Option<String>,
    pub between: Option<String>,
    pub after: Option<String>,
    pub semicolon: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtRule {
    pub name: String,
    pub params: String,
    /// `None` for statements such as `@import x;`
    pub nodes: Option<Vec<Node>>,
    pub raws: AtRuleRaws,
    pub source: Option<Range>,
    pub corrected: CorrectedRaws,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeclRaws {
    pub before: Option<String>,
    /// Everything between the property and the value, colon included
    pub between: Option<String>,
    /// Whitespace between the value and the terminating `;`
    pub after: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
    pub raws: DeclRaws,
    pub source: Option<Range>,
    pub corrected: CorrectedRaws,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommentRaws {
    pub before: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    /// Text between the delimiters, untrimmed
    pub text: String,
    /// `//` comment rather than `/* */`
    pub inline: bool,
    pub raws: CommentRaws,
    pub source: Option<Range>,
    pub corrected: CorrectedRaws,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
    Declaration(Declaration),
    Comment(Comment),
}

/// Borrowed view of any node, root included
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Root(&'a Root),
    Rule(&'a Rule),
    AtRule(&'a AtRule),
    Declaration(&'a Declaration),
    Comment(&'a Comment),
}

impl Rule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            nodes: Vec::new(),
            mixin: false,
            raws: RuleRaws::default(),
            source: None,
            corrected: CorrectedRaws::default(),
        }
    }
}

impl AtRule {
    pub fn new(name: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: params.into(),
            nodes: None,
            raws: AtRuleRaws::default(),
            source: None,
            corrected: CorrectedRaws::default(),
        }
    }
}

impl Declaration {
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            value: value.into(),
            raws: DeclRaws::default(),
            source: None,
            corrected: CorrectedRaws::default(),
        }
    }

    pub fn important(&self) -> bool {
        self.value
            .trim_end()
            .to_ascii_lowercase()
            .ends_with("!important")
    }
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            inline: false,
            raws: CommentRaws::default(),
            source: None,
            corrected: CorrectedRaws::default(),
        }
    }
}

impl Node {
    pub fn kind(&self) -> &'static str {
        self.as_ref().kind()
    }

    pub fn as_ref(&self) -> NodeRef<'_> {
        match self {
            Node::Rule(n) => NodeRef::Rule(n),
            Node::AtRule(n) => NodeRef::AtRule(n),
            Node::Declaration(n) => NodeRef::Declaration(n),
            Node::Comment(n) => NodeRef::Comment(n),
        }
    }

    pub fn source(&self) -> Option<&Range> {
        self.as_ref().source()
    }

    pub fn source_mut(&mut self) -> &mut Option<Range> {
        match self {
            Node::Rule(n) => &mut n.source,
            Node::AtRule(n) => &mut n.source,
            Node::Declaration(n) => &mut n.source,
            Node::Comment(n) => &mut n.source,
        }
    }

    pub fn corrected_mut(&mut self) -> &mut CorrectedRaws {
        match self {
            Node::Rule(n) => &mut n.corrected,
            Node::AtRule(n) => &mut n.corrected,
            Node::Declaration(n) => &mut n.corrected,
            Node::Comment(n) => &mut n.corrected,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        match self {
            Node::Rule(n) => &n.nodes,
            Node::AtRule(n) => n.nodes.as_deref().unwrap_or(&[]),
            Node::Declaration(_) | Node::Comment(_) => &[],
        }
    }

    pub fn nodes_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Rule(n) => Some(&mut n.nodes),
            Node::AtRule(n) => n.nodes.as_mut(),
            Node::Declaration(_) | Node::Comment(_) => None,
        }
    }

    /// Statements the parent terminates with `;`
    pub fn needs_semicolon(&self) -> bool {
        match self {
            Node::Declaration(_) => true,
            Node::AtRule(n) => n.nodes.is_none(),
            Node::Rule(n) => n.mixin,
            Node::Comment(_) => false,
        }
    }
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            NodeRef::Root(_) => "root",
            NodeRef::Rule(_) => "rule",
            NodeRef::AtRule(_) => "atrule",
            NodeRef::Declaration(_) => "decl",
            NodeRef::Comment(_) => "comment",
        }
    }

    pub fn source(&self) -> Option<&'a Range> {
        match self {
            NodeRef::Root(n) => n.source.as_ref(),
            NodeRef::Rule(n) => n.source.as_ref(),
            NodeRef::AtRule(n) => n.source.as_ref(),
            NodeRef::Declaration(n) => n.source.as_ref(),
            NodeRef::Comment(n) => n.source.as_ref(),
        }
    }

    pub fn corrected(&self) -> &'a CorrectedRaws {
        match self {
            NodeRef::Root(n) => &n.corrected,
            NodeRef::Rule(n) => &n.corrected,
            NodeRef::AtRule(n) => &n.corrected,
            NodeRef::Declaration(n) => &n.corrected,
            NodeRef::Comment(n) => &n.corrected,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, NodeRef::Root(_))
    }

    /// Direct children
    pub fn nodes(&self) -> &'a [Node] {
        match self {
            NodeRef::Root(n) => &n.nodes,
            NodeRef::Rule(n) => &n.nodes,
            NodeRef::AtRule(n) => n.nodes.as_deref().unwrap_or(&[]),
            NodeRef::Declaration(_) | NodeRef::Comment(_) => &[],
        }
    }
}

impl<'a> From<&'a Node> for NodeRef<'a> {
    fn from(node: &'a Node) -> Self {
        node.as_ref()
    }
}

impl Root {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visit every descendant depth-first, parents before children
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(NodeRef<'a>)) {
        fn walk_nodes<'a>(nodes: &'a [Node], visit: &mut dyn FnMut(NodeRef<'a>)) {
            for node in nodes {
                visit(node.as_ref());
                walk_nodes(node.nodes(), visit);
            }
        }
        walk_nodes(&self.nodes, visit);
    }

    pub fn descendants(&self) -> Vec<NodeRef<'_>> {
        let mut out = Vec::new();
        self.walk(&mut |node| out.push(node));
        out
    }

    pub fn declarations(&self) -> Vec<&Declaration> {
        self.descendants()
            .into_iter()
            .filter_map(|node| match node {
                NodeRef::Declaration(decl) => Some(decl),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrected_raw_is_keyed_by_original() {
        let mut raws = CorrectedRaws::default();
        raws.insert(RawKey::Before, "\n  ", "\n      ".to_string());

        assert_eq!(raws.get(RawKey::Before, "\n  "), Some("\n      "));
        assert_eq!(raws.get(RawKey::Before, "\n"), None);
        assert_eq!(raws.get(RawKey::After, "\n  "), None);
    }

    #[test]
    fn test_walk_order() {
        let mut rule = Rule::new(".a");
        rule.nodes.push(Node::Declaration(Declaration::new("color", "red")));
        let root = Root {
            nodes: vec![
                Node::Comment(Comment::new(" c ")),
                Node::Rule(rule),
                Node::AtRule(AtRule::new("import", "'x'")),
            ],
            ..Root::default()
        };

        let kinds: Vec<_> = root.descendants().iter().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec!["comment", "rule", "decl", "atrule"]);
        assert_eq!(root.declarations()[0].prop, "color");
    }

    #[test]
    fn test_needs_semicolon() {
        assert!(Node::Declaration(Declaration::new("a", "b")).needs_semicolon());
        assert!(Node::AtRule(AtRule::new("import", "x")).needs_semicolon());
        assert!(!Node::Rule(Rule::new(".a")).needs_semicolon());
        assert!(!Node::Comment(Comment::new("x")).needs_semicolon());
    }

    #[test]
    fn test_important() {
        assert!(Declaration::new("color", "red !IMPORTANT").important());
        assert!(!Declaration::new("color", "red").important());
    }
}
