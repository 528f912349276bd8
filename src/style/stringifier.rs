//! Default style-sheet printer
//!
//! Output goes through a [`Builder`], one call per literal fragment, tagged
//! with the node the fragment belongs to. Every raw is looked up through a
//! [`RawOverrides`] first, so callers can substitute text (re-indented
//! whitespace, for example) without re-implementing printing.
//!
//! Raws missing on hand-built nodes fall back to [`DefaultRaws`].

use super::ast::{AtRule, Comment, Declaration, Node, NodeRef, RawKey, Root, Rule};
use std::borrow::Cow;

/// Which edge of a node a fragment marks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

/// Receives printed fragments
pub trait Builder {
    fn emit(&mut self, text: &str, node: Option<NodeRef<'_>>, boundary: Option<Boundary>);
}

impl Builder for String {
    fn emit(&mut self, text: &str, _node: Option<NodeRef<'_>>, _boundary: Option<Boundary>) {
        self.push_str(text);
    }
}

/// Supplies replacement raws while printing
pub trait RawOverrides {
    /// Replacement for `node`'s raw `key`, whose own value is `current`
    fn raw<'n>(&self, node: NodeRef<'n>, key: RawKey, current: &str) -> Option<&'n str>;
}

/// Prints raws as stored
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverrides;

impl RawOverrides for NoOverrides {
    fn raw<'n>(&self, _node: NodeRef<'n>, _key: RawKey, _current: &str) -> Option<&'n str> {
        None
    }
}

/// Spacing used for raws a node does not carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRaws {
    pub indent: String,
    pub colon: String,
    pub before_open: String,
}

impl Default for DefaultRaws {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            colon: ": ".to_string(),
            before_open: " ".to_string(),
        }
    }
}

impl DefaultRaws {
    fn before(&self, depth: usize, first_in_root: bool) -> String {
        if first_in_root {
            String::new()
        } else {
            format!("\n{}", self.indent.repeat(depth))
        }
    }

    fn close(&self, depth: usize, empty: bool) -> String {
        if empty {
            String::new()
        } else {
            format!("\n{}", self.indent.repeat(depth))
        }
    }
}

pub struct Stringifier<'b> {
    builder: &'b mut dyn Builder,
    overrides: &'b dyn RawOverrides,
    defaults: DefaultRaws,
}

impl<'b> Stringifier<'b> {
    pub fn new(builder: &'b mut dyn Builder, overrides: &'b dyn RawOverrides) -> Self {
        Self {
            builder,
            overrides,
            defaults: DefaultRaws::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: DefaultRaws) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn root(&mut self, root: &Root) {
        let node = NodeRef::Root(root);
        self.body(&root.nodes, root.raws.semicolon, 0, true);
        let after = self.raw(node, RawKey::After, root.raws.after.as_deref(), || String::new());
        self.emit(&after, node, None);
    }

    /// Print a node tree without the root's trailing raw
    pub fn nodes(&mut self, nodes: &[Node]) {
        self.body(nodes, false, 0, true);
    }

    fn body(&mut self, nodes: &[Node], semicolon: bool, depth: usize, in_root: bool) {
        for (i, child) in nodes.iter().enumerate() {
            self.node(child, depth, in_root && i == 0);
            if child.needs_semicolon() && (i + 1 < nodes.len() || semicolon) {
                self.emit(";", child.as_ref(), None);
            }
        }
    }

    fn node(&mut self, node: &Node, depth: usize, first_in_root: bool) {
        let before_default = self.defaults.before(depth, first_in_root);
        let (own_before, node_ref) = match node {
            Node::Rule(n) => (n.raws.before.as_deref(), NodeRef::Rule(n)),
            Node::AtRule(n) => (n.raws.before.as_deref(), NodeRef::AtRule(n)),
            Node::Declaration(n) => (n.raws.before.as_deref(), NodeRef::Declaration(n)),
            Node::Comment(n) => (n.raws.before.as_deref(), NodeRef::Comment(n)),
        };
        let before = self.raw(node_ref, RawKey::Before, own_before, || before_default);
        self.emit(&before, node_ref, None);

        match node {
            Node::Rule(rule) => self.rule(rule, depth),
            Node::AtRule(at_rule) => self.at_rule(at_rule, depth),
            Node::Declaration(decl) => self.declaration(decl),
            Node::Comment(comment) => self.comment(comment),
        }
    }

    fn rule(&mut self, rule: &Rule, depth: usize) {
        let node = NodeRef::Rule(rule);
        let selector = self.raw(node, RawKey::Value, Some(&rule.selector), String::new);
        self.emit_boundary(&selector, node, Boundary::Start);

        if rule.mixin {
            let between = self.raw(node, RawKey::Between, rule.raws.between.as_deref(), String::new);
            self.emit(&between, node, None);
            return;
        }

        let before_open = self.defaults.before_open.clone();
        let between = self.raw(node, RawKey::Between, rule.raws.between.as_deref(), || before_open);
        self.emit(&format!("{between}{{"), node, None);
        self.body(&rule.nodes, rule.raws.semicolon, depth + 1, false);

        let close = self.defaults.close(depth, rule.nodes.is_empty());
        let after = self.raw(node, RawKey::After, rule.raws.after.as_deref(), || close);
        self.emit(&after, node, None);
        self.emit_boundary("}", node, Boundary::End);
    }

    fn at_rule(&mut self, at_rule: &AtRule, depth: usize) {
        let node = NodeRef::AtRule(at_rule);
        self.emit_boundary(&format!("@{}", at_rule.name), node, Boundary::Start);

        let name_gap = if at_rule.params.is_empty() { "" } else { " " };
        let after_name = self.raw(node, RawKey::AfterName, at_rule.raws.after_name.as_deref(), || {
            name_gap.to_string()
        });
        self.emit(&after_name, node, None);

        let params = self.raw(node, RawKey::Value, Some(&at_rule.params), String::new);
        self.emit(&params, node, None);

        match &at_rule.nodes {
            Some(children) => {
                let before_open = self.defaults.before_open.clone();
                let between =
                    self.raw(node, RawKey::Between, at_rule.raws.between.as_deref(), || before_open);
                self.emit(&format!("{between}{{"), node, None);
                self.body(children, at_rule.raws.semicolon, depth + 1, false);

                let close = self.defaults.close(depth, children.is_empty());
                let after = self.raw(node, RawKey::After, at_rule.raws.after.as_deref(), || close);
                self.emit(&after, node, None);
                self.emit_boundary("}", node, Boundary::End);
            }
            None => {
                let between =
                    self.raw(node, RawKey::Between, at_rule.raws.between.as_deref(), String::new);
                self.emit(&between, node, None);
            }
        }
    }

    fn declaration(&mut self, decl: &Declaration) {
        let node = NodeRef::Declaration(decl);
        let prop = self.raw(node, RawKey::Prop, Some(&decl.prop), String::new);
        self.emit_boundary(&prop, node, Boundary::Start);

        let colon = self.defaults.colon.clone();
        let between = self.raw(node, RawKey::Between, decl.raws.between.as_deref(), || colon);
        self.emit(&between, node, None);

        let value = self.raw(node, RawKey::Value, Some(&decl.value), String::new);
        self.emit(&value, node, None);

        let after = self.raw(node, RawKey::After, decl.raws.after.as_deref(), String::new);
        self.emit(&after, node, None);
    }

    fn comment(&mut self, comment: &Comment) {
        let node = NodeRef::Comment(comment);
        let text = self.raw(node, RawKey::Value, Some(&comment.text), String::new);
        let printed = if comment.inline {
            format!("//{text}")
        } else {
            format!("/*{text}*/")
        };
        self.emit(&printed, node, None);
    }

    /// Override, else the node's own raw, else the default
    fn raw<'n>(
        &self,
        node: NodeRef<'n>,
        key: RawKey,
        own: Option<&'n str>,
        default: impl FnOnce() -> String,
    ) -> Cow<'n, str> {
        match own {
            Some(own) => Cow::Borrowed(self.overrides.raw(node, key, own).unwrap_or(own)),
            None => Cow::Owned(default()),
        }
    }

    fn emit(&mut self, text: &str, node: NodeRef<'_>, boundary: Option<Boundary>) {
        if !text.is_empty() {
            self.builder.emit(text, Some(node), boundary);
        }
    }

    fn emit_boundary(&mut self, text: &str, node: NodeRef<'_>, boundary: Boundary) {
        self.builder.emit(text, Some(node), Some(boundary));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ast::Declaration;
    use crate::style::parser::{parse, DialectFlags};

    fn reprint(source: &str, flags: DialectFlags) -> String {
        let root = parse(source, flags).unwrap();
        let mut out = String::new();
        Stringifier::new(&mut out, &NoOverrides).root(&root);
        out
    }

    #[test]
    fn test_reprint_is_identity() {
        let samples = [
            "",
            "color: red",
            "  color :  red  ;\n",
            ".a {\n  &:hover { color: red; }\n}\n",
            "@import 'x.css';@media (x) {a{b:c}}",
            "/* c */\n;a: b;;\n",
            "a { }",
            ".a\n{\n  b: c !important ;\n}",
            "/*STYLE_EXPR:0*/: red;",
        ];
        for sample in samples {
            assert_eq!(reprint(sample, DialectFlags::default()), sample);
        }

        let scss = DialectFlags {
            inline_comments: true,
            bare_statements: true,
        };
        for sample in ["// x\na { // y\n  b: c; }", ".m();\n.n() ;"] {
            assert_eq!(reprint(sample, scss), sample);
        }
    }

    #[test]
    fn test_hand_built_nodes_use_defaults() {
        let mut rule = Rule::new(".a");
        rule.nodes.push(Node::Declaration(Declaration::new("color", "red")));
        rule.nodes.push(Node::Declaration(Declaration::new("margin", "0")));
        let root = Root {
            nodes: vec![Node::Rule(rule)],
            ..Root::default()
        };

        let mut out = String::new();
        Stringifier::new(&mut out, &NoOverrides).root(&root);
        assert_eq!(out, ".a {\n    color: red;\n    margin: 0\n}");
    }

    struct Upper;
    impl RawOverrides for Upper {
        fn raw<'n>(&self, node: NodeRef<'n>, key: RawKey, _current: &str) -> Option<&'n str> {
            match (node, key) {
                (NodeRef::Declaration(_), RawKey::Between) => Some(" = "),
                _ => None,
            }
        }
    }

    #[test]
    fn test_overrides_win() {
        let root = parse("a: b;", DialectFlags::default()).unwrap();
        let mut out = String::new();
        Stringifier::new(&mut out, &Upper).root(&root);
        assert_eq!(out, "a = b;");
    }

    #[derive(Default)]
    struct Recorder(Vec<(String, &'static str, Option<Boundary>)>);
    impl Builder for Recorder {
        fn emit(&mut self, text: &str, node: Option<NodeRef<'_>>, boundary: Option<Boundary>) {
            let kind = node.map_or("none", |n| n.kind());
            self.0.push((text.to_string(), kind, boundary));
        }
    }

    #[test]
    fn test_fragments_are_tagged() {
        let root = parse(".a { b: c }", DialectFlags::default()).unwrap();
        let mut recorder = Recorder::default();
        Stringifier::new(&mut recorder, &NoOverrides).root(&root);

        assert_eq!(recorder.0[0], (".a".to_string(), "rule", Some(Boundary::Start)));
        assert!(recorder
            .0
            .contains(&("}".to_string(), "rule", Some(Boundary::End))));
        assert!(recorder
            .0
            .contains(&("c".to_string(), "decl", None)));
    }
}
