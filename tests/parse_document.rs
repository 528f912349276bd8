//! Which templates become style blocks, and the host text around them

use rstest::rstest;
use tagstyle::embed::{DiagnosticSeverity, SkipReason, StyleDocument};
use tagstyle::style::Node;

const DIRECTIVE: &str = "tagstyle-styled-components-disable-next-line";

fn parse(source: &str) -> StyleDocument {
    tagstyle::parse(source).unwrap()
}

#[rstest]
#[case::member("styled.div")]
#[case::call("styled(Component)")]
#[case::member_attrs("styled.div.attrs({})")]
#[case::call_attrs("styled(Component).attrs({})")]
#[case::helper("css")]
fn test_matched_tag_shapes(#[case] tag: &str) {
    let source = format!("\n      {tag}`\n        color: hotpink;\n      `;\n    ");
    let document = parse(&source);

    assert_eq!(document.roots.len(), 1);
    let root = &document.roots[0];
    assert_eq!(root.leading_text, format!("\n      {tag}`\n"));
    assert_eq!(root.trailing_text.as_deref(), Some("`;\n    "));
    assert_eq!(root.nodes[0].kind(), "decl");
    assert_eq!(document.source, source);
}

#[test]
fn test_global_style_rules() {
    let source = "\n      createGlobalStyle`\n        .foo {\n          color: hotpink;\n        }\n      `;\n    ";
    let document = parse(source);
    let root = &document.roots[0];

    let Node::Rule(rule) = &root.nodes[0] else {
        panic!("expected rule")
    };
    assert_eq!(rule.selector, ".foo");
    assert_eq!(rule.nodes[0].kind(), "decl");
    assert_eq!(root.leading_text, "\n      createGlobalStyle`\n");
}

#[test]
fn test_keyframes() {
    let source = "\n      keyframes`\n        from { transform: rotate(0deg); }\n        to { transform: rotate(360deg); }\n      `;\n    ";
    let document = parse(source);
    let selectors: Vec<_> = document.roots[0]
        .nodes
        .iter()
        .filter_map(|node| match node {
            Node::Rule(rule) => Some(rule.selector.as_str()),
            _ => None,
        })
        .collect();

    assert_eq!(selectors, vec!["from", "to"]);
    let decls = document.roots[0].declarations();
    assert_eq!(decls[1].value, "rotate(360deg)");
}

#[rstest]
#[case::modern_js("const someObj = {a: {b: 2}};\n      const someValue = someObj?.a?.b ?? 3;")]
#[case::typescript("function doStuff(x: number, y: number): void {}")]
#[case::arrow_division("const half = (a, b) => a / b;")]
#[case::regex_literal("const re = /`+/g;")]
fn test_surrounding_code(#[case] code: &str) {
    let source = format!("\n      {code}\n      styled.div`\n        color: hotpink;\n      `;\n    ");
    let document = parse(&source);

    assert_eq!(document.roots.len(), 1);
    assert_eq!(document.roots[0].declarations()[0].prop, "color");
}

#[test]
fn test_multiple_stylesheets() {
    let source = "\n      styled.div`\n        color: hotpink;\n      `;\n\n      styled.p`background: lime;`;\n    ";
    let document = parse(source);

    assert_eq!(document.roots.len(), 2);
    assert_eq!(document.roots[0].leading_text, "\n      styled.div`\n");
    assert_eq!(document.roots[0].trailing_text, None);
    assert_eq!(document.roots[1].leading_text, "`;\n\n      styled.p`");
    assert_eq!(document.roots[1].trailing_text.as_deref(), Some("`;\n    "));
}

#[test]
fn test_expression_becomes_placeholder_comment() {
    let source = "\n      styled.div`\n        ${expr}color: hotpink;\n      `;\n    ";
    let document = parse(source);
    let root = &document.roots[0];

    let Node::Comment(comment) = &root.nodes[0] else {
        panic!("expected placeholder comment")
    };
    assert_eq!(comment.text, "STYLE_EXPR:0");
    assert_eq!(root.nodes[1].kind(), "decl");

    let block = root.block.as_ref().unwrap();
    assert_eq!(block.expression_strings, vec!["${expr}"]);
    assert_eq!(block.expression(0), Some("${expr}"));
}

#[test]
fn test_expression_as_property() {
    let source = "\n        styled.h1`\n          padding: 2rem;\n          ${expr}: hotpink;\n        `;\n      ";
    let document = parse(source);
    let root = &document.roots[0];

    assert_eq!(root.nodes[1].kind(), "comment");
    let Node::Declaration(decl) = &root.nodes[2] else {
        panic!("expected declaration")
    };
    assert_eq!(decl.prop, "");
    assert_eq!(decl.value, "hotpink");
}

#[rstest]
#[case::no_templates("\n      const foo = 'bar';\n    ")]
#[case::html_template("\n      html`<div></div>`;\n    ")]
#[case::bare_primary("\n      styled`color: hotpink;`;\n    ")]
#[case::untagged("\n      const s = `color: hotpink;`;\n    ")]
#[case::other_object("\n      notStyled.div`color: hotpink;`;\n    ")]
fn test_no_style_blocks(#[case] source: &str) {
    let document = parse(source);

    assert!(document.is_empty());
    assert!(document.skipped.is_empty());
    assert_eq!(document.source, source);
}

#[test]
fn test_disabled_statement() {
    let source = format!("\n        // {DIRECTIVE}\n        styled.h1`\n          color: hotpink;\n        `;\n      ");
    assert!(parse(&source).is_empty());
}

#[test]
fn test_disabled_statement_deep_in_expression() {
    let source = format!(
        "\n        // {DIRECTIVE}\n        someFunction([a, b, styled.h1`\n          color: hotpink;\n        `]);\n      "
    );
    assert!(parse(&source).is_empty());
}

#[test]
fn test_directive_only_covers_next_statement() {
    let source = format!(
        "// {DIRECTIVE}\nconst A = styled.div`a: b;`;\nconst B = styled.div`c: d;`;\n"
    );
    let document = parse(&source);

    assert_eq!(document.roots.len(), 1);
    assert_eq!(document.roots[0].declarations()[0].prop, "c");
    assert_eq!(document.roots[0].leading_text, format!("// {DIRECTIVE}\nconst A = styled.div`a: b;`;\nconst B = styled.div`"));
}

#[test]
fn test_other_comments_do_not_disable() {
    let source = "// eslint-disable-next-line\nconst A = styled.div`a: b;`;\n";
    assert_eq!(parse(source).roots.len(), 1);
}

#[test]
fn test_invalid_block_is_skipped() {
    let source = "\n        styled.h1`\n          .foo { /* absolute nonsense */\n        `;\n      ";
    let document = parse(source);

    assert!(document.is_empty());
    assert_eq!(document.skipped.len(), 1);
    assert!(matches!(document.skipped[0].reason, SkipReason::Parse(_)));
    assert_eq!(document.skipped[0].range.start.line, 2);

    let diagnostics = document.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, DiagnosticSeverity::Warning);
    assert_eq!(diagnostics[0].source, "tagstyle");
}

#[test]
fn test_empty_template_keeps_a_root() {
    let source = "\n        styled.h1``;\n      ";
    let document = parse(source);

    assert_eq!(document.roots.len(), 1);
    assert!(document.roots[0].nodes.is_empty());
    assert_eq!(document.roots[0].leading_text, "\n        styled.h1`");
}

#[test]
fn test_nested_template_is_reported() {
    let source = "const A = styled.div`\n  ${(p) => p.on && css`color: red;`}\n  margin: 0;\n`;\n";
    let document = parse(source);

    assert_eq!(document.roots.len(), 1);
    assert_eq!(document.skipped.len(), 1);
    assert_eq!(document.skipped[0].reason, SkipReason::Nested);
    assert_eq!(document.diagnostics()[0].severity, DiagnosticSeverity::Information);
    assert_eq!(document.roots[0].declarations()[0].prop, "margin");
}

#[test]
fn test_parse_never_maps() {
    let syntax = tagstyle::syntax::SyntaxRegistry::default()
        .build("styled-components", &tagstyle::style::DialectRegistry::default())
        .unwrap();
    let options = tagstyle::style::ParseOptions {
        from: Some("button.tsx".to_string()),
        map: true,
    };
    let document = syntax.parse_with("css`a: b;`", &options).unwrap();
    assert_eq!(document.roots[0].from.as_deref(), Some("button.tsx"));
}

#[test]
fn test_expression_in_value() {
    let source = "styled.h1`color: ${expr};`";
    let document = parse(source);

    assert!(document.skipped.is_empty());
    assert_eq!(document.roots.len(), 1);
    assert_eq!(document.roots[0].declarations()[0].value, "/*STYLE_EXPR:0*/");
    assert_eq!(tagstyle::stringify(&document), source);
}

#[test]
fn test_style_comments_are_nodes() {
    let source = "css`a: b; /* c */ /** d **/`";
    let document = parse(source);

    assert!(document.skipped.is_empty());
    let texts: Vec<_> = document.roots[0]
        .nodes
        .iter()
        .filter_map(|node| match node {
            Node::Comment(comment) => Some(comment.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec![" c ", "* d *"]);
}
