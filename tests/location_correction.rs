//! Host coordinates of parsed nodes
//!
//! Every declaration must point at its own text in the host file, both by
//! byte span and by line/column, however the template is indented and
//! whatever the `${...}` holes in front of it look like.

use tagstyle::style::{Node, Root};
use tagstyle::testing::assert_located;

fn first_root(source: &str) -> Root {
    let mut document = tagstyle::parse(source).unwrap();
    assert!(!document.roots.is_empty(), "no style block in {source:?}");
    document.roots.remove(0)
}

#[test]
fn test_basic_declaration() {
    let source = "\n      styled.div`\n        color: hotpink;\n      `;\n    ";
    let root = first_root(source);
    let colour = root.declarations()[0];

    assert_located(source, colour.source.as_ref().unwrap())
        .text("color: hotpink;")
        .starts_at(3, 9)
        .ends_at(3, 24);
}

#[test]
fn test_multi_line_block() {
    let source =
        "\n      styled.div`\n        color: hotpink;\n        background: red;\n      `;\n    ";
    let root = first_root(source);
    let decls = root.declarations();

    assert_located(source, decls[0].source.as_ref().unwrap())
        .text("color: hotpink;")
        .starts_at(3, 9);
    assert_located(source, decls[1].source.as_ref().unwrap())
        .text("background: red;")
        .starts_at(4, 9)
        .ends_at(4, 25);
}

#[test]
fn test_trailing_expression_line() {
    let source = "\n      styled.div`\n        color: hotpink;\n        ${expr}\n      `;\n    ";
    let root = first_root(source);

    assert_located(source, root.declarations()[0].source.as_ref().unwrap())
        .text("color: hotpink;")
        .starts_at(3, 9);
    assert_located(source, root.nodes[1].source().unwrap()).text("${expr}");
}

#[test]
fn test_single_line_template() {
    let source = "styled.div`color: hotpink;`;";
    let root = first_root(source);

    assert_located(source, root.declarations()[0].source.as_ref().unwrap())
        .text("color: hotpink;")
        .starts_at(1, 12)
        .ends_at(1, 27);
}

#[test]
fn test_expression_before_declaration() {
    let source = "\n      styled.div`\n        ${expr}color: hotpink;\n      `;\n    ";
    let root = first_root(source);

    assert_eq!(root.nodes[0].kind(), "comment");
    assert_eq!(root.nodes[1].kind(), "decl");
    assert_located(source, root.nodes[0].source().unwrap())
        .text("${expr}")
        .starts_at(3, 9);
    assert_located(source, root.nodes[1].source().unwrap())
        .text("color: hotpink;")
        .starts_at(3, 16);
}

#[test]
fn test_several_expressions_on_one_line() {
    let source = "\n      styled.div`\n        ${expr}color: ${expr2}hotpink;\n      `;\n    ";
    let root = first_root(source);

    assert_located(source, root.nodes[1].source().unwrap())
        .text("color: ${expr2}hotpink;")
        .starts_at(3, 16)
        .ends_at(3, 39);
}

#[test]
fn test_multi_line_expression() {
    let source =
        "\n      styled.div`\n        ${\n          expr\n        }color: hotpink;\n      `;\n    ";
    let root = first_root(source);

    assert_located(source, root.nodes[0].source().unwrap()).text("${\n          expr\n        }");
    assert_located(source, root.nodes[1].source().unwrap())
        .text("color: hotpink;")
        .starts_at(5, 10);
}

#[test]
fn test_mixed_size_expressions() {
    let source = "\n      styled.div`\n        ${\n          expr\n        } ${expr2}color: hotpink;\n      `;\n    ";
    let root = first_root(source);

    assert_eq!(root.nodes.len(), 3);
    assert_located(source, root.nodes[1].source().unwrap())
        .text("${expr2}")
        .starts_at(5, 11);
    assert_located(source, root.nodes[2].source().unwrap())
        .text("color: hotpink;")
        .starts_at(5, 19);
}

#[test]
fn test_code_before_template() {
    let source =
        "\n      const foo = bar + baz;\n      styled.div`\n        color: hotpink;\n      `;\n    ";
    let root = first_root(source);

    assert_located(source, root.declarations()[0].source.as_ref().unwrap())
        .text("color: hotpink;")
        .starts_at(4, 9);
}

#[test]
fn test_line_indented_less_than_base() {
    let source = "\n      styled.div`\n  ${expr}color: hotpink;\n      `;\n    ";
    let root = first_root(source);

    assert_located(source, root.nodes[1].source().unwrap())
        .text("color: hotpink;")
        .starts_at(3, 10);
}

#[test]
fn test_nested_rule_positions() {
    let source = "const G = createGlobalStyle`\n  .foo {\n    color: ${c};\n  }\n`;\n";
    let root = first_root(source);
    let Node::Rule(rule) = &root.nodes[0] else {
        panic!("expected rule")
    };

    assert_located(source, rule.source.as_ref().unwrap())
        .text(".foo {\n    color: ${c};\n  }")
        .starts_at(2, 3)
        .ends_at(4, 4);
    assert_located(source, rule.nodes[0].source().unwrap())
        .text("color: ${c};")
        .starts_at(3, 5);
}

#[test]
fn test_tabs_in_base_indentation() {
    let source = "\tconst A = css`\n\t\ta: b;\n\t\tc: ${d};\n\t`;";
    let root = first_root(source);
    let decls = root.declarations();

    assert_located(source, decls[0].source.as_ref().unwrap())
        .text("a: b;")
        .starts_at(2, 3);
    assert_located(source, decls[1].source.as_ref().unwrap())
        .text("c: ${d};")
        .starts_at(3, 3);
}
