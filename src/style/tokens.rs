//! Style-sheet tokenization
//!
//! One token set serves every built-in dialect; dialects differ only in how
//! the parser treats some tokens (`//` comments, for instance). Tokens are
//! lossless: concatenating their slices gives the input back.

use super::error::StyleParseError;
use crate::position::SourceLocation;
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleToken {
    #[regex(r"[ \t\n\r\x0C]+")]
    Space,

    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    Comment,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r#""([^"\\\n]|\\(.|\n))*""#)]
    #[regex(r"'([^'\\\n]|\\(.|\n))*'")]
    Str,

    #[regex(r#"[uU][rR][lL]\([^)"'\n]*\)"#)]
    Url,

    #[token("{")]
    OpenCurly,

    #[token("}")]
    CloseCurly,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("[")]
    OpenSquare,

    #[token("]")]
    CloseSquare,

    #[regex(r"@[A-Za-z0-9_-]*")]
    AtWord,

    /// `#{...}` (SCSS) or `@{...}` (LESS)
    #[regex(r"#\{[^}\n]*\}")]
    #[regex(r"@\{[^}\n]*\}")]
    Interpolation,

    #[regex(r#"([^ \t\n\r\x0C{};:()\[\]"'/@#\\]|\\(.|\n))+"#)]
    Word,

    #[token("/")]
    #[token("#")]
    Delim,
}

pub type Spanned = (StyleToken, std::ops::Range<usize>);

/// Tokenize style text, failing on text no token can describe
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, StyleParseError> {
    let mut lexer = StyleToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(StyleToken::Delim) if source[span.end..].starts_with('*') && lexer.slice() == "/" => {
                let location = SourceLocation::new(source);
                return Err(StyleParseError::UnclosedComment {
                    position: location.byte_to_position(span.start),
                });
            }
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                let location = SourceLocation::new(source);
                let position = location.byte_to_position(span.start);
                let text = &source[span.clone()];
                return Err(if text.starts_with("/*") {
                    StyleParseError::UnclosedComment { position }
                } else if text.starts_with('"') || text.starts_with('\'') {
                    StyleParseError::UnclosedString { position }
                } else {
                    StyleParseError::UnexpectedCharacter {
                        text: text.to_string(),
                        position,
                    }
                });
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    fn kinds(source: &str) -> Vec<StyleToken> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_declaration_tokens() {
        assert_eq!(
            kinds("color: red;"),
            vec![
                StyleToken::Word,
                StyleToken::Colon,
                StyleToken::Space,
                StyleToken::Word,
                StyleToken::Semicolon,
            ]
        );
    }

    #[test]
    fn test_placeholder_is_one_comment() {
        let tokens = tokenize("a: /*STYLE_EXPR:0*/;").unwrap();
        assert_eq!(tokens[3], (StyleToken::Comment, 3..19));
    }

    #[test]
    fn test_url_and_interpolation() {
        assert_eq!(
            kinds("url(a/b.png) #{$x} @{y}"),
            vec![
                StyleToken::Url,
                StyleToken::Space,
                StyleToken::Interpolation,
                StyleToken::Space,
                StyleToken::Interpolation,
            ]
        );
    }

    #[test]
    fn test_escapes_stay_in_words() {
        assert_eq!(kinds(r".a\:b"), vec![StyleToken::Word]);
        assert_eq!(kinds(r"a\ b"), vec![StyleToken::Word]);
    }

    #[test]
    fn test_slices_concatenate_to_input() {
        let source = ".a > b::x { font: 12px/1.5 \"x;y\"; } // c\n@media (x) {}";
        let joined: String = tokenize(source)
            .unwrap()
            .into_iter()
            .map(|(_, span)| &source[span])
            .collect();
        assert_eq!(joined, source);
    }

    #[test]
    fn test_block_comments() {
        for comment in ["/**/", "/* a */", "/** a **/", "/* * / */", "/*STYLE_EXPR:12*/"] {
            let source = format!("a{comment}b");
            let tokens = tokenize(&source).unwrap();
            assert_eq!(tokens[1], (StyleToken::Comment, 1..1 + comment.len()), "{comment}");
            assert_eq!(tokens.len(), 3);
        }
        assert_eq!(
            kinds("/* a */ b /* c */"),
            vec![
                StyleToken::Comment,
                StyleToken::Space,
                StyleToken::Word,
                StyleToken::Space,
                StyleToken::Comment,
            ]
        );
    }

    #[test]
    fn test_unclosed_comment() {
        assert_eq!(
            tokenize("a { /* nope").unwrap_err(),
            StyleParseError::UnclosedComment {
                position: Position::new(1, 5)
            }
        );
        assert_eq!(
            tokenize("a: b;\n/** x *").unwrap_err(),
            StyleParseError::UnclosedComment {
                position: Position::new(2, 1)
            }
        );
    }

    #[test]
    fn test_unclosed_string() {
        assert!(matches!(
            tokenize("content: \"abc\n"),
            Err(StyleParseError::UnclosedString { .. })
        ));
    }
}
