//! Host-language token definitions
//!
//! Only the distinctions the template scanner cares about are made. Template
//! literals and regular expressions are not tokens here; the scanner reads
//! them by hand from the lexer remainder because both depend on context.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostToken {
    #[regex(r"[ \t\x0B\x0C]+")]
    Whitespace,

    #[regex(r"\r\n|\n|\r")]
    Newline,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Identifier,

    #[regex(r"#[A-Za-z_$][A-Za-z0-9_$]*")]
    PrivateName,

    #[regex(r"[0-9][0-9A-Za-z_.]*")]
    #[regex(r"\.[0-9][0-9A-Za-z_]*")]
    Number,

    #[regex(r#""([^"\\\r\n]|\\(.|\r?\n))*""#)]
    #[regex(r"'([^'\\\r\n]|\\(.|\r?\n))*'")]
    String,

    #[token("`")]
    Backtick,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(".")]
    Dot,

    #[token("?.")]
    OptionalChain,

    #[token("...")]
    Spread,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token("/")]
    #[token("/=")]
    Slash,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("=>")]
    Arrow,

    #[regex(r"[-+*%=&|^!~?:@]+")]
    Operator,
}

impl HostToken {
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            HostToken::Whitespace
                | HostToken::Newline
                | HostToken::LineComment
                | HostToken::BlockComment
        )
    }

    /// Tokens after which a newline can end a statement
    pub fn ends_expression(&self) -> bool {
        matches!(
            self,
            HostToken::Identifier
                | HostToken::PrivateName
                | HostToken::Number
                | HostToken::String
                | HostToken::RParen
                | HostToken::RBracket
                | HostToken::RBrace
                | HostToken::Backtick
        )
    }
}

/// Keywords after which a `/` starts a regular expression
pub const REGEX_KEYWORDS: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "in",
    "of",
    "new",
    "delete",
    "void",
    "throw",
    "case",
    "do",
    "else",
    "yield",
    "await",
];
