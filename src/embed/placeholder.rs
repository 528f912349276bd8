//! Placeholder comments standing in for `${...}` holes
//!
//! A hole becomes `/*STYLE_EXPR:<index>*/`, a block comment in every supported
//! dialect. Three operations work on the format:
//!
//! - [`create`] builds the token for an index
//! - [`find_all`] locates tokens inside arbitrary text (a selector, a value)
//! - [`parse_comment`] reads a comment body back to its index, strictly

use chumsky::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range as ByteRange;

pub const SENTINEL: &str = "STYLE_EXPR";

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\*STYLE_EXPR:([0-9]+)\*/").expect("placeholder pattern is valid"));

pub fn create(index: usize) -> String {
    format!("/*{SENTINEL}:{index}*/")
}

/// Byte length of the placeholder for `index`
pub fn len(index: usize) -> usize {
    create(index).len()
}

/// One placeholder occurrence inside a larger text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    pub index: usize,
    pub span: ByteRange<usize>,
}

/// Every placeholder in `text`, left to right
pub fn find_all(text: &str) -> Vec<Found> {
    PLACEHOLDER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let index = caps.get(1)?.as_str().parse().ok()?;
            Some(Found {
                index,
                span: whole.range(),
            })
        })
        .collect()
}

/// Replace every placeholder in `text`; `resolve` returning `None` keeps the token
pub fn substitute<'a>(text: &str, resolve: impl Fn(usize) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for found in find_all(text) {
        out.push_str(&text[last..found.span.start]);
        match resolve(found.index) {
            Some(expression) => out.push_str(expression),
            None => out.push_str(&text[found.span.clone()]),
        }
        last = found.span.end;
    }
    out.push_str(&text[last..]);
    out
}

fn comment_body() -> impl Parser<char, usize, Error = Simple<char>> {
    just(SENTINEL)
        .ignore_then(just(':'))
        .ignore_then(text::int(10))
        .try_map(|digits: String, span| {
            digits
                .parse::<usize>()
                .map_err(|e| Simple::custom(span, e.to_string()))
        })
        .padded()
        .then_ignore(end())
}

/// Index of a placeholder comment, given the text between `/*` and `*/`
pub fn parse_comment(text: &str) -> Option<usize> {
    comment_body().parse(text).ok()
}

/// Index of a complete `/*...*/` placeholder fragment
pub fn parse_fragment(fragment: &str) -> Option<usize> {
    let body = fragment.strip_prefix("/*")?.strip_suffix("*/")?;
    parse_comment(body)
}
