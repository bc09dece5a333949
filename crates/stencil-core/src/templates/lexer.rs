//! Splits template text into literal runs and `{{...}}` directives.
//!
//! Recognised directives:
//! - `{{NAME}}` where `NAME` matches `[A-Z][A-Z0-9_]*`, unless directly preceded by `$`
//! - `{{#IF_X}}` and `{{/IF_X}}` where `X` matches `[A-Z_]+`
//! - `{{#ELSE}}`
//!
//! Anything else, including `${{ ... }}` expressions and lowercase names, is literal text.

use once_cell::sync::Lazy;
use regex::Regex;

static DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{(?:#(IF_[A-Z_]+)|/(IF_[A-Z_]+)|#(ELSE)|([A-Z][A-Z0-9_]*))\}\}").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Text,
    Variable(&'a str),
    Open(&'a str),
    Close(&'a str),
    Else,
}

/// A slice of the source together with what it means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    /// Exact source text of the token.
    pub text: &'a str,
    /// Byte offset of `text` in the source.
    pub offset: usize,
}

pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for caps in DIRECTIVE.captures_iter(source) {
        let Some(whole) = caps.get(0) else { continue };

        let kind = if let Some(name) = caps.get(1) {
            TokenKind::Open(name.as_str())
        } else if let Some(name) = caps.get(2) {
            TokenKind::Close(name.as_str())
        } else if caps.get(3).is_some() {
            TokenKind::Else
        } else if let Some(name) = caps.get(4) {
            // `${{NAME}}` belongs to CI expression syntax, not to us.
            if source[..whole.start()].ends_with('$') {
                continue;
            }
            TokenKind::Variable(name.as_str())
        } else {
            continue;
        };

        if whole.start() > cursor {
            tokens.push(Token {
                kind: TokenKind::Text,
                text: &source[cursor..whole.start()],
                offset: cursor,
            });
        }
        tokens.push(Token {
            kind,
            text: whole.as_str(),
            offset: whole.start(),
        });
        cursor = whole.end();
    }

    if cursor < source.len() {
        tokens.push(Token {
            kind: TokenKind::Text,
            text: &source[cursor..],
            offset: cursor,
        });
    }
    tokens
}

/// 1-based line number and full line text containing byte `offset`.
pub fn locate(source: &str, offset: usize) -> (usize, &str) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let start = before.rfind('\n').map_or(0, |i| i + 1);
    let end = source[offset..]
        .find('\n')
        .map_or(source.len(), |i| offset + i);
    (line, &source[start..end])
}
