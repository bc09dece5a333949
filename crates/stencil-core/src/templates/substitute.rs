//! `{{NAME}}` placeholder substitution.
//!
//! Placeholders whose name is not in the [`ResolvedVariableSet`] are left
//! byte-for-byte unchanged, as is `${{...}}` syntax. Must run after
//! conditional resolution so that only placeholders in selected branches are
//! substituted.

use crate::templates::lexer::{self, TokenKind};
use crate::variables::ResolvedVariableSet;

pub fn substitute(text: &str, variables: &ResolvedVariableSet) -> String {
    let mut out = String::with_capacity(text.len());
    for token in lexer::tokenize(text) {
        match token.kind {
            TokenKind::Variable(name) => match variables.get(name) {
                Some(value) => out.push_str(value),
                None => {
                    tracing::trace!(variable = name, "leaving undeclared placeholder in place");
                    out.push_str(token.text);
                }
            },
            _ => out.push_str(token.text),
        }
    }
    out
}
