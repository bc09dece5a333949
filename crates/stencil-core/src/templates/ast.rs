//! Recursive-descent parser from tokens to a directive tree.
//!
//! Conditional pairs must carry identical names. A close tag that does not
//! match the innermost open tag, a close tag with no open tag, and an open tag
//! that is never closed are all syntax errors reported with line and source line.
//!
//! `{{#ELSE}}` outside any conditional, or a second `{{#ELSE}}` inside the same
//! conditional, is kept as literal text.

use std::path::Path;

use crate::error::{Result, TemplateError};
use crate::templates::lexer::{self, Token, TokenKind};

/// Deepest conditional nesting accepted by the parser.
pub const MAX_NESTING_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    /// Literal text, copied to the output unchanged.
    Text(&'a str),
    /// `{{NAME}}`; `raw` is the full placeholder text.
    Variable { name: &'a str, raw: &'a str },
    Conditional(Conditional<'a>),
}

/// `{{#IF_X}} then {{#ELSE}} otherwise {{/IF_X}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditional<'a> {
    pub name: &'a str,
    pub then_branch: Vec<Node<'a>>,
    /// Empty when the block has no `{{#ELSE}}`.
    pub else_branch: Vec<Node<'a>>,
}

/// A parsed template borrowing from its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    nodes: Vec<Node<'a>>,
}

impl<'a> Template<'a> {
    pub fn parse(source: &'a str) -> Result<Self> {
        Self::parse_with_path(source, None)
    }

    /// Parse, attributing any error to `path`.
    pub fn parse_with_path(source: &'a str, path: Option<&Path>) -> Result<Self> {
        let mut parser = Parser {
            source,
            path,
            tokens: lexer::tokenize(source).into_iter(),
        };
        let nodes = parser.parse_top_level()?;
        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    /// Names of every condition referenced anywhere in the tree, in order of appearance.
    pub fn condition_names(&self) -> Vec<&'a str> {
        fn walk<'a>(nodes: &[Node<'a>], out: &mut Vec<&'a str>) {
            for node in nodes {
                if let Node::Conditional(c) = node {
                    if !out.contains(&c.name) {
                        out.push(c.name);
                    }
                    walk(&c.then_branch, out);
                    walk(&c.else_branch, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.nodes, &mut out);
        out
    }
}

struct Parser<'a, 'p> {
    source: &'a str,
    path: Option<&'p Path>,
    tokens: std::vec::IntoIter<Token<'a>>,
}

impl<'a> Parser<'a, '_> {
    fn parse_top_level(&mut self) -> Result<Vec<Node<'a>>> {
        let mut nodes = Vec::new();
        while let Some(token) = self.tokens.next() {
            let node = match token.kind {
                TokenKind::Text | TokenKind::Else => Node::Text(token.text),
                TokenKind::Variable(name) => Node::Variable {
                    name,
                    raw: token.text,
                },
                TokenKind::Open(_) => Node::Conditional(self.parse_conditional(token, 1)?),
                TokenKind::Close(_) => {
                    return Err(self.syntax(
                        &token,
                        format!("closing {} has no matching open directive", token.text),
                    ))
                }
            };
            nodes.push(node);
        }
        Ok(nodes)
    }

    fn parse_conditional(&mut self, open: Token<'a>, depth: usize) -> Result<Conditional<'a>> {
        let TokenKind::Open(name) = open.kind else {
            return Err(self.syntax(&open, format!("expected a conditional, found {}", open.text)));
        };
        if depth > MAX_NESTING_DEPTH {
            let (line, snippet) = lexer::locate(self.source, open.offset);
            return Err(TemplateError::NestingTooDeep {
                max: MAX_NESTING_DEPTH,
                path: self.path.map(Path::to_path_buf),
                line,
                snippet: snippet.to_string(),
            });
        }

        let mut then_branch = Vec::new();
        let mut else_branch: Option<Vec<Node<'a>>> = None;

        loop {
            let Some(token) = self.tokens.next() else {
                return Err(self.syntax(&open, format!("unclosed conditional {}", open.text)));
            };
            let node = match token.kind {
                TokenKind::Close(close) if close == name => break,
                TokenKind::Close(_) => {
                    return Err(self.syntax(
                        &token,
                        format!("closing {} does not match open {}", token.text, open.text),
                    ))
                }
                TokenKind::Else if else_branch.is_none() => {
                    else_branch = Some(Vec::new());
                    continue;
                }
                TokenKind::Text | TokenKind::Else => Node::Text(token.text),
                TokenKind::Variable(var) => Node::Variable {
                    name: var,
                    raw: token.text,
                },
                TokenKind::Open(_) => {
                    Node::Conditional(self.parse_conditional(token, depth + 1)?)
                }
            };
            match else_branch.as_mut() {
                Some(branch) => branch.push(node),
                None => then_branch.push(node),
            }
        }

        Ok(Conditional {
            name,
            then_branch,
            else_branch: else_branch.unwrap_or_default(),
        })
    }

    fn syntax(&self, token: &Token<'a>, message: String) -> TemplateError {
        let (line, snippet) = lexer::locate(self.source, token.offset);
        TemplateError::Syntax {
            message,
            path: self.path.map(Path::to_path_buf),
            line,
            snippet: snippet.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditional<'a>(name: &'a str, then_branch: Vec<Node<'a>>, else_branch: Vec<Node<'a>>) -> Node<'a> {
        Node::Conditional(Conditional {
            name,
            then_branch,
            else_branch,
        })
    }

    #[test]
    fn test_parse_nested_with_else() {
        let t = Template::parse("{{#IF_A}}{{#IF_B}}XB{{#ELSE}}YB{{/IF_B}}{{#ELSE}}ZA{{/IF_A}}").unwrap();
        assert_eq!(
            t.nodes(),
            &[conditional(
                "IF_A",
                vec![conditional("IF_B", vec![Node::Text("XB")], vec![Node::Text("YB")])],
                vec![Node::Text("ZA")],
            )]
        );
        assert_eq!(t.condition_names(), vec!["IF_A", "IF_B"]);
    }

    #[test]
    fn test_stray_else_is_text() {
        let t = Template::parse("a{{#ELSE}}b").unwrap();
        assert_eq!(t.nodes(), &[Node::Text("a"), Node::Text("{{#ELSE}}"), Node::Text("b")]);
    }

    #[test]
    fn test_second_else_is_text_in_else_branch() {
        let t = Template::parse("{{#IF_A}}1{{#ELSE}}2{{#ELSE}}3{{/IF_A}}").unwrap();
        assert_eq!(
            t.nodes(),
            &[conditional(
                "IF_A",
                vec![Node::Text("1")],
                vec![Node::Text("2"), Node::Text("{{#ELSE}}"), Node::Text("3")],
            )]
        );
    }

    #[test]
    fn test_empty_branches() {
        let t = Template::parse("{{#IF_A}}{{#ELSE}}{{/IF_A}}").unwrap();
        assert_eq!(t.nodes(), &[conditional("IF_A", vec![], vec![])]);
    }

    #[test]
    fn test_mismatched_close_is_error() {
        let err = Template::parse("line one\n{{#IF_PYTHON}}\nx\n{{/IF_GO}}\n").unwrap_err();
        match err {
            TemplateError::Syntax { message, line, snippet, path } => {
                assert_eq!(line, 4);
                assert_eq!(snippet, "{{/IF_GO}}");
                assert!(message.contains("does not match open {{#IF_PYTHON}}"));
                assert!(path.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_reports_open_line() {
        let err = Template::parse_with_path("a\n\n  {{#IF_GO}} go\nb", Some(Path::new("t.tmpl"))).unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.snippet(), Some("  {{#IF_GO}} go"));
        assert_eq!(err.path(), Some(Path::new("t.tmpl")));
        assert!(err.to_string().starts_with("unclosed conditional {{#IF_GO}}"));
    }

    #[test]
    fn test_stray_close_is_error() {
        let err = Template::parse("text {{/IF_GO}}").unwrap_err();
        assert!(err.to_string().contains("has no matching open directive"));
    }

    #[test]
    fn test_nesting_limit() {
        let depth = MAX_NESTING_DEPTH;
        let ok = format!("{}x{}", "{{#IF_A}}".repeat(depth), "{{/IF_A}}".repeat(depth));
        assert!(Template::parse(&ok).is_ok());

        let deep = format!("{}x{}", "{{#IF_A}}".repeat(depth + 1), "{{/IF_A}}".repeat(depth + 1));
        let err = Template::parse(&deep).unwrap_err();
        assert!(matches!(err, TemplateError::NestingTooDeep { max, .. } if max == MAX_NESTING_DEPTH));
    }
}
