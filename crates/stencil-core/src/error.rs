//! Unified error types for the stencil template engine.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// All hard errors that can occur while processing a template.
///
/// Unknown conditions are not represented here: they are recovered locally,
/// logged, and evaluate to `false`.
#[derive(Error, Debug)]
pub enum TemplateError {
    // --- Files ---

    /// The input template does not exist.
    #[error("template file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The input template exists but could not be read (permissions, invalid UTF-8).
    #[error("failed to read template {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output could not be written, including creation of its parent directory.
    #[error("failed to write output {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Directives ---

    /// Conditional directives are not properly paired.
    #[error("{message} (line {line})")]
    Syntax {
        message: String,
        path: Option<PathBuf>,
        line: usize,
        snippet: String,
    },

    /// Conditional blocks are nested deeper than the engine allows.
    #[error("conditional nesting exceeds {max} levels (line {line})")]
    NestingTooDeep {
        max: usize,
        path: Option<PathBuf>,
        line: usize,
        snippet: String,
    },

    // --- Context ---

    /// A context file could not be loaded.
    #[error("failed to load context from {}: {message}", path.display())]
    Context { path: PathBuf, message: String },
}

impl TemplateError {
    /// The file the error refers to, if known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Context { path, .. } => Some(path.as_path()),
            Self::Syntax { path, .. } | Self::NestingTooDeep { path, .. } => path.as_deref(),
        }
    }

    /// 1-based line of the offending directive, for directive errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } | Self::NestingTooDeep { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Source line containing the offending directive, for directive errors.
    pub fn snippet(&self) -> Option<&str> {
        match self {
            Self::Syntax { snippet, .. } | Self::NestingTooDeep { snippet, .. } => Some(snippet.as_str()),
            _ => None,
        }
    }

    /// Render a multi-line, human-readable diagnostic.
    ///
    /// ```text
    /// closing {{/IF_GO}} does not match open {{#IF_PYTHON}} (line 3)
    /// File: templates/pyproject.toml.tmpl
    /// Line: 3
    ///   → {{/IF_GO}}
    /// ```
    pub fn diagnostic(&self) -> String {
        let mut lines = vec![self.to_string()];
        if let Some(path) = self.path() {
            lines.push(format!("File: {}", path.display()));
        }
        if let Some(line) = self.line() {
            lines.push(format!("Line: {line}"));
        }
        if let Some(snippet) = self.snippet() {
            let snippet = snippet.trim();
            if !snippet.is_empty() {
                lines.push(format!("  → {snippet}"));
            }
        }
        lines.join("\n")
    }
}

/// Alias for `Result<T, TemplateError>`.
pub type Result<T> = std::result::Result<T, TemplateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_includes_location() {
        let err = TemplateError::Syntax {
            message: "unclosed conditional {{#IF_GO}}".into(),
            path: Some(PathBuf::from("go.mod.tmpl")),
            line: 4,
            snippet: "  {{#IF_GO}}  ".into(),
        };
        let text = err.diagnostic();
        assert!(text.starts_with("unclosed conditional {{#IF_GO}} (line 4)"));
        assert!(text.contains("File: go.mod.tmpl"));
        assert!(text.contains("Line: 4"));
        assert!(text.ends_with("  → {{#IF_GO}}"));
    }

    #[test]
    fn test_diagnostic_for_io_error_has_no_line() {
        let err = TemplateError::NotFound {
            path: PathBuf::from("missing.tmpl"),
        };
        assert_eq!(err.line(), None);
        assert_eq!(err.snippet(), None);
        assert_eq!(
            err.diagnostic(),
            "template file not found: missing.tmpl\nFile: missing.tmpl"
        );
    }

    #[test]
    fn test_read_error_keeps_source() {
        use std::error::Error as _;
        let err = TemplateError::Read {
            path: PathBuf::from("a.tmpl"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert_eq!(err.path(), Some(Path::new("a.tmpl")));
    }
}
