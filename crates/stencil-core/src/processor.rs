//! Template processing: conditionals, then variables, then whitespace normalization.
//!
//! ## Usage
//!
//! ```ignore
//! use stencil_core::context::Context;
//! use stencil_core::processor::TemplateProcessor;
//!
//! let processor = TemplateProcessor::new(&Context::from_env());
//! processor.process_file("templates/pyproject.toml.tmpl".as_ref(), "out/pyproject.toml".as_ref())?;
//! ```

use std::io::Write as _;
use std::path::Path;

use crate::conditions::ConditionRegistry;
use crate::context::Context;
use crate::error::{Result, TemplateError};
use crate::templates::{self, ConditionalResolver, Template};
use crate::variables::{ResolvedVariableSet, VariableRegistry};

/// Resolves templates against registries built once from a [`Context`].
///
/// Read-only after construction; one instance may process disjoint files
/// from several threads at once.
pub struct TemplateProcessor {
    variables: ResolvedVariableSet,
    conditions: ConditionRegistry,
}

impl TemplateProcessor {
    /// Build the standard variable and condition registries over `context`.
    pub fn new(context: &Context) -> Self {
        let variables = VariableRegistry::standard().resolve(context);
        let conditions = ConditionRegistry::standard(context.clone());
        Self::with_registries(variables, conditions)
    }

    pub fn with_registries(variables: ResolvedVariableSet, conditions: ConditionRegistry) -> Self {
        Self {
            variables,
            conditions,
        }
    }

    pub fn variables(&self) -> &ResolvedVariableSet {
        &self.variables
    }

    pub fn conditions(&self) -> &ConditionRegistry {
        &self.conditions
    }

    /// Process template text.
    ///
    /// Output never has trailing whitespace and always ends in exactly one newline.
    pub fn process_text(&self, text: &str) -> Result<String> {
        self.process(text, None)
    }

    /// Process `input` and write the result to `output`.
    ///
    /// Missing parent directories of `output` are created. The result is written
    /// to a temporary file next to `output` and renamed into place, so a failure
    /// never leaves partial output behind.
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<()> {
        let result = self.render_file(input)?;
        write_atomically(output, &result)?;
        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            bytes = result.len(),
            "processed template"
        );
        Ok(())
    }

    /// Process `input` and return the result without writing anything.
    pub fn render_file(&self, input: &Path) -> Result<String> {
        let text = read_template(input)?;
        self.process(&text, Some(input))
    }

    /// Validate directive structure without resolving anything.
    ///
    /// Returns the referenced condition names that are not registered; such
    /// blocks always take their `{{#ELSE}}` branch.
    pub fn check_text(&self, text: &str) -> Result<Vec<String>> {
        let template = Template::parse(text)?;
        Ok(self.unregistered_conditions(&template))
    }

    pub fn check_file(&self, input: &Path) -> Result<Vec<String>> {
        let text = read_template(input)?;
        let template = Template::parse_with_path(&text, Some(input))?;
        Ok(self.unregistered_conditions(&template))
    }

    fn unregistered_conditions(&self, template: &Template<'_>) -> Vec<String> {
        template
            .condition_names()
            .into_iter()
            .filter(|name| !self.conditions.is_registered(name))
            .map(str::to_string)
            .collect()
    }

    fn process(&self, text: &str, path: Option<&Path>) -> Result<String> {
        let resolved = ConditionalResolver::new(&self.conditions).resolve_with_path(text, path)?;
        let substituted = templates::substitute(&resolved, &self.variables);
        Ok(normalize_trailing_whitespace(&substituted))
    }
}

/// Strip all trailing whitespace and append a single newline.
pub fn normalize_trailing_whitespace(text: &str) -> String {
    let mut out = text.trim_end().to_string();
    out.push('\n');
    out
}

fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => TemplateError::NotFound {
            path: path.to_path_buf(),
        },
        _ => TemplateError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

fn write_atomically(output: &Path, contents: &str) -> Result<()> {
    let write_err = |source: std::io::Error| TemplateError::Write {
        path: output.to_path_buf(),
        source,
    };

    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_err)?;

    let mut tmp = temp_file_for(output, parent).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(output).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// A temporary file in `parent` carrying the mode the output should end up with:
/// the current mode of an existing `output`, otherwise `0o666` less the umask.
fn temp_file_for(output: &Path, parent: &Path) -> std::io::Result<tempfile::NamedTempFile> {
    #[allow(unused_mut)]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(parent)?;
    if let Ok(existing) = std::fs::metadata(output) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    Ok(tmp)
}
