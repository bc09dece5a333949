//! CLI command implementations for stencil.
//!
//! Each module corresponds to a subcommand (`stencil <command>`).

pub mod check;
pub mod conditions;
pub mod process;
pub mod render;
pub mod vars;

use std::path::PathBuf;

use anyhow::{bail, Result};
use stencil_core::context::Context;

/// Layer context sources: environment, then JSON files in order, then `--set` assignments.
pub fn build_context(use_env: bool, files: &[PathBuf], assignments: &[String]) -> Result<Context> {
    let mut context = if use_env {
        Context::from_env()
    } else {
        Context::new()
    };

    for file in files {
        context.merge(Context::load_json(file)?);
        tracing::info!("loaded context from {}", file.display());
    }

    for assignment in assignments {
        let Some((key, value)) = Context::parse_assignment(assignment) else {
            bail!("invalid --set value '{assignment}' (expected KEY=VALUE)");
        };
        context.set(key, value);
    }

    tracing::debug!(entries = context.len(), "built template context");
    Ok(context)
}
