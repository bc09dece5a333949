use std::path::PathBuf;

use anyhow::{bail, Result};

use stencil_core::context::Context;
use stencil_core::processor::TemplateProcessor;

use crate::output;

/// Parse each template and report malformed conditional blocks.
///
/// Conditions that are referenced but not registered are reported as
/// warnings; those blocks always render their `{{#ELSE}}` branch.
///
/// Every input is checked even after a failure; the command fails if any did.
pub fn run(context: &Context, inputs: &[PathBuf]) -> Result<()> {
    let processor = TemplateProcessor::new(context);

    let mut failed = 0;
    for input in inputs {
        match processor.check_file(input) {
            Ok(unregistered) => {
                output::print_success(&input.display().to_string());
                for name in unregistered {
                    output::print_warning(&format!("unknown condition {name} in {}", input.display()));
                }
            }
            Err(err) => {
                failed += 1;
                output::print_error(&err.diagnostic());
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} templates failed the check", inputs.len());
    }
    Ok(())
}
