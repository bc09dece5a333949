use std::path::Path;

use anyhow::Result;

use stencil_core::context::Context;
use stencil_core::processor::TemplateProcessor;

use crate::output;

/// Process one template into one output file.
pub fn run(context: &Context, input: &Path, output_path: &Path) -> Result<()> {
    let processor = TemplateProcessor::new(context);
    processor.process_file(input, output_path)?;

    output::print_success(&format!(
        "{} -> {}",
        input.display(),
        output_path.display()
    ));
    Ok(())
}
