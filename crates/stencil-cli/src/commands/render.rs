use std::io::Write;
use std::path::Path;

use anyhow::{Context as _, Result};

use stencil_core::context::Context;
use stencil_core::processor::TemplateProcessor;

/// Process a template and print the result to stdout.
pub fn run(context: &Context, input: &Path) -> Result<()> {
    let processor = TemplateProcessor::new(context);
    let rendered = processor.render_file(input)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write to stdout")?;
    Ok(())
}
