use anyhow::Result;

use stencil_core::context::Context;
use stencil_core::processor::TemplateProcessor;

use crate::output;

/// Print every resolved variable, including derived ones.
pub fn run(context: &Context, json: bool) -> Result<()> {
    let processor = TemplateProcessor::new(context);
    let variables = processor.variables();

    if json {
        println!("{}", serde_json::to_string_pretty(variables)?);
        return Ok(());
    }

    output::print_header("stencil vars");
    for (name, value) in variables.iter() {
        output::print_key_value(name, value);
    }
    Ok(())
}
