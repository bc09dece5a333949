use anyhow::Result;

use stencil_core::context::Context;
use stencil_core::processor::TemplateProcessor;

use crate::output;

/// Print every registered condition with its value for this context.
pub fn run(context: &Context) -> Result<()> {
    let processor = TemplateProcessor::new(context);
    let conditions = processor.conditions();

    output::print_header("stencil conditions");
    for name in conditions.names() {
        let state = if conditions.evaluate(name) { "yes" } else { "no" };
        output::print_key_value(name, state);
    }
    Ok(())
}
