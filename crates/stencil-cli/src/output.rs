//! Terminal output formatting for the stencil CLI.
//!
//! Provides consistent, colored output using the [`console`] crate. Status
//! lines go to stderr so that `stencil render` output on stdout stays clean.

use console::style;
use stencil_core::error::TemplateError;

/// Print a bold cyan header with an underline separator.
pub fn print_header(text: &str) {
    eprintln!("\n{}", style(text).bold().cyan());
    eprintln!("{}", style("=".repeat(text.chars().count())).dim());
}

/// Print a success message prefixed with green `[OK]`.
pub fn print_success(text: &str) {
    eprintln!("{} {}", style("[OK]").green().bold(), text);
}

/// Print a warning message prefixed with yellow `[WARN]`.
pub fn print_warning(text: &str) {
    eprintln!("{} {}", style("[WARN]").yellow().bold(), text);
}

/// Print an error message prefixed with red `[ERROR]`.
pub fn print_error(text: &str) {
    eprintln!("{} {}", style("[ERROR]").red().bold(), text);
}

/// Print a key-value pair with dimmed key formatting.
pub fn print_key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Report a failed command.
///
/// Template errors are shown as a full diagnostic (file, line, offending
/// source line); anything else as its error chain.
pub fn print_failure(err: &anyhow::Error) {
    match err.downcast_ref::<TemplateError>() {
        Some(template_err) => print_error(&format!("Template error: {}", template_err.diagnostic())),
        None => print_error(&format!("{err:#}")),
    }
}
