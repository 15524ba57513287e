//! Styled echo of a command line before it runs.

use std::io::{self, Write};

use colored::Colorize;

/// Renders `command [arg1 arg2]` with the name in bold green and the
/// argument list in bold cyan.
#[must_use]
pub fn render(command: &str, args: &[String]) -> String {
    let arg_list = format!("[{}]", args.join(" "));
    format!("{} {}", command.green().bold(), arg_list.cyan().bold())
}

/// Writes a blank line followed by the rendered command line.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_echo<W: Write>(out: &mut W, command: &str, args: &[String]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", render(command, args))?;
    out.flush()
}
