//! Command handlers for the `keel` CLI.
//!
//! The `*_file` functions own the process: they read the file, print the
//! result and exit with status 1 on failure. The listing and run helpers
//! underneath return their results so tests can drive them directly.

use std::io::IsTerminal;

use keel_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use keel_diagnostic::Diagnostic;

mod debug;
mod run;

pub use debug::{lex_file, lex_listing, parse_file, parse_listing};
pub use run::{run_file, run_source};

/// Render a diagnostic without color, quoting `source`.
pub fn render_diagnostic(diagnostic: &Diagnostic, source: &str) -> String {
    let mut emitter =
        TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false).with_source(source);
    emitter.emit(diagnostic);
    emitter.flush();
    String::from_utf8_lossy(&emitter.into_inner()).into_owned()
}

/// Write a diagnostic to stderr and exit with status 1.
fn fail(diagnostic: &Diagnostic, source: &str) -> ! {
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(ColorMode::Auto, is_tty).with_source(source);
    emitter.emit(diagnostic);
    emitter.flush();
    std::process::exit(1);
}

/// Read a source file or exit with status 1.
fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests;
