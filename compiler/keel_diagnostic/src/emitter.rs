//! Terminal rendering of diagnostics.
//!
//! Human-readable output with optional ANSI color support. When the source
//! text is available the offending line is quoted with a caret under the
//! reported column.

use std::io::{self, Write};

use crate::{Diagnostic, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Trait for emitting diagnostics.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Flush any buffered output.
    fn flush(&mut self);
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    colors: bool,
    source: Option<&'src str>,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Quote lines from `source` under each positioned diagnostic.
    #[must_use]
    pub fn with_source(mut self, source: &'src str) -> Self {
        self.source = Some(source);
        self
    }

    /// Consume the emitter and hand back its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_snippet(&mut self, line: u32, column: u32) {
        let Some(text) = self
            .source
            .and_then(|src| src.lines().nth(line.saturating_sub(1) as usize))
        else {
            return;
        };
        let gutter = line.to_string();
        let pad = " ".repeat(gutter.len());
        self.write_colored(&format!("{pad} |\n{gutter} | "), colors::SECONDARY);
        let _ = writeln!(self.writer, "{text}");
        self.write_colored(&format!("{pad} | "), colors::SECONDARY);
        let caret = format!("{}^", " ".repeat(column.saturating_sub(1) as usize));
        self.write_colored(&caret, colors::ERROR);
        let _ = writeln!(self.writer);
    }
}

impl TerminalEmitter<'_, io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let severity_color = match diagnostic.severity {
            Severity::Error => colors::ERROR,
            Severity::Note => colors::NOTE,
        };
        self.write_colored(
            &format!("{}[{}]", diagnostic.severity, diagnostic.code),
            severity_color,
        );
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        if let Some(pos) = &diagnostic.position {
            self.write_colored("  --> ", colors::SECONDARY);
            let _ = writeln!(self.writer, "{pos}");
            self.write_snippet(pos.line, pos.column);
        }

        for note in &diagnostic.notes {
            self.write_colored("  = note", colors::NOTE);
            let _ = writeln!(self.writer, ": {note}");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
