//! Terminal Emitter
//!
//! Human-readable diagnostic output with source snippets and optional ANSI
//! color support.

use std::io::{self, Write};

use lark_ir::SourceMap;

use crate::{Diagnostic, Label};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when writing to a terminal.
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

/// Renders diagnostics as text.
pub struct TerminalEmitter<'s, W: Write> {
    writer: W,
    sources: &'s SourceMap,
    colors: bool,
}

impl<'s, W: Write> TerminalEmitter<'s, W> {
    pub fn with_color_mode(writer: W, sources: &'s SourceMap, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            sources,
            colors: mode.should_use_colors(is_tty),
        }
    }

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

    fn write_label(&mut self, label: &Label) {
        let marker = if label.is_primary { "-->" } else { ":::" };
        let Some(id) = self.sources.find_buffer_containing(label.span.start) else {
            let _ = writeln!(self.writer, "  {marker} {:?}: {}", label.span, label.message);
            return;
        };
        let buffer = self.sources.buffer(id);
        let (line, col) = buffer.line_col(label.span.start);
        let text = buffer.line_text(line);

        let _ = writeln!(self.writer, "  {marker} {}:{line}:{col}", buffer.name());
        let width = line.to_string().len() + 1;
        let _ = writeln!(self.writer, "{:>width$} |", "");
        let _ = writeln!(self.writer, "{line:>width$} | {text}");

        let col = col as usize;
        let available = text.len().saturating_sub(col - 1).max(1);
        let carets = (label.span.len() as usize).clamp(1, available);
        let (ch, color) = if label.is_primary {
            ('^', colors::ERROR)
        } else {
            ('-', colors::SECONDARY)
        };
        let _ = write!(self.writer, "{:>width$} | {}", "", " ".repeat(col - 1));
        let underline = format!("{} {}", ch.to_string().repeat(carets), label.message);
        self.write_colored(&underline, color);
        let _ = writeln!(self.writer);
    }
}

/// Trait for diagnostic output formats.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }

    fn flush(&mut self);

    /// Closing line: "error: aborting due to N previous errors".
    fn emit_summary(&mut self, error_count: usize);
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: error[CODE]: message
        self.write_colored("error", colors::ERROR);
        if self.colors {
            let _ = write!(
                self.writer,
                "{}[{}]{}",
                colors::BOLD,
                diagnostic.code,
                colors::RESET
            );
        } else {
            let _ = write!(self.writer, "[{}]", diagnostic.code);
        }
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.write_label(label);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        for fix in &diagnostic.fixes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("help", colors::HELP);
            let _ = writeln!(self.writer, ": {}", fix.message);
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize) {
        if error_count == 0 {
            return;
        }
        self.write_colored("error", colors::ERROR);
        if error_count == 1 {
            let _ = writeln!(self.writer, ": aborting due to previous error");
        } else {
            let _ = writeln!(self.writer, ": aborting due to {error_count} previous errors");
        }
    }
}

/// Terminal emitter over stderr.
pub fn stderr_emitter(sources: &SourceMap, mode: ColorMode, is_tty: bool) -> TerminalEmitter<'_, io::Stderr> {
    TerminalEmitter::with_color_mode(io::stderr(), sources, mode, is_tty)
}
