//! Command handlers for the Lark CLI.
//!
//! Each submodule implements one command. Shared utilities like
//! `read_file` and `report_diagnostics` live here in the module root.

use std::io::IsTerminal;

use lark_diagnostic::emitter::{stderr_emitter, ColorMode, DiagnosticEmitter};
use lark_diagnostic::DiagnosticQueue;
use lark_ir::{BufferId, SourceMap};

mod complete;
mod debug;

pub use complete::{
    complete_file, find_completions, insert_marker, CompleteError, Completion, CompletionKind,
};
pub use debug::{lex_file, parse_file, ParseFlags};

/// Read a source file, exiting with a message if it cannot be read.
pub(crate) fn read_file(path: &str) -> String {
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

/// Register `content` as the only buffer of a new source map.
pub(crate) fn load_source(path: &str, content: String) -> (SourceMap, BufferId) {
    let mut sources = SourceMap::new();
    match sources.add_buffer(path, content) {
        Ok(buffer) => (sources, buffer),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

/// Render queued diagnostics to stderr. Returns `true` if there were none.
pub(crate) fn report_diagnostics(sources: &SourceMap, queue: &mut DiagnosticQueue) -> bool {
    let error_count = queue.error_count();
    let diagnostics = queue.flush();
    if diagnostics.is_empty() {
        return true;
    }

    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = stderr_emitter(sources, ColorMode::Auto, is_tty);
    emitter.emit_all(&diagnostics);
    emitter.emit_summary(error_count);
    emitter.flush();
    error_count == 0
}
