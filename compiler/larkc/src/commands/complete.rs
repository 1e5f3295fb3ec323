//! The `complete` command: find what a completion at a byte offset asks for.
//!
//! The completion marker (a NUL byte) is spliced into the text at the
//! offset. The first pass delays only what contains the marker, and the
//! delayed pass reports the request through the completion callbacks.

use lark_diagnostic::{DiagnosticQueue, DiagnosticSink};
use lark_ir::{BufferId, ExprId, Module, SourceBuffer, SourceMap, SourceMapError, Span, StringInterner};
use lark_parse::{
    parse_into_module, perform_delayed_parsing, CompletionCallbacks, CompletionCallbacksFactory,
    DelayContaining, DelayedError, ParseOptions, ParseSession,
};
use tracing::debug;

use super::{read_file, report_diagnostics};

/// What the user is completing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    /// Any expression.
    Expr,
    /// A member of the expression spelled `base`.
    Member { base: String },
}

/// One completion request, with the 1-based position of the marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub kind: CompletionKind,
    pub line: u32,
    pub col: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum CompleteError {
    #[error("offset {offset} is past the end of the file ({len} bytes)")]
    OutOfRange { offset: u32, len: usize },
    #[error("offset {0} is not on a character boundary")]
    NotCharBoundary(u32),
    #[error(transparent)]
    Source(#[from] SourceMapError),
    #[error(transparent)]
    Delayed(#[from] DelayedError),
}

/// Run a completion request at `offset` in the file at `path` and print
/// what it asks for. Returns `false` on failure.
pub fn complete_file(path: &str, offset: u32) -> bool {
    let content = read_file(path);
    let text = match insert_marker(&content, offset) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: {e}");
            return false;
        }
    };
    let mut sources = SourceMap::new();
    let buffer = match sources.add_buffer(path, text) {
        Ok(buffer) => buffer,
        Err(e) => {
            eprintln!("error: {e}");
            return false;
        }
    };

    let mut queue = DiagnosticQueue::new();
    let completions = match find_completions(&sources, buffer, offset, &mut queue) {
        Ok(completions) => completions,
        Err(e) => {
            eprintln!("error: {e}");
            return false;
        }
    };

    if completions.is_empty() {
        println!("No completion requested at offset {offset}");
    }
    for completion in &completions {
        match &completion.kind {
            CompletionKind::Expr => {
                println!("{}:{}: expression", completion.line, completion.col);
            }
            CompletionKind::Member { base } => {
                println!("{}:{}: member of `{base}`", completion.line, completion.col);
            }
        }
    }
    // Diagnostics are informational here: incomplete code is expected.
    report_diagnostics(&sources, &mut queue);
    true
}

/// Splice the completion marker into `text` at byte `offset`.
pub fn insert_marker(text: &str, offset: u32) -> Result<String, CompleteError> {
    let at = offset as usize;
    if at > text.len() {
        return Err(CompleteError::OutOfRange {
            offset,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(at) {
        return Err(CompleteError::NotCharBoundary(offset));
    }
    let mut out = String::with_capacity(text.len() + 1);
    out.push_str(&text[..at]);
    out.push('\0');
    out.push_str(&text[at..]);
    Ok(out)
}

/// Completion requests for the marker at local `offset` of `buffer`.
///
/// A marker in a declaration at file scope is parsed in the first pass,
/// which has no completion hooks, and yields nothing.
pub fn find_completions(
    sources: &SourceMap,
    buffer: BufferId,
    offset: u32,
    diagnostics: &mut dyn DiagnosticSink,
) -> Result<Vec<Completion>, CompleteError> {
    let source = sources.buffer(buffer);
    let marker = source.base() + offset;
    let interner = StringInterner::new();
    let mut module = Module::new();
    let options = ParseOptions::eager().with_policy(DelayContaining(marker));

    let mut session = ParseSession::new(sources, &interner, diagnostics, options);
    parse_into_module(&mut session, &mut module, buffer);
    debug!(marker, delayed = module.unparsed_bodies().len(), "first pass done");

    let mut collector = Collector {
        source,
        found: Vec::new(),
    };
    perform_delayed_parsing(&mut session, &mut module, Some(&mut collector))?;
    Ok(collector.found)
}

struct Collector<'s> {
    source: &'s SourceBuffer,
    found: Vec<Completion>,
}

impl CompletionCallbacksFactory for Collector<'_> {
    fn create_callbacks(&mut self) -> Box<dyn CompletionCallbacks + '_> {
        Box::new(Request {
            source: self.source,
            pending: Vec::new(),
            found: &mut self.found,
        })
    }
}

/// Callbacks for one delayed body. Member bases are only spelled out once
/// the body is done, since the module is not reachable before that.
struct Request<'a> {
    source: &'a SourceBuffer,
    pending: Vec<(Option<ExprId>, Span)>,
    found: &'a mut Vec<Completion>,
}

impl CompletionCallbacks for Request<'_> {
    fn complete_expr(&mut self, at: Span) {
        self.pending.push((None, at));
    }

    fn complete_member(&mut self, base: ExprId, at: Span) {
        self.pending.push((Some(base), at));
    }

    fn done_parsing(&mut self, module: &Module) {
        for (base, at) in self.pending.drain(..) {
            let kind = match base {
                Some(base) => CompletionKind::Member {
                    base: self.source.slice(module.arena.expr(base).span).to_string(),
                },
                None => CompletionKind::Expr,
            };
            let (line, col) = self.source.line_col(at.start);
            self.found.push(Completion { kind, line, col });
        }
    }
}
