//! Fixtures shared by the unit tests.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use lark_diagnostic::{Diagnostic, ErrorCode};
use lark_ir::{BufferId, Module, Name, SourceMap, Span, StringInterner};

use crate::{parse_into_module, Cursor, ParseOptions, ParseSession, Parser};

/// One buffer plus everything needed to parse it.
pub(crate) struct Fixture {
    pub sources: SourceMap,
    pub interner: StringInterner,
    pub buffer: BufferId,
}

impl Fixture {
    pub fn new(text: &str) -> Self {
        let mut sources = SourceMap::new();
        let buffer = sources.add_buffer("test.lark", text).unwrap();
        Fixture {
            sources,
            interner: StringInterner::new(),
            buffer,
        }
    }

    /// Run `f` on a parser at the start of the buffer.
    pub fn with_parser<R>(
        &self,
        options: ParseOptions,
        f: impl FnOnce(&mut Parser<'_, '_>) -> R,
    ) -> (R, Module, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let mut module = Module::new();
        let result = {
            let mut session =
                ParseSession::new(&self.sources, &self.interner, &mut diagnostics, options);
            let cursor = Cursor::for_buffer(self.sources.buffer(self.buffer));
            let mut parser = Parser::new(&mut session, &mut module, cursor);
            f(&mut parser)
        };
        (result, module, diagnostics)
    }

    /// Parse the whole buffer into a fresh module.
    pub fn parse(&self, options: ParseOptions) -> (Module, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let mut module = Module::new();
        {
            let mut session =
                ParseSession::new(&self.sources, &self.interner, &mut diagnostics, options);
            let _ = parse_into_module(&mut session, &mut module, self.buffer);
        }
        (module, diagnostics)
    }

    pub fn text(&self, span: Span) -> &str {
        self.sources.buffer(self.buffer).slice(span)
    }

    /// Global offset of the first occurrence of `needle`.
    pub fn offset_of(&self, needle: &str) -> u32 {
        let buffer = self.sources.buffer(self.buffer);
        buffer.global(buffer.text().find(needle).unwrap())
    }

    pub fn name(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }
}

pub(crate) fn codes(diagnostics: &[Diagnostic]) -> Vec<ErrorCode> {
    diagnostics.iter().map(|d| d.code).collect()
}
