//! Inspection commands: `tokens` and `parse`.

use lark_diagnostic::DiagnosticQueue;
use lark_ir::{BodyState, DeclKind, Module, SourceBuffer, StringInterner};
use lark_lexer::{tokenize, TokenizeOptions};
use lark_parse::{parse_into_module, perform_delayed_parsing, ParseOptions, ParseSession};

use super::{load_source, read_file, report_diagnostics};

/// Options of the `parse` command.
#[derive(Copy, Clone, Debug, Default)]
pub struct ParseFlags {
    /// Parse every body in the first pass.
    pub eager: bool,
    /// Collect line comments.
    pub comments: bool,
}

/// Tokenize a file and display the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let (sources, buffer) = load_source(path, content);
    let source = sources.buffer(buffer);
    let options = TokenizeOptions {
        keep_comments: true,
        split_interpolated_strings: true,
    };
    let tokens = tokenize(source, source.span(), options);

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in &tokens {
        let (line, col) = source.line_col(token.span.start);
        println!(
            "  {:?} @ {line}:{col} {:?}",
            token.kind,
            source.slice(token.span)
        );
    }
}

/// Parse a file and display a summary. Returns `false` on parse errors.
pub fn parse_file(path: &str, flags: ParseFlags) -> bool {
    let content = read_file(path);
    let (sources, buffer) = load_source(path, content);
    let interner = StringInterner::new();
    let mut queue = DiagnosticQueue::new();
    let mut module = Module::new();

    let options = if flags.eager {
        ParseOptions::eager()
    } else {
        ParseOptions::delayed()
    };
    let options = options.with_comments(flags.comments);

    let delayed = {
        let mut session = ParseSession::new(&sources, &interner, &mut queue, options);
        parse_into_module(&mut session, &mut module, buffer);
        let delayed = module.unparsed_bodies().len();
        if let Err(e) = perform_delayed_parsing(&mut session, &mut module, None) {
            eprintln!("error: delayed parsing failed: {e}");
            return false;
        }
        delayed
    };

    print_summary(path, sources.buffer(buffer), &interner, &module, delayed);
    report_diagnostics(&sources, &mut queue)
}

fn print_summary(
    path: &str,
    source: &SourceBuffer,
    interner: &StringInterner,
    module: &Module,
    delayed: usize,
) {
    let decls = module.decls_in_order();
    println!("Parse result for '{path}':");
    println!("  Items: {}", module.items().len());
    println!("  Declarations: {}", decls.len());
    println!("  Delayed bodies: {delayed}");
    println!("  Expressions: {}", module.arena.expr_count());
    println!("  Comments: {}", module.comments().len());

    let functions: Vec<_> = decls
        .iter()
        .filter_map(|&id| match &module.decl(id).kind {
            DeclKind::Func(func) => Some((id, func)),
            _ => None,
        })
        .collect();
    if functions.is_empty() {
        return;
    }

    println!();
    println!("Functions:");
    for (id, func) in functions {
        let params: Vec<&str> = func.params.iter().map(|p| interner.lookup(p.name)).collect();
        let stmts = match module.body_state(id) {
            Some(BodyState::Parsed(block)) => module.arena.block(block).stmts.len().to_string(),
            Some(BodyState::Unparsed | BodyState::Parsing) => "unparsed".to_string(),
            None => "no body".to_string(),
        };
        let (line, _) = source.line_col(module.decl(id).span.start);
        println!(
            "  {} ({}) at line {line}: {stmts} statements",
            interner.lookup(func.name),
            params.join(", ")
        );
    }
}
