//! Delayed parsing of function bodies and top-level code.
//!
//! The first pass can leave a body `Unparsed` and record where it starts in
//! the session's `PersistentParserState`. The entry points here find those
//! bodies in a module and parse them with a fresh cursor restored to the
//! recorded position. Each body moves `Unparsed -> Parsing -> Parsed`
//! exactly once.

use std::fmt;

use lark_ir::{BodyState, DeclId, DeclKind, Module, Span};
use tracing::debug;

use crate::completion::{CompletionCallbacks, CompletionCallbacksFactory};
use crate::cursor::CursorError;
use crate::state::StateError;
use crate::{Cursor, ParseSession, Parser};

/// Decides which bodies the first pass leaves for later.
pub trait DelayedParsingPolicy: fmt::Debug {
    /// Whether to delay the function body spanning `body` (braces included).
    fn delay_body(&self, body: Span) -> bool;

    /// Whether `delay_top_level` should be asked at all. Answering it needs
    /// the extent of each top-level statement, which costs a skip.
    fn wants_top_level(&self) -> bool {
        false
    }

    /// Whether to make the top-level statement spanning `stmt` the delayed
    /// top-level entry.
    fn delay_top_level(&self, stmt: Span) -> bool {
        let _ = stmt;
        false
    }

    /// Whether `delay_body` is always `false`, so the first pass need not
    /// measure bodies.
    fn never_delays(&self) -> bool {
        false
    }
}

/// Delay every function body.
#[derive(Copy, Clone, Debug, Default)]
pub struct DelayAll;

impl DelayedParsingPolicy for DelayAll {
    fn delay_body(&self, _body: Span) -> bool {
        true
    }
}

/// Parse everything in the first pass.
#[derive(Copy, Clone, Debug, Default)]
pub struct DelayNone;

impl DelayedParsingPolicy for DelayNone {
    fn delay_body(&self, _body: Span) -> bool {
        false
    }

    fn never_delays(&self) -> bool {
        true
    }
}

/// Completion mode: delay only what contains the completion offset.
///
/// The function body containing the offset is delayed, and so is the
/// top-level statement containing it, as the delayed top-level entry.
/// Everything else is parsed in the first pass.
#[derive(Copy, Clone, Debug)]
pub struct DelayContaining(pub u32);

impl DelayedParsingPolicy for DelayContaining {
    fn delay_body(&self, body: Span) -> bool {
        body.contains_inclusive(self.0)
    }

    fn wants_top_level(&self) -> bool {
        true
    }

    fn delay_top_level(&self, stmt: Span) -> bool {
        stmt.contains_inclusive(self.0)
    }
}

/// Misuse of the delayed engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DelayedError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Cursor(#[from] CursorError),
    #[error("the body of {0:?} is already parsed")]
    AlreadyParsed(DeclId),
    #[error("the body of {0:?} is being parsed")]
    InProgress(DeclId),
    #[error("{0:?} has no delayable body")]
    NotDelayed(DeclId),
    #[error("no buffer contains offset {0}")]
    NoBuffer(u32),
    #[error("no delayed top-level entry is pending")]
    NoPendingTopLevel,
}

/// What a delayed walk did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DelayedStats {
    /// Bodies parsed by this walk.
    pub parsed: usize,
    /// Unparsed bodies this walk chose to leave alone.
    pub skipped: usize,
}

/// Parse the delayed body of one declaration.
///
/// Moves the body from `Unparsed` to `Parsed`, consuming its recorded
/// position. The position stays recorded if the cursor cannot be restored
/// to it. `completion` is told when the body is done.
pub fn parse_delayed_body(
    session: &mut ParseSession<'_>,
    module: &mut Module,
    decl: DeclId,
    mut completion: Option<&mut dyn CompletionCallbacks>,
) -> Result<(), DelayedError> {
    match module.body_state(decl) {
        Some(BodyState::Unparsed) => {}
        Some(BodyState::Parsing) => return Err(DelayedError::InProgress(decl)),
        Some(BodyState::Parsed(_)) => return Err(DelayedError::AlreadyParsed(decl)),
        None => return Err(DelayedError::NotDelayed(decl)),
    }
    let is_top_level = matches!(module.decl(decl).kind, DeclKind::TopLevelCode(_));

    let position = if is_top_level {
        let (entry, position) = session.state.top_level_entry()?;
        if entry != decl {
            return Err(DelayedError::NotDelayed(decl));
        }
        position
    } else {
        session.state.position(decl)?
    };

    let sources = session.sources;
    let buffer = sources
        .find_buffer_containing(position.offset())
        .ok_or(DelayedError::NoBuffer(position.offset()))?;
    let mut cursor = Cursor::for_buffer(sources.buffer(buffer));
    cursor.restore(position)?;
    if is_top_level {
        session.state.take_top_level()?;
    } else {
        session.state.take_position(decl)?;
    }

    debug!(?decl, offset = position.offset(), "parsing delayed body");
    module.set_body_state(decl, BodyState::Parsing);
    let span = module.decl(decl).span;
    let block = {
        let mut parser = Parser::new(session, module, cursor);
        if let Some(callbacks) = completion.as_deref_mut() {
            parser = parser.with_completion(callbacks);
        }
        if is_top_level {
            parser.parse_top_level_stmts(span)
        } else {
            parser.parse_block()
        }
    };
    module.set_body_state(decl, BodyState::Parsed(block));

    if let Some(callbacks) = completion {
        callbacks.done_parsing(module);
    }
    Ok(())
}

/// Parse every delayed function body in `module`, in declaration order.
///
/// With a completion factory, the pending top-level entry is parsed
/// afterwards. A body that fails to parse is reported and the walk goes
/// on; contract violations stop it.
pub fn perform_delayed_parsing(
    session: &mut ParseSession<'_>,
    module: &mut Module,
    mut completion: Option<&mut dyn CompletionCallbacksFactory>,
) -> Result<DelayedStats, DelayedError> {
    let mut stats = DelayedStats::default();
    for decl in module.decls_in_order() {
        if !is_unparsed_func(module, decl) {
            continue;
        }
        match completion.as_deref_mut() {
            Some(factory) => {
                let mut callbacks = factory.create_callbacks();
                let callbacks: &mut dyn CompletionCallbacks = &mut *callbacks;
                parse_delayed_body(session, module, decl, Some(callbacks))?;
            }
            None => parse_delayed_body(session, module, decl, None)?,
        }
        stats.parsed += 1;
    }

    if let Some(factory) = completion {
        if session.state.has_pending_top_level_entry() {
            parse_delayed_top_level(session, module, factory)?;
            stats.parsed += 1;
        }
    }
    Ok(stats)
}

/// Parse the pending delayed top-level entry.
pub fn parse_delayed_top_level(
    session: &mut ParseSession<'_>,
    module: &mut Module,
    completion: &mut dyn CompletionCallbacksFactory,
) -> Result<DeclId, DelayedError> {
    let decl = module
        .items()
        .iter()
        .copied()
        .find(|&id| {
            matches!(module.decl(id).kind, DeclKind::TopLevelCode(_))
                && module.body_state(id) == Some(BodyState::Unparsed)
        })
        .ok_or(DelayedError::NoPendingTopLevel)?;
    if !session.state.has_pending_top_level_entry() {
        return Err(DelayedError::NoPendingTopLevel);
    }
    let mut callbacks = completion.create_callbacks();
    let callbacks: &mut dyn CompletionCallbacks = &mut *callbacks;
    parse_delayed_body(session, module, decl, Some(callbacks))?;
    Ok(decl)
}

/// Parse only the delayed body containing `offset`, or failing that the
/// one nearest to it. Every other delayed body is left untouched.
pub fn parse_delayed_nearest(
    session: &mut ParseSession<'_>,
    module: &mut Module,
    offset: u32,
) -> Result<DelayedStats, DelayedError> {
    let bodies = module.unparsed_bodies();
    let target = bodies
        .iter()
        .find(|(_, span)| span.contains_inclusive(offset))
        .or_else(|| bodies.iter().min_by_key(|(_, span)| span.distance_to(offset)))
        .map(|&(decl, _)| decl);

    let Some(target) = target else {
        return Ok(DelayedStats::default());
    };
    parse_delayed_body(session, module, target, None)?;
    Ok(DelayedStats {
        parsed: 1,
        skipped: bodies.len() - 1,
    })
}

fn is_unparsed_func(module: &Module, decl: DeclId) -> bool {
    matches!(module.decl(decl).kind, DeclKind::Func(_))
        && module.body_state(decl) == Some(BodyState::Unparsed)
}
