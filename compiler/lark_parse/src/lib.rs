//! Recovering parser for Lark.
//!
//! Pulls tokens on demand from `lark_lexer` through a [`Cursor`], builds
//! the flat syntax tree of `lark_ir`, and reports problems to a
//! `DiagnosticSink` instead of stopping at the first error.
//!
//! - `cursor`: one live token, snapshot and restore
//! - `recovery`: token sets and skip operations
//! - `list`: bracketed, separated lists
//! - `grammar`: the productions
//! - `state`: positions kept between the first and the delayed pass
//! - `delayed`: policies and the delayed pass itself
//! - `completion`: hooks for code completion
//!
//! Function bodies can be left unparsed in the first pass and parsed later,
//! one at a time or all at once; see [`perform_delayed_parsing`].

mod completion;
mod cursor;
mod delayed;
mod grammar;
mod list;
mod outcome;
mod parser;
mod recovery;
mod stack;
mod state;

#[cfg(test)]
mod test_helpers;

pub use completion::{CompletionCallbacks, CompletionCallbacksFactory};
pub use cursor::{Cursor, CursorError, Position};
pub use delayed::{
    parse_delayed_body, parse_delayed_nearest, parse_delayed_top_level, perform_delayed_parsing,
    DelayAll, DelayContaining, DelayNone, DelayedError, DelayedParsingPolicy, DelayedStats,
};
pub use list::{ListConfig, ListOutcome};
pub use outcome::ParseStatus;
pub use parser::{parse_into_module, parse_next_item, ParseOptions, ParseSession, Parser};
pub use recovery::{TokenSet, DECL_START, STMT_START};
pub use state::{PersistentParserState, StateError};
