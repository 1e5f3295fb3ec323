//! Parser state that outlives a single `Parser`.
//!
//! The first pass records where each postponed body starts; the delayed
//! pass takes those positions back out, exactly once each.

use lark_ir::DeclId;
use rustc_hash::FxHashMap;

use crate::Position;

/// Misuse of the persistent state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("a position for {0:?} is already recorded")]
    DuplicateEntry(DeclId),
    #[error("the position for {0:?} was already consumed")]
    AlreadyConsumed(DeclId),
    #[error("no position was recorded for {0:?}")]
    NotRecorded(DeclId),
    #[error("a delayed top-level entry is already recorded")]
    DuplicateTopLevel,
    #[error("the delayed top-level entry was already consumed")]
    TopLevelConsumed,
    #[error("no delayed top-level entry was recorded")]
    NoTopLevel,
}

#[derive(Copy, Clone, Debug)]
enum Slot {
    Pending(Position),
    Consumed,
}

#[derive(Copy, Clone, Debug, Default)]
enum TopLevelEntry {
    #[default]
    Empty,
    Pending(DeclId, Position),
    Consumed,
}

/// State shared by the initial pass and the delayed pass of one
/// translation unit.
#[derive(Debug, Default)]
pub struct PersistentParserState {
    positions: FxHashMap<DeclId, Slot>,
    top_level: TopLevelEntry,
    resume: Option<Position>,
}

impl PersistentParserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember where the body of `decl` starts.
    pub fn record_position(&mut self, decl: DeclId, position: Position) -> Result<(), StateError> {
        if self.positions.contains_key(&decl) {
            return Err(StateError::DuplicateEntry(decl));
        }
        self.positions.insert(decl, Slot::Pending(position));
        Ok(())
    }

    /// The recorded position of `decl`, left in place.
    pub fn position(&self, decl: DeclId) -> Result<Position, StateError> {
        match self.positions.get(&decl) {
            Some(Slot::Pending(position)) => Ok(*position),
            Some(Slot::Consumed) => Err(StateError::AlreadyConsumed(decl)),
            None => Err(StateError::NotRecorded(decl)),
        }
    }

    /// Take the recorded position of `decl`. A second call fails.
    pub fn take_position(&mut self, decl: DeclId) -> Result<Position, StateError> {
        let position = self.position(decl)?;
        self.positions.insert(decl, Slot::Consumed);
        Ok(position)
    }

    /// Whether `decl` has a position waiting to be taken.
    pub fn is_pending(&self, decl: DeclId) -> bool {
        matches!(self.positions.get(&decl), Some(Slot::Pending(_)))
    }

    /// Number of positions waiting to be taken.
    pub fn pending_count(&self) -> usize {
        self.positions
            .values()
            .filter(|slot| matches!(slot, Slot::Pending(_)))
            .count()
    }

    /// Remember the one top-level code statement to parse later.
    pub fn delay_top_level(&mut self, decl: DeclId, position: Position) -> Result<(), StateError> {
        match self.top_level {
            TopLevelEntry::Empty => {
                self.top_level = TopLevelEntry::Pending(decl, position);
                Ok(())
            }
            TopLevelEntry::Pending(..) => Err(StateError::DuplicateTopLevel),
            TopLevelEntry::Consumed => Err(StateError::TopLevelConsumed),
        }
    }

    pub fn has_pending_top_level_entry(&self) -> bool {
        matches!(self.top_level, TopLevelEntry::Pending(..))
    }

    /// The delayed top-level entry, left in place.
    pub fn top_level_entry(&self) -> Result<(DeclId, Position), StateError> {
        match self.top_level {
            TopLevelEntry::Pending(decl, position) => Ok((decl, position)),
            TopLevelEntry::Consumed => Err(StateError::TopLevelConsumed),
            TopLevelEntry::Empty => Err(StateError::NoTopLevel),
        }
    }

    /// Take the delayed top-level entry. A second call fails.
    pub fn take_top_level(&mut self) -> Result<(DeclId, Position), StateError> {
        let entry = self.top_level_entry()?;
        self.top_level = TopLevelEntry::Consumed;
        Ok(entry)
    }

    /// Where the next parser over the same buffer should pick up.
    pub fn set_resume_position(&mut self, position: Position) {
        self.resume = Some(position);
    }

    pub fn take_resume_position(&mut self) -> Option<Position> {
        self.resume.take()
    }

    pub fn resume_position(&self) -> Option<Position> {
        self.resume
    }
}
