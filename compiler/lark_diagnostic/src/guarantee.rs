//! Proof that an error was reported.

use std::fmt;

/// Zero-sized proof that at least one error diagnostic was reported.
///
/// Only this crate can mint one; everyone else gets it back from
/// `DiagnosticSink::emit_error`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    #[inline]
    pub(crate) const fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// Proof from an error count, if it is nonzero.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}

#[cfg(test)]
mod tests;
