//! Parse status shared by list parsing and the grammar.
//!
//! Parsing never stops at the first error: each production reports whether
//! it hit one, and the caller decides how far to recover. Diagnostics are
//! already in the sink by the time a status says `Error`.

/// Whether a production parsed cleanly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub enum ParseStatus {
    #[default]
    Success,
    /// At least one error was reported while parsing.
    Error,
}

impl ParseStatus {
    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, ParseStatus::Error)
    }

    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, ParseStatus::Success)
    }

    /// `Error` if either status is.
    #[inline]
    pub fn merge(self, other: ParseStatus) -> ParseStatus {
        if self.is_error() || other.is_error() {
            ParseStatus::Error
        } else {
            ParseStatus::Success
        }
    }

    /// `Error` if any errors were counted.
    #[inline]
    pub fn from_error_count(count: usize) -> ParseStatus {
        if count > 0 {
            ParseStatus::Error
        } else {
            ParseStatus::Success
        }
    }

    #[inline]
    pub fn set_error(&mut self) {
        *self = ParseStatus::Error;
    }
}

impl<T, E> From<&Result<T, E>> for ParseStatus {
    fn from(result: &Result<T, E>) -> Self {
        if result.is_ok() {
            ParseStatus::Success
        } else {
            ParseStatus::Error
        }
    }
}

#[cfg(test)]
mod tests;
