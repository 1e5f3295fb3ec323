//! Source buffers and the global offset space.
//!
//! Every buffer added to a `SourceMap` is assigned a disjoint range of
//! global offsets. A one-byte gap separates consecutive buffers so that the
//! end-of-buffer offset of one buffer never equals the first offset of the
//! next; positions saved at end of input still resolve to their own buffer.

use std::fmt;

use crate::Span;

/// Identifies a buffer registered in a `SourceMap`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct BufferId(u32);

impl BufferId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Error when registering a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMapError {
    /// The buffer would push the offset space past `u32::MAX`.
    OffsetOverflow { name: String, len: usize },
}

impl fmt::Display for SourceMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceMapError::OffsetOverflow { name, len } => write!(
                f,
                "buffer `{name}` ({len} bytes) does not fit in the 32-bit offset space"
            ),
        }
    }
}

impl std::error::Error for SourceMapError {}

/// One source text and where it lives in the global offset space.
#[derive(Debug)]
pub struct SourceBuffer {
    id: BufferId,
    name: String,
    text: String,
    base: u32,
    line_starts: Vec<u32>,
}

impl SourceBuffer {
    #[inline]
    pub fn id(&self) -> BufferId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Global offset of the first byte.
    #[inline]
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Global offset one past the last byte.
    #[inline]
    pub fn end(&self) -> u32 {
        // Fits: checked when the buffer was registered.
        self.base + self.text.len() as u32
    }

    /// Span covering the whole buffer.
    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.base, self.end())
    }

    /// Whether a global offset belongs to this buffer (end of input included).
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.base && offset <= self.end()
    }

    /// Convert a global offset to an index into `text()`.
    #[inline]
    pub fn local(&self, offset: u32) -> usize {
        debug_assert!(self.contains(offset), "offset {offset} outside buffer");
        (offset - self.base) as usize
    }

    /// Convert an index into `text()` to a global offset.
    #[inline]
    pub fn global(&self, local: usize) -> u32 {
        debug_assert!(local <= self.text.len());
        #[expect(
            clippy::cast_possible_truncation,
            reason = "buffer length was checked against u32::MAX on registration"
        )]
        let local = local as u32;
        self.base + local
    }

    /// Text covered by a span. Empty if the span falls outside the buffer.
    pub fn slice(&self, span: Span) -> &str {
        if !self.contains(span.start) || !self.contains(span.end) {
            return "";
        }
        self.text
            .get(self.local(span.start)..self.local(span.end))
            .unwrap_or("")
    }

    /// Byte at a global offset, if any.
    #[inline]
    pub fn byte_at(&self, offset: u32) -> Option<u8> {
        if offset < self.base {
            return None;
        }
        self.text.as_bytes().get((offset - self.base) as usize).copied()
    }

    /// 1-based line and column of a global offset.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let local = offset.saturating_sub(self.base);
        let line = self.line_starts.partition_point(|&start| start <= local);
        let line_start = self.line_starts[line.saturating_sub(1)];
        #[expect(
            clippy::cast_possible_truncation,
            reason = "line count is bounded by the buffer length"
        )]
        let line = line as u32;
        (line, local - line_start + 1)
    }

    /// Text of the 1-based line `line`, without its newline.
    pub fn line_text(&self, line: u32) -> &str {
        let idx = line.saturating_sub(1) as usize;
        let Some(&start) = self.line_starts.get(idx) else {
            return "";
        };
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.text.len(), |&next| next as usize - 1);
        self.text.get(start as usize..end).unwrap_or("")
    }
}

/// Registry of every buffer in a compilation.
#[derive(Debug, Default)]
pub struct SourceMap {
    buffers: Vec<SourceBuffer>,
    next_base: u32,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a buffer and assign it the next free offset range.
    pub fn add_buffer(
        &mut self,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<BufferId, SourceMapError> {
        let name = name.into();
        let text = text.into();
        let overflow = || SourceMapError::OffsetOverflow {
            name: name.clone(),
            len: text.len(),
        };
        let len = u32::try_from(text.len()).map_err(|_| overflow())?;
        let base = self.next_base;
        let next_base = base
            .checked_add(len)
            .and_then(|end| end.checked_add(1))
            .ok_or_else(overflow)?;
        let id = BufferId(u32::try_from(self.buffers.len()).map_err(|_| overflow())?);

        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                // `len` fits, so every index does too.
                .map(|(i, _)| (i + 1) as u32),
        );

        self.buffers.push(SourceBuffer {
            id,
            name,
            text,
            base,
            line_starts,
        });
        self.next_base = next_base;
        Ok(id)
    }

    #[inline]
    pub fn buffer(&self, id: BufferId) -> &SourceBuffer {
        &self.buffers[id.index()]
    }

    /// Find the buffer whose offset range contains `offset`.
    pub fn find_buffer_containing(&self, offset: u32) -> Option<BufferId> {
        let idx = self.buffers.partition_point(|buf| buf.base <= offset);
        let candidate = self.buffers.get(idx.checked_sub(1)?)?;
        candidate.contains(offset).then_some(candidate.id)
    }

    pub fn buffers(&self) -> impl Iterator<Item = &SourceBuffer> {
        self.buffers.iter()
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
