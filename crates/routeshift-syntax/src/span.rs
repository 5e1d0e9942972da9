//! Source location tracking

use serde::{Deserialize, Serialize};
use swc_core::common::{BytePos, Span as SwcSpan};

/// A byte range into the original source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the start
    pub start: usize,
    /// Byte offset of the end (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Convert an swc span into offsets relative to a file starting at `file_start`
    pub fn from_swc(span: SwcSpan, file_start: BytePos) -> Self {
        let start = span.lo.0.saturating_sub(file_start.0) as usize;
        let end = span.hi.0.saturating_sub(file_start.0) as usize;
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Clamp the span to a source of `len` bytes
    pub fn clamp(self, len: usize) -> Span {
        Span {
            start: self.start.min(len),
            end: self.end.min(len),
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::dummy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_swc_is_relative_to_file_start() {
        let swc = SwcSpan::new(BytePos(11), BytePos(15));
        assert_eq!(Span::from_swc(swc, BytePos(1)), Span::new(10, 14));
    }

    #[test]
    fn clamp_keeps_span_inside_source() {
        assert_eq!(Span::new(3, 40).clamp(10), Span::new(3, 10));
    }
}
