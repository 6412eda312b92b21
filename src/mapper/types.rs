use std::ops::Range;

use thiserror::Error;

/// Outcome of resolving one generated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The responsible 1-based line in the original source file.
    Original(usize),
    /// The line was injected by the preprocessor; no original line exists.
    Injected,
    /// The line precedes any region traceable to the original file.
    Boilerplate,
    /// No responsible line could be determined.
    NotFound,
}

/// Validation failure for a mapping query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("generated line {line} is out of range (file has {total} lines)")]
    LineOutOfRange { line: usize, total: usize },
}

/// Kind of one alignment opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Equal,
    Replace,
    Insert,
    Delete,
}

/// One opcode of the line alignment. Ranges are half-open 0-based indices
/// into the respective line sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpSpan {
    pub kind: SpanKind,
    pub original: Range<usize>,
    pub generated: Range<usize>,
}
