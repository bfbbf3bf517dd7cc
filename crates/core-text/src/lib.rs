//! Rope-based line source + coordinate primitives.
//!
//! The screen-line pipeline measures everything in *character units* (the
//! count produced by `str::chars`), never bytes. `Point` is the shared
//! row/column value type for both buffer and screen coordinate spaces; the
//! two spaces are distinguished by naming at use sites, not by wrapper types.
//!
//! Invariants:
//! * `Point` comparison is lexicographic (row first, then column).
//! * `Point::INFINITY` compares greater than every finite point.
//! * `line_for_row` never includes the line terminator; the terminator kind
//!   is reported separately via `line_ending_for_row`.

use anyhow::Result;
use ropey::Rope;

/// A position expressed as (row, column) in character units.
///
/// Ordering is lexicographic via derived field order. The same value type is
/// used for buffer positions (pre-rewrite) and screen positions (post folds,
/// tabs, and soft wraps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

impl Point {
    /// Sentinel greater than any finite point.
    pub const INFINITY: Point = Point {
        row: usize::MAX,
        column: usize::MAX,
    };

    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub fn zero() -> Self {
        Self { row: 0, column: 0 }
    }
}

/// Line terminator kind for a buffer row, used to index the display layer's
/// end-of-line invisible table. The rope splits lines on LF and CRLF, so a
/// lone CR never appears as a terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// Final line of the buffer (no terminator).
    None,
    Lf,
    CrLf,
}

/// Read-only line access consumed by the screen-line builder.
pub trait LineSource {
    /// The row's text without its terminator, or `None` past the last row.
    fn line_for_row(&self, row: usize) -> Option<String>;

    /// The terminator kind for the row (`None` past the last row too).
    fn line_ending_for_row(&self, row: usize) -> LineEnding;
}

/// A text buffer backed by a `ropey::Rope`.
#[derive(Debug, Clone)]
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(Self {
            rope: Rope::from_str(content),
        })
    }

    /// Total number of lines. A trailing terminator yields a final empty line,
    /// matching ropey's line segmentation.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// The raw rope slice for a row, terminator included.
    fn raw_line(&self, row: usize) -> Option<String> {
        if row < self.rope.len_lines() {
            Some(self.rope.line(row).to_string())
        } else {
            None
        }
    }
}

impl LineSource for Buffer {
    fn line_for_row(&self, row: usize) -> Option<String> {
        let mut line = self.raw_line(row)?;
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Some(line)
    }

    fn line_ending_for_row(&self, row: usize) -> LineEnding {
        match self.raw_line(row) {
            Some(line) if line.ends_with('\n') => {
                if line.ends_with("\r\n") {
                    LineEnding::CrLf
                } else {
                    LineEnding::Lf
                }
            }
            _ => LineEnding::None,
        }
    }
}
