//! Cursor over the ordered hunk stream.
//!
//! The assembler walks buffer positions monotonically; the cursor advances in
//! lock step. An explicit peek/advance interface (rather than an index
//! variable with break conditions inside the scan loop) guarantees that
//! several hunks at one buffer position are each seen, in list order.

use core_display::Hunk;
use core_text::Point;

#[derive(Debug)]
pub struct HunkCursor {
    hunks: Vec<Hunk>,
    index: usize,
}

impl HunkCursor {
    /// `hunks` must be ordered ascending by `old_start`, ties kept in list
    /// order, as served by `DisplayContext::hunks_in_new_range`.
    pub fn new(hunks: Vec<Hunk>) -> Self {
        debug_assert!(
            hunks.windows(2).all(|w| w[0].old_start <= w[1].old_start),
            "hunk stream must be ordered by old_start"
        );
        Self { hunks, index: 0 }
    }

    pub fn peek(&self) -> Option<&Hunk> {
        self.hunks.get(self.index)
    }

    pub fn advance(&mut self) {
        self.index += 1;
    }

    /// `old_start` of the next hunk, or `Point::INFINITY` once drained.
    pub fn next_start(&self) -> Point {
        self.peek().map_or(Point::INFINITY, |hunk| hunk.old_start)
    }

    /// Drop hunks starting before `position`. Covers both rows already left
    /// behind and hunks interior to a consumed fold, which the jump to the
    /// fold's `old_end` superseded.
    pub fn skip_before(&mut self, position: Point) {
        while self.next_start() < position {
            self.advance();
        }
    }

    /// Consume and return the next hunk iff it starts exactly at `position`.
    pub fn take_at(&mut self, position: Point) -> Option<Hunk> {
        if self.next_start() == position {
            let hunk = self.hunks[self.index].clone();
            self.advance();
            Some(hunk)
        } else {
            None
        }
    }
}
