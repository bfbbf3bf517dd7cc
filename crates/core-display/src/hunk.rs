//! Spatial-index rewrite records.

use core_text::Point;

/// One region rewrite reported by the display layer's spatial index.
///
/// `old_start`/`old_end` are buffer coordinates; `new_end` is the screen
/// coordinate at which the rewritten region ends. The kind of rewrite is
/// carried by shape, not by a discriminant: see `is_soft_wrap` and `is_fold`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub old_start: Point,
    pub old_end: Point,
    pub new_end: Point,
    pub new_text: String,
}

impl Hunk {
    /// A display-only line break at `position`; the next screen line begins
    /// with `new_end.column` columns of reconstructed indent.
    pub fn soft_wrap(position: Point, new_end: Point) -> Self {
        Self {
            old_start: position,
            old_end: position,
            new_end,
            new_text: String::new(),
        }
    }

    /// A fold collapsing `[old_start, old_end)` to the fold character.
    pub fn fold(old_start: Point, old_end: Point, new_end: Point, fold_character: &str) -> Self {
        Self {
            old_start,
            old_end,
            new_end,
            new_text: fold_character.to_string(),
        }
    }

    /// Zero old extent marks a soft wrap.
    pub fn is_soft_wrap(&self) -> bool {
        self.old_start == self.old_end
    }

    /// A non-empty old extent rewritten to the fold character marks a fold.
    pub fn is_fold(&self, fold_character: &str) -> bool {
        self.old_end > self.old_start && self.new_text == fold_character
    }
}
