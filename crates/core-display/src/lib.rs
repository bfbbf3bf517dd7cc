//! Display-layer vocabulary consumed by the screen-line builder.
//!
//! This crate owns everything the builder treats as collaborator-provided:
//! the decoration flag set and its canonical tag names, the registry that
//! issues stable open/close tag codes, the read-only option set (tab length,
//! invisibles, fold glyph, indent guides), and the `Hunk` rewrite records the
//! spatial index hands over. The builder itself lives in `core-render`; it
//! reaches all of this through the `DisplayContext` trait so alternative
//! display layers (including test fixtures) can slot in.
//!
//! Invariants:
//! * Tag names for a flag mask are assembled in one fixed canonical order and
//!   memoized; the mapping is pure.
//! * For a given registry, `code_for_open_tag(name)` and
//!   `code_for_close_tag(name)` are stable and distinct; open codes are odd
//!   negative, close codes even negative, so a tag stream can be pattern
//!   matched by sign and parity alone.
//! * `DisplayOptions` is validated on construction from config; the builder
//!   may assume `tab_length >= 1` and a non-empty fold character.

mod flags;
mod hunk;
mod options;
mod registry;

pub use flags::{DecorationFlags, TagVocabulary, tag_name_for_flags};
pub use hunk::Hunk;
pub use options::{DisplayOptions, EolInvisibles, Invisibles, OptionsError};
pub use registry::{TagRegistry, is_close_tag_code, is_open_tag_code};

use core_text::Point;

/// Read-only services of the display layer, consumed by the builder.
///
/// One instance describes one display snapshot: the options, the spatial
/// index (via `hunks_in_new_range`), and the tag-code registry are all
/// assumed internally consistent for the duration of a build call.
pub trait DisplayContext {
    fn options(&self) -> &DisplayOptions;

    /// Number of screen rows the display currently resolves to; build
    /// requests are clamped to this.
    fn screen_line_count(&self) -> usize;

    /// Translate a screen position to the buffer position it renders.
    fn translate_screen_position(&self, position: Point) -> Point;

    /// Rewrite hunks overlapping the screen-coordinate range
    /// `[start, end)`, ascending by `old_start` then original list position.
    fn hunks_in_new_range(&self, start: Point, end: Point) -> Vec<Hunk>;

    /// Leading-whitespace width adopted by an empty buffer row from its
    /// surrounding lines, used for indent-guide synthesis.
    fn leading_whitespace_length_for_surrounding_lines(&self, buffer_row: usize) -> usize;

    fn code_for_open_tag(&self, name: &str) -> i32;

    fn code_for_close_tag(&self, name: &str) -> i32;
}
