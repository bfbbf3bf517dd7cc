//! Screen-line builder: entry point + per-buffer-line assembly.
//!
//! One build call walks buffer rows starting at the translation of the
//! requested screen start row. Per column it first drains spatial-index
//! hunks at the current buffer position (a fold jumps the cursor to the
//! fold's old end and splices the target line in; a soft wrap flushes the
//! screen line and reconstructs the continuation indent), then classifies
//! the character's whitespace role and lets the flag transition drive tag
//! opens/closes, then renders the character (tab expansion, invisible
//! substitution). End of line appends the EOL invisible and, on empty lines,
//! synthesized indent guides, then flushes.
//!
//! The builder retains two things across calls: the screen-line id counter
//! (strictly increasing, per producer) and the flags -> tag-name memo.
//! Everything else is allocated fresh per call; prior builds are never
//! cached or invalidated.

use crate::ScreenLine;
use crate::emitter::TokenEmitter;
use crate::hunk_cursor::HunkCursor;
use crate::whitespace::WhitespaceClassifier;
use core_display::{DecorationFlags, DisplayContext, Hunk, TagVocabulary};
use core_text::{LineSource, Point};
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct ScreenLineBuilder {
    next_screen_line_id: AtomicU64,
    vocabulary: TagVocabulary,
}

impl ScreenLineBuilder {
    pub fn new() -> Self {
        Self {
            next_screen_line_id: AtomicU64::new(0),
            vocabulary: TagVocabulary::new(),
        }
    }

    /// Build rendered lines for screen rows `[screen_start_row,
    /// screen_end_row)`, clamped to the display's screen-line count.
    ///
    /// A buffer line begun before the end row is completed even when its
    /// soft wraps extend past it, so the result may contain more lines than
    /// the clamped range; `build_screen_lines(r, r)` returns no lines.
    pub fn build_screen_lines<D: DisplayContext, B: LineSource>(
        &mut self,
        display: &D,
        buffer: &B,
        screen_start_row: usize,
        screen_end_row: usize,
    ) -> Vec<ScreenLine> {
        let screen_end_row = screen_end_row.min(display.screen_line_count());
        if screen_start_row >= screen_end_row {
            return Vec::new();
        }

        let start = Point::new(screen_start_row, 0);
        let end = Point::new(screen_end_row, 0);
        let buffer_row = display.translate_screen_position(start).row;
        let hunks = display.hunks_in_new_range(start, end);
        tracing::trace!(
            target: "render.screen_lines",
            screen_start_row,
            screen_end_row,
            buffer_row,
            hunk_count = hunks.len(),
            "build_screen_lines"
        );

        let mut pass = BuildPass {
            display,
            buffer,
            vocabulary: &mut self.vocabulary,
            next_screen_line_id: &self.next_screen_line_id,
            emitter: TokenEmitter::new(),
            cursor: HunkCursor::new(hunks),
            classifier: WhitespaceClassifier::new(),
            current_token_flags: DecorationFlags::empty(),
            buffer_row,
            screen_row: screen_start_row,
            screen_lines: Vec::new(),
        };
        pass.run(screen_end_row);
        pass.screen_lines
    }
}

impl Default for ScreenLineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient state of one build call.
struct BuildPass<'a, D: DisplayContext, B: LineSource> {
    display: &'a D,
    buffer: &'a B,
    vocabulary: &'a mut TagVocabulary,
    next_screen_line_id: &'a AtomicU64,
    emitter: TokenEmitter,
    cursor: HunkCursor,
    classifier: WhitespaceClassifier,
    current_token_flags: DecorationFlags,
    buffer_row: usize,
    screen_row: usize,
    screen_lines: Vec<ScreenLine>,
}

impl<D: DisplayContext, B: LineSource> BuildPass<'_, D, B> {
    fn run(&mut self, screen_end_row: usize) {
        while self.screen_row < screen_end_row {
            let Some(line) = self.buffer.line_for_row(self.buffer_row) else {
                break;
            };
            let mut chars: Vec<char> = line.chars().collect();
            self.classifier.begin_line(&chars);
            self.current_token_flags = DecorationFlags::empty();
            let mut buffer_column = 0;

            loop {
                self.drain_hunks(&mut buffer_column, &mut chars);

                let next_character = chars.get(buffer_column).copied();
                let classification = self.classifier.classify(
                    buffer_column,
                    next_character,
                    self.emitter.screen_column(),
                    self.display.options(),
                );

                let previous_token_flags = self.current_token_flags;
                self.current_token_flags = classification.flags;
                let changed = classification.flags != previous_token_flags;
                if !previous_token_flags.is_empty()
                    && (changed || classification.force_token_boundary)
                {
                    self.emit_close_tag(previous_token_flags);
                }
                if !classification.flags.is_empty()
                    && (changed || classification.force_token_boundary)
                {
                    self.emit_open_tag(classification.flags);
                }

                // The scan runs one column past the text so a fold starting
                // exactly at end of line is still consumed above; reaching
                // this point there, no character remains to render.
                if buffer_column == chars.len() {
                    break;
                }

                match next_character {
                    Some('\t') => self.emit_hard_tab(),
                    Some(' ')
                        if classification
                            .flags
                            .contains(DecorationFlags::INVISIBLE_CHARACTER) =>
                    {
                        let glyph = self.display.options().invisibles.space;
                        self.emitter.emit_char(glyph.unwrap_or(' '));
                    }
                    Some(character) => self.emitter.emit_char(character),
                    None => unreachable!("column bounded by chars.len()"),
                }
                buffer_column += 1;
            }

            self.emit_line_ending(chars.is_empty());
            self.buffer_row += 1;
            self.screen_row += 1;
        }
    }

    /// Consume every hunk starting at the current buffer position, in list
    /// order. A fold mutates the position and the working line, so matching
    /// restarts from scratch after each consumed hunk.
    fn drain_hunks(&mut self, buffer_column: &mut usize, chars: &mut Vec<char>) {
        loop {
            let position = Point::new(self.buffer_row, *buffer_column);
            self.cursor.skip_before(position);
            let Some(hunk) = self.cursor.take_at(position) else {
                return;
            };
            if hunk.is_soft_wrap() {
                self.emit_soft_wrap(&hunk);
            } else if hunk.is_fold(&self.display.options().fold_character) {
                self.emit_fold();
                self.buffer_row = hunk.old_end.row;
                *buffer_column = hunk.old_end.column;
                *chars = self
                    .buffer
                    .line_for_row(self.buffer_row)
                    .unwrap_or_default()
                    .chars()
                    .collect();
                self.classifier.rebase_after_fold(chars);
            }
            // Hunks of any other shape do not concern this pass.
        }
    }

    /// Replace the open tag with a `fold-marker` tag covering the fold
    /// glyph. The tag stays open; the next flag transition closes it.
    fn emit_fold(&mut self) {
        let previous = mem::replace(&mut self.current_token_flags, DecorationFlags::FOLD);
        self.emit_close_tag(previous);
        self.emit_open_tag(DecorationFlags::FOLD);
        self.emitter.emit_text(&self.display.options().fold_character);
    }

    /// Flush the current screen line and begin the continuation line with
    /// its reconstructed indent.
    fn emit_soft_wrap(&mut self, hunk: &Hunk) {
        let previous = mem::replace(&mut self.current_token_flags, DecorationFlags::empty());
        self.emit_close_tag(previous);
        self.flush_screen_line();
        self.screen_row += 1;
        self.emit_indent_whitespace(hunk.new_end.column);
    }

    /// Emit spaces up to `end_column`. With indent guides enabled, one
    /// `indent-guide` tag spans each tab-stop-aligned block; otherwise the
    /// run stays bare and lands in a single length prefix.
    fn emit_indent_whitespace(&mut self, end_column: usize) {
        let options = self.display.options();
        let tab_length = options.tab_length;
        let show_indent_guides = options.show_indent_guides;

        if show_indent_guides {
            let mut opened_indent_guide = false;
            while self.emitter.screen_column() < end_column {
                if self.emitter.screen_column() % tab_length == 0 {
                    if opened_indent_guide {
                        self.emit_close_tag(DecorationFlags::INDENT_GUIDE);
                    }
                    self.emit_open_tag(DecorationFlags::INDENT_GUIDE);
                    opened_indent_guide = true;
                }
                self.emitter.emit_char(' ');
            }
            if opened_indent_guide {
                self.emit_close_tag(DecorationFlags::INDENT_GUIDE);
            }
        } else {
            while self.emitter.screen_column() < end_column {
                self.emitter.emit_char(' ');
            }
        }
    }

    /// Expand a hard tab to the next tab stop, substituting the tab
    /// invisible for the first cell when configured.
    fn emit_hard_tab(&mut self) {
        let options = self.display.options();
        let tab_length = options.tab_length;
        let tab_invisible = options.invisibles.tab;
        let distance_to_next_tab_stop = tab_length - (self.emitter.screen_column() % tab_length);

        if let Some(glyph) = tab_invisible {
            self.emitter.emit_char(glyph);
            for _ in 1..distance_to_next_tab_stop {
                self.emitter.emit_char(' ');
            }
        } else {
            for _ in 0..distance_to_next_tab_stop {
                self.emitter.emit_char(' ');
            }
        }
    }

    /// Finalize the buffer line: EOL invisible under a compound tag, then
    /// indent-guide synthesis for empty lines, then flush.
    fn emit_line_ending(&mut self, line_was_empty: bool) {
        let previous = mem::replace(&mut self.current_token_flags, DecorationFlags::empty());
        self.emit_close_tag(previous);

        let ending = self.buffer.line_ending_for_row(self.buffer_row);
        let options = self.display.options();
        let show_indent_guides = options.show_indent_guides;
        let eol_invisible = options.eol_invisibles.for_ending(ending);

        if let Some(glyph) = eol_invisible {
            let mut eol_flags = DecorationFlags::INVISIBLE_CHARACTER | DecorationFlags::LINE_ENDING;
            if line_was_empty && show_indent_guides {
                eol_flags |= DecorationFlags::INDENT_GUIDE;
            }
            self.emit_open_tag(eol_flags);
            self.emitter.emit_char(glyph);
            self.emit_close_tag(eol_flags);
        }

        if line_was_empty && show_indent_guides {
            let indent = self
                .display
                .leading_whitespace_length_for_surrounding_lines(self.buffer_row);
            self.emit_indent_whitespace(indent);
        }

        self.flush_screen_line();
    }

    fn emit_open_tag(&mut self, flags: DecorationFlags) {
        if flags.is_empty() {
            return;
        }
        let name = self.vocabulary.name_for(flags);
        let code = self.display.code_for_open_tag(&name);
        self.emitter.open_tag(code);
    }

    /// Closing the empty flag set degrades to a bare token boundary, which
    /// flushes any accumulated untagged run.
    fn emit_close_tag(&mut self, flags: DecorationFlags) {
        if flags.is_empty() {
            self.emitter.emit_token_boundary();
            return;
        }
        let name = self.vocabulary.name_for(flags);
        let code = self.display.code_for_close_tag(&name);
        self.emitter.close_tag(code);
    }

    fn flush_screen_line(&mut self) {
        let (line_text, tag_codes) = self.emitter.take_line();
        let id = self.next_screen_line_id.fetch_add(1, Ordering::Relaxed);
        let screen_line = ScreenLine {
            id,
            line_text,
            tag_codes,
        };
        debug_check_screen_line(&screen_line);
        tracing::trace!(
            target: "render.screen_lines",
            id,
            screen_row = self.screen_row,
            "screen_line_flushed"
        );
        self.screen_lines.push(screen_line);
    }
}

/// Debug-build verification of the output contract for one flushed line.
fn debug_check_screen_line(line: &ScreenLine) {
    if !cfg!(debug_assertions) {
        return;
    }
    debug_assert!(!line.tag_codes.is_empty(), "tag stream must be non-empty");
    let mut open_stack: Vec<i32> = Vec::new();
    for &code in &line.tag_codes {
        if code >= 0 {
            continue;
        }
        if core_display::is_open_tag_code(code) {
            open_stack.push(code);
        } else {
            let open = open_stack.pop();
            debug_assert!(
                matches!(open, Some(open) if code == open - 1),
                "close code must match the most recently opened tag"
            );
        }
    }
    debug_assert!(open_stack.is_empty(), "every opened tag must close");
    debug_assert_eq!(
        line.length_prefix_sum(),
        line.line_text.chars().count(),
        "length prefixes must sum to the rendered length"
    );
}
