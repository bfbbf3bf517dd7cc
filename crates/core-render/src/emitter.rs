//! Token emission for one screen line.
//!
//! The emitter owns the line under construction: its rendered text, its tag
//! codes, the length of the token accumulating under the currently open tag,
//! and the screen column. Length prefixes are pushed at token boundaries;
//! open/close codes are supplied by the caller (which resolves flag masks to
//! registry codes). The emitter guarantees locally what the output contract
//! demands globally: every prefix counts exactly the characters appended
//! since the previous boundary, and an open code is always followed by a
//! prefix (possibly 0) before its close code.

use core_display::{is_close_tag_code, is_open_tag_code};

#[derive(Debug, Default)]
pub struct TokenEmitter {
    line_text: String,
    tag_codes: Vec<i32>,
    current_token_length: usize,
    screen_column: usize,
}

impl TokenEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen_column(&self) -> usize {
        self.screen_column
    }

    /// Append one rendered character to the current token.
    pub fn emit_char(&mut self, character: char) {
        self.line_text.push(character);
        self.current_token_length += 1;
        self.screen_column += 1;
    }

    /// Append rendered text; length is counted in character units.
    pub fn emit_text(&mut self, text: &str) {
        self.line_text.push_str(text);
        let units = text.chars().count();
        self.current_token_length += units;
        self.screen_column += units;
    }

    /// Flush the accumulated token length as a prefix, if any.
    pub fn emit_token_boundary(&mut self) {
        if self.current_token_length > 0 {
            self.tag_codes.push(self.current_token_length as i32);
            self.current_token_length = 0;
        }
    }

    /// Keep open/close pairs separated by a prefix even when the token
    /// between them is empty.
    fn emit_empty_token_if_needed(&mut self) {
        if self.tag_codes.last().is_some_and(|&last| is_open_tag_code(last)) {
            self.tag_codes.push(0);
        }
    }

    pub fn open_tag(&mut self, code: i32) {
        debug_assert!(is_open_tag_code(code), "open_tag requires an open code");
        self.emit_token_boundary();
        self.tag_codes.push(code);
    }

    pub fn close_tag(&mut self, code: i32) {
        debug_assert!(is_close_tag_code(code), "close_tag requires a close code");
        self.emit_token_boundary();
        self.emit_empty_token_if_needed();
        self.tag_codes.push(code);
    }

    /// Finish the line: flush the pending token, guarantee a non-empty code
    /// stream, and reset all per-line state (including the screen column).
    pub fn take_line(&mut self) -> (String, Vec<i32>) {
        self.emit_token_boundary();
        if self.tag_codes.is_empty() {
            self.tag_codes.push(0);
        }
        self.current_token_length = 0;
        self.screen_column = 0;
        (
            std::mem::take(&mut self.line_text),
            std::mem::take(&mut self.tag_codes),
        )
    }
}
