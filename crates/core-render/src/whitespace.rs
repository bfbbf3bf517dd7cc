//! Whitespace role classification.
//!
//! For each buffer column the classifier decides which decoration flags the
//! character carries and whether a token boundary must be forced even when
//! the flag set is unchanged (adjacent hard tabs, indent-guide spaces
//! straddling a tab stop). State is per buffer line and must be rebased when
//! a fold splices a different tail onto the current line.

use core_display::{DecorationFlags, DisplayOptions};

/// First column of the maximal trailing run of spaces/tabs, or the line
/// length when the line has no trailing whitespace.
pub fn trailing_whitespace_start_column(chars: &[char]) -> usize {
    let mut start = chars.len();
    for (column, &c) in chars.iter().enumerate().rev() {
        if c == ' ' || c == '\t' {
            start = column;
        } else {
            break;
        }
    }
    start
}

/// Outcome for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub flags: DecorationFlags,
    pub force_token_boundary: bool,
}

#[derive(Debug)]
pub struct WhitespaceClassifier {
    in_leading_whitespace: bool,
    in_trailing_whitespace: bool,
    trailing_whitespace_start_column: usize,
}

impl WhitespaceClassifier {
    pub fn new() -> Self {
        Self {
            in_leading_whitespace: true,
            in_trailing_whitespace: false,
            trailing_whitespace_start_column: 0,
        }
    }

    /// Reset for a fresh buffer line.
    pub fn begin_line(&mut self, chars: &[char]) {
        self.in_leading_whitespace = true;
        self.in_trailing_whitespace = false;
        self.trailing_whitespace_start_column = trailing_whitespace_start_column(chars);
    }

    /// Recompute line-derived state after a fold replaced the line tail. The
    /// leading state is kept: text folded away at the line start does not
    /// turn the remainder into leading whitespace, and a fold inside the
    /// indent leaves it leading.
    pub fn rebase_after_fold(&mut self, chars: &[char]) {
        self.in_trailing_whitespace = false;
        self.trailing_whitespace_start_column = trailing_whitespace_start_column(chars);
    }

    pub fn in_leading_whitespace(&self) -> bool {
        self.in_leading_whitespace
    }

    pub fn in_trailing_whitespace(&self) -> bool {
        self.in_trailing_whitespace
    }

    /// Classify the character at `buffer_column` (`None` at end of line).
    /// `screen_column` locates tab stops; state advances as a side effect, so
    /// call exactly once per visited column.
    pub fn classify(
        &mut self,
        buffer_column: usize,
        next_character: Option<char>,
        screen_column: usize,
        options: &DisplayOptions,
    ) -> Classification {
        if buffer_column >= self.trailing_whitespace_start_column {
            self.in_trailing_whitespace = true;
            self.in_leading_whitespace = false;
        } else if !matches!(next_character, Some(' ') | Some('\t')) {
            self.in_leading_whitespace = false;
        }

        let mut flags = DecorationFlags::empty();
        let mut force_token_boundary = false;

        match next_character {
            Some(character @ (' ' | '\t')) => {
                // Guides apply to leading indentation and to lines that are
                // nothing but whitespace.
                let show_indent_guide = options.show_indent_guides
                    && (self.in_leading_whitespace || self.trailing_whitespace_start_column == 0);
                let on_tab_stop = screen_column % options.tab_length == 0;

                if self.in_leading_whitespace {
                    flags |= DecorationFlags::LEADING_WHITESPACE;
                }
                if self.in_trailing_whitespace {
                    flags |= DecorationFlags::TRAILING_WHITESPACE;
                }

                if character == ' ' {
                    if (self.in_leading_whitespace || self.in_trailing_whitespace)
                        && options.invisibles.space.is_some()
                    {
                        flags |= DecorationFlags::INVISIBLE_CHARACTER;
                    }
                    if show_indent_guide {
                        flags |= DecorationFlags::INDENT_GUIDE;
                        if on_tab_stop {
                            force_token_boundary = true;
                        }
                    }
                } else {
                    flags |= DecorationFlags::HARD_TAB;
                    if options.invisibles.tab.is_some() {
                        flags |= DecorationFlags::INVISIBLE_CHARACTER;
                    }
                    if show_indent_guide && on_tab_stop {
                        flags |= DecorationFlags::INDENT_GUIDE;
                    }
                    force_token_boundary = true;
                }
            }
            _ => {}
        }

        Classification {
            flags,
            force_token_boundary,
        }
    }
}

impl Default for WhitespaceClassifier {
    fn default() -> Self {
        Self::new()
    }
}
