#![allow(dead_code)] // Shared across integration test binaries; each uses a subset.

use core_display::{
    DisplayContext, DisplayOptions, Hunk, TagRegistry, is_close_tag_code, is_open_tag_code,
};
use core_render::ScreenLine;
use core_text::Point;

/// Display-layer stand-in for builder tests. Serves a fixed option set, a
/// pre-sorted hunk list (tests request full ranges, so range filtering is
/// not simulated), an explicit screen-line count, and a real `TagRegistry`.
pub struct TestDisplay {
    pub options: DisplayOptions,
    pub registry: TagRegistry,
    pub hunks: Vec<Hunk>,
    pub screen_line_count: usize,
    pub surrounding_indent: usize,
    /// Screen -> buffer translations consulted before falling back to
    /// identity; enough for fixtures whose requested start row is not 0.
    pub translations: Vec<(Point, Point)>,
}

impl TestDisplay {
    pub fn new(options: DisplayOptions, screen_line_count: usize) -> Self {
        Self {
            options,
            registry: TagRegistry::new(),
            hunks: Vec::new(),
            screen_line_count,
            surrounding_indent: 0,
            translations: Vec::new(),
        }
    }

    pub fn with_hunks(mut self, mut hunks: Vec<Hunk>) -> Self {
        hunks.sort_by_key(|hunk| hunk.old_start);
        self.hunks = hunks;
        self
    }

    pub fn with_surrounding_indent(mut self, indent: usize) -> Self {
        self.surrounding_indent = indent;
        self
    }
}

impl DisplayContext for TestDisplay {
    fn options(&self) -> &DisplayOptions {
        &self.options
    }

    fn screen_line_count(&self) -> usize {
        self.screen_line_count
    }

    fn translate_screen_position(&self, position: Point) -> Point {
        self.translations
            .iter()
            .find(|(screen, _)| *screen == position)
            .map(|&(_, buffer)| buffer)
            .unwrap_or(position)
    }

    fn hunks_in_new_range(&self, _start: Point, _end: Point) -> Vec<Hunk> {
        self.hunks.clone()
    }

    fn leading_whitespace_length_for_surrounding_lines(&self, _buffer_row: usize) -> usize {
        self.surrounding_indent
    }

    fn code_for_open_tag(&self, name: &str) -> i32 {
        self.registry.code_for_open_tag(name)
    }

    fn code_for_close_tag(&self, name: &str) -> i32 {
        self.registry.code_for_close_tag(name)
    }
}

/// Render a tag stream as readable markup for assertions: length prefixes as
/// numbers, open codes as `<name>`, close codes as `</name>`.
pub fn decode_tag_codes(codes: &[i32], registry: &TagRegistry) -> Vec<String> {
    codes
        .iter()
        .map(|&code| {
            if code >= 0 {
                code.to_string()
            } else {
                let name = registry
                    .tag_for_code(code)
                    .expect("tag code unknown to the registry");
                if is_open_tag_code(code) {
                    format!("<{name}>")
                } else {
                    format!("</{name}>")
                }
            }
        })
        .collect()
}

/// Assert the universal output invariants for one screen line.
pub fn assert_screen_line_invariants(line: &ScreenLine) {
    assert!(
        !line.tag_codes.is_empty(),
        "tag stream must be non-empty (line {:?})",
        line.line_text
    );
    assert_eq!(
        line.length_prefix_sum(),
        line.line_text.chars().count(),
        "length prefixes must sum to the rendered length (line {:?}, codes {:?})",
        line.line_text,
        line.tag_codes
    );
    let mut open_stack: Vec<i32> = Vec::new();
    for &code in &line.tag_codes {
        if code >= 0 {
            continue;
        }
        if is_open_tag_code(code) {
            open_stack.push(code);
        } else {
            assert!(is_close_tag_code(code));
            let open = open_stack.pop().expect("close without matching open");
            assert_eq!(code, open - 1, "close must match most recent open");
        }
    }
    assert!(open_stack.is_empty(), "unclosed tags at end of line");
}
