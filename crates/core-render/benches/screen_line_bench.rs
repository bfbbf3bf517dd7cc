//! Throughput of the screen-line assembly hot path over a mixed document
//! (indentation, hard tabs, trailing whitespace, long wrapped lines).

use core_display::{DisplayContext, DisplayOptions, Hunk, TagRegistry};
use core_render::ScreenLineBuilder;
use core_text::{Buffer, Point};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

struct BenchDisplay {
    options: DisplayOptions,
    registry: TagRegistry,
    hunks: Vec<Hunk>,
    screen_line_count: usize,
}

impl DisplayContext for BenchDisplay {
    fn options(&self) -> &DisplayOptions {
        &self.options
    }
    fn screen_line_count(&self) -> usize {
        self.screen_line_count
    }
    fn translate_screen_position(&self, position: Point) -> Point {
        position
    }
    fn hunks_in_new_range(&self, _start: Point, _end: Point) -> Vec<Hunk> {
        self.hunks.clone()
    }
    fn leading_whitespace_length_for_surrounding_lines(&self, _buffer_row: usize) -> usize {
        4
    }
    fn code_for_open_tag(&self, name: &str) -> i32 {
        self.registry.code_for_open_tag(name)
    }
    fn code_for_close_tag(&self, name: &str) -> i32 {
        self.registry.code_for_close_tag(name)
    }
}

fn mixed_document(line_count: usize) -> String {
    let mut text = String::new();
    for row in 0..line_count {
        match row % 5 {
            0 => text.push_str("\tfn step(input: &str) -> usize {  \n"),
            1 => text.push_str("        let total = input.chars().count();\n"),
            2 => text.push_str("    total * 31 % 97\t\t\n"),
            3 => text.push_str("}\n"),
            _ => text.push('\n'),
        }
    }
    text
}

fn bench_build_screen_lines(c: &mut Criterion) {
    let mut options = DisplayOptions::default();
    options.tab_length = 4;
    options.show_indent_guides = true;
    options.invisibles.space = Some('·');
    options.invisibles.tab = Some('»');
    options.eol_invisibles.lf = Some('¬');

    let text = mixed_document(400);
    let buffer = Buffer::from_str(&text).unwrap();
    let display = BenchDisplay {
        options,
        registry: TagRegistry::new(),
        hunks: Vec::new(),
        screen_line_count: 401,
    };

    c.bench_function("build_400_mixed_lines", |b| {
        let mut builder = ScreenLineBuilder::new();
        b.iter(|| {
            let lines = builder.build_screen_lines(
                black_box(&display),
                black_box(&buffer),
                0,
                display.screen_line_count(),
            );
            black_box(lines)
        })
    });
}

criterion_group!(benches, bench_build_screen_lines);
criterion_main!(benches);
