//! Decoration flag set and canonical tag-name synthesis.

use ahash::AHashMap;
use bitflags::bitflags;
use std::sync::Arc;

bitflags! {
    /// Decoration roles a run of rendered text can carry. A mask maps to a
    /// canonical space-separated tag name via `tag_name_for_flags`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DecorationFlags: u8 {
        const INVISIBLE_CHARACTER = 0b0000_0001;
        const HARD_TAB            = 0b0000_0010;
        const LEADING_WHITESPACE  = 0b0000_0100;
        const TRAILING_WHITESPACE = 0b0000_1000;
        const LINE_ENDING         = 0b0001_0000;
        const INDENT_GUIDE        = 0b0010_0000;
        const FOLD                = 0b0100_0000;
    }
}

/// Name fragments in canonical emission order. The order is part of the
/// output contract: a compound mask always yields the same tag string.
const TAG_NAMES: [(DecorationFlags, &str); 7] = [
    (DecorationFlags::INVISIBLE_CHARACTER, "invisible-character"),
    (DecorationFlags::HARD_TAB, "hard-tab"),
    (DecorationFlags::LEADING_WHITESPACE, "leading-whitespace"),
    (DecorationFlags::TRAILING_WHITESPACE, "trailing-whitespace"),
    (DecorationFlags::LINE_ENDING, "eol"),
    (DecorationFlags::INDENT_GUIDE, "indent-guide"),
    (DecorationFlags::FOLD, "fold-marker"),
];

/// Assemble the canonical tag name for a mask. Pure; prefer the memoizing
/// `TagVocabulary` on hot paths.
pub fn tag_name_for_flags(flags: DecorationFlags) -> String {
    let mut name = String::new();
    for (flag, fragment) in TAG_NAMES {
        if flags.contains(flag) {
            if !name.is_empty() {
                name.push(' ');
            }
            name.push_str(fragment);
        }
    }
    name
}

/// Memo for the pure flags -> tag-name mapping. At most 2^7 entries; filled
/// on demand and retained by the builder across calls.
#[derive(Debug, Default)]
pub struct TagVocabulary {
    names: AHashMap<u8, Arc<str>>,
}

impl TagVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name_for(&mut self, flags: DecorationFlags) -> Arc<str> {
        self.names
            .entry(flags.bits())
            .or_insert_with(|| Arc::from(tag_name_for_flags(flags).as_str()))
            .clone()
    }
}
