//! Display option set + TOML parsing.
//!
//! Options arrive either programmatically or from a `[display]` TOML table
//! supplied by the embedding application; unknown fields are ignored so the
//! format can grow without breaking older configs. Parsing is string-in only,
//! the display layer has no file-system surface of its own.

use core_text::LineEnding;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("tab length must be at least 1 (got {0})")]
    InvalidTabLength(usize),
    #[error("fold character must be non-empty")]
    EmptyFoldCharacter,
    #[error("failed to parse display options: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Glyphs substituted for ordinary whitespace. Single characters so every
/// substitution is length-preserving in character units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Invisibles {
    #[serde(default)]
    pub space: Option<char>,
    #[serde(default)]
    pub tab: Option<char>,
}

/// Glyphs appended for line terminators, keyed by terminator kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct EolInvisibles {
    #[serde(default)]
    pub lf: Option<char>,
    #[serde(default)]
    pub crlf: Option<char>,
}

impl EolInvisibles {
    pub fn for_ending(&self, ending: LineEnding) -> Option<char> {
        match ending {
            LineEnding::None => None,
            LineEnding::Lf => self.lf,
            LineEnding::CrLf => self.crlf,
        }
    }
}

/// Read-only rendering options owned by the display layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Screen columns per tab stop; always >= 1.
    pub tab_length: usize,
    /// Placeholder text a fold collapses to. Non-empty; its character count
    /// becomes the length of the emitted `fold-marker` token.
    pub fold_character: String,
    pub invisibles: Invisibles,
    pub eol_invisibles: EolInvisibles,
    pub show_indent_guides: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            tab_length: default_tab_length(),
            fold_character: default_fold_character(),
            invisibles: Invisibles::default(),
            eol_invisibles: EolInvisibles::default(),
            show_indent_guides: false,
        }
    }
}

fn default_tab_length() -> usize {
    2
}

fn default_fold_character() -> String {
    "⋯".to_string()
}

/// Raw `[display]` table as deserialized; converted via `validate`.
#[derive(Debug, Clone, Deserialize)]
struct DisplaySection {
    #[serde(default = "default_tab_length")]
    tab_length: usize,
    #[serde(default = "default_fold_character")]
    fold_character: String,
    #[serde(default)]
    show_indent_guides: bool,
    #[serde(default)]
    invisibles: Invisibles,
    #[serde(default)]
    eol_invisibles: EolInvisibles,
}

// Keep the whole-table default (used when `[display]` is absent) in sync with
// the per-field serde defaults above.
impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            tab_length: default_tab_length(),
            fold_character: default_fold_character(),
            show_indent_guides: false,
            invisibles: Invisibles::default(),
            eol_invisibles: EolInvisibles::default(),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
struct OptionsFile {
    #[serde(default)]
    display: DisplaySection,
}

impl DisplayOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.tab_length == 0 {
            return Err(OptionsError::InvalidTabLength(self.tab_length));
        }
        if self.fold_character.is_empty() {
            return Err(OptionsError::EmptyFoldCharacter);
        }
        Ok(())
    }

    /// Parse options from a TOML document with a `[display]` table. Missing
    /// fields fall back to defaults; unknown fields are tolerated.
    pub fn from_toml_str(source: &str) -> Result<Self, OptionsError> {
        let file: OptionsFile = toml::from_str(source)?;
        let section = file.display;
        let options = DisplayOptions {
            tab_length: section.tab_length,
            fold_character: section.fold_character,
            invisibles: section.invisibles,
            eol_invisibles: section.eol_invisibles,
            show_indent_guides: section.show_indent_guides,
        };
        options.validate()?;
        debug!(
            target: "display.options",
            tab_length = options.tab_length,
            show_indent_guides = options.show_indent_guides,
            "display options parsed"
        );
        Ok(options)
    }
}
