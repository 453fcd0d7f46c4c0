//! Text cleanup pipeline for downstream language processing.
//!
//! Rendering keeps leaf text verbatim. Consumers that feed the result into a
//! generator usually want it tidier: normalized Unicode, one bullet glyph,
//! no invisible characters and bounded blank runs.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: NFC normalization and trailing whitespace
    Minimal,
    /// Standard cleanup: minimal + glyph and invisible character fixes
    #[default]
    Standard,
    /// Aggressive cleanup: standard + collapsed spacing, no blank lines
    Aggressive,
}

/// Options for text cleanup.
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Standardize bullet characters (●, ○, ▪ → •)
    pub standardize_bullets: bool,

    /// Remove zero-width spaces, joiners and BOMs
    pub remove_zero_width: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Strip whitespace at the end of every line
    pub strip_trailing_whitespace: bool,

    /// Collapse runs of spaces inside a line (leading indentation is kept)
    pub collapse_spaces: bool,

    /// Maximum consecutive newlines (0 = unlimited)
    pub max_consecutive_newlines: u8,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            standardize_bullets: false,
            remove_zero_width: false,
            remove_replacement_char: false,
            strip_trailing_whitespace: true,
            collapse_spaces: false,
            max_consecutive_newlines: 0,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            standardize_bullets: true,
            remove_zero_width: true,
            remove_replacement_char: true,
            strip_trailing_whitespace: true,
            collapse_spaces: false,
            max_consecutive_newlines: 2, // keeps the blank line between blocks
        }
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            normalize_unicode: true,
            standardize_bullets: true,
            remove_zero_width: true,
            remove_replacement_char: true,
            strip_trailing_whitespace: true,
            collapse_spaces: true,
            max_consecutive_newlines: 1,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
pub struct CleanupPipeline {
    options: CleanupOptions,
    space_run_regex: Regex,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self {
            options,
            space_run_regex: Regex::new(r"(\S)[ \t]{2,}").expect("static regex"),
        }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.replace("\r\n", "\n");

        // Stage 1: character-level fixes
        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.standardize_bullets {
            result = standardize_bullets(&result);
        }

        if self.options.remove_zero_width {
            result.retain(|c| !matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}'));
        }

        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        // Stage 2: line-level fixes
        if self.options.collapse_spaces {
            result = self.space_run_regex.replace_all(&result, "$1 ").to_string();
        }

        if self.options.strip_trailing_whitespace {
            result = result
                .split('\n')
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join("\n");
        }

        if self.options.max_consecutive_newlines > 0 {
            result = self.limit_newlines(&result);
        }

        result.trim().to_string()
    }

    fn limit_newlines(&self, text: &str) -> String {
        let max = self.options.max_consecutive_newlines as usize;
        let mut output = String::with_capacity(text.len());
        let mut run = 0;
        for c in text.chars() {
            if c == '\n' {
                run += 1;
                if run > max {
                    continue;
                }
            } else {
                run = 0;
            }
            output.push(c);
        }
        output
    }
}

fn standardize_bullets(text: &str) -> String {
    const BULLETS: [char; 10] = ['●', '○', '■', '□', '◆', '◇', '▪', '▫', '►', '▻'];
    text.chars()
        .map(|c| if BULLETS.contains(&c) { '•' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let minimal = CleanupOptions::from_preset(CleanupPreset::Minimal);
        assert!(minimal.normalize_unicode);
        assert!(!minimal.standardize_bullets);

        let aggressive = CleanupOptions::from_preset(CleanupPreset::Aggressive);
        assert!(aggressive.collapse_spaces);
        assert_eq!(aggressive.max_consecutive_newlines, 1);
    }

    #[test]
    fn test_nfc_normalization() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        assert_eq!(pipeline.process("Cafe\u{0301}"), "Café");
    }

    #[test]
    fn test_standardize_bullets() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(pipeline.process("● one\n▪ two"), "• one\n• two");
    }

    #[test]
    fn test_remove_invisible_characters() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(pipeline.process("ze\u{200B}ro\u{FFFD}"), "zero");
    }

    #[test]
    fn test_blank_line_between_blocks_kept() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(pipeline.process("a\n\n\n\nb  \n\nc"), "a\n\nb\n\nc");
    }

    #[test]
    fn test_aggressive_collapses_spacing() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Aggressive);
        assert_eq!(
            pipeline.process("• Parent    item\n  • Child\n\n\nNext"),
            "• Parent item\n  • Child\nNext"
        );
    }

    #[test]
    fn test_crlf_normalized() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        assert_eq!(pipeline.process("a\r\nb"), "a\nb");
    }
}
