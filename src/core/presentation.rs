use std::ops::RangeInclusive;

use serde::{
    Deserialize,
    Serialize,
};

pub const LIGHT_TEXT_COLOR: &str = "#333333";
pub const LIGHT_BACKGROUND_COLOR: &str = "#F0F2F6";
pub const DARK_TEXT_COLOR: &str = "#E0E0E0";
pub const DARK_BACKGROUND_COLOR: &str = "#121212";

// Slider ranges. The store itself accepts anything.
pub const FONT_SIZE_RANGE: RangeInclusive<f32> = 14.0..=30.0;
pub const LINE_HEIGHT_RANGE: RangeInclusive<f32> = 1.2..=2.5;
pub const WORD_SPACING_RANGE: RangeInclusive<f32> = 0.0..=0.5;
pub const LETTER_SPACING_RANGE: RangeInclusive<f32> = 0.0..=0.2;

/// Typography and color preferences for the reading pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationSettings {
    pub font_size: f32,
    pub line_height: f32,
    pub word_spacing: f32,
    pub letter_spacing: f32,
    pub text_color: String,
    pub background_color: String,
    pub dark_mode: bool,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            font_size: 18.0,
            line_height: 1.6,
            word_spacing: 0.1,
            letter_spacing: 0.05,
            text_color: LIGHT_TEXT_COLOR.to_string(),
            background_color: LIGHT_BACKGROUND_COLOR.to_string(),
            dark_mode: false,
        }
    }
}

impl PresentationSettings {
    /// Flips dark mode and snaps both colors to the matching fixed pair.
    ///
    /// Any custom text or background color is overwritten.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.set_dark_mode(!self.dark_mode);
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
        let (text, background) = if enabled {
            (DARK_TEXT_COLOR, DARK_BACKGROUND_COLOR)
        } else {
            (LIGHT_TEXT_COLOR, LIGHT_BACKGROUND_COLOR)
        };
        self.text_color = text.to_string();
        self.background_color = background.to_string();
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    pub fn set_line_height(&mut self, multiplier: f32) {
        self.line_height = multiplier;
    }

    pub fn set_word_spacing(&mut self, spacing: f32) {
        self.word_spacing = spacing;
    }

    pub fn set_letter_spacing(&mut self, spacing: f32) {
        self.letter_spacing = spacing;
    }

    pub fn set_text_color(&mut self, color: impl Into<String>) {
        self.text_color = color.into();
    }

    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.background_color = color.into();
    }

    pub fn line_height_px(&self) -> f32 {
        self.font_size * self.line_height
    }
}

/// Parses `#RRGGBB` or `#RGB` into RGB bytes.
pub fn parse_hex_color(input: &str) -> Option<[u8; 3]> {
    let hex = input.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some([channel(0)?, channel(2)?, channel(4)?])
        }
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some([channel(0)?, channel(1)?, channel(2)?])
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_colors() {
        let mut settings = PresentationSettings::default();
        let original = settings.clone();

        assert!(settings.toggle_dark_mode());
        assert_eq!(settings.text_color, DARK_TEXT_COLOR);
        assert_eq!(settings.background_color, DARK_BACKGROUND_COLOR);

        assert!(!settings.toggle_dark_mode());
        assert_eq!(settings, original);
    }

    #[test]
    fn toggle_discards_custom_colors() {
        let mut settings = PresentationSettings::default();
        settings.set_text_color("#112233");
        settings.toggle_dark_mode();
        settings.toggle_dark_mode();
        assert_eq!(settings.text_color, LIGHT_TEXT_COLOR);
    }

    #[test]
    fn out_of_range_values_are_accepted() {
        let mut settings = PresentationSettings::default();
        settings.set_font_size(99.0);
        settings.set_letter_spacing(-1.0);
        assert_eq!(settings.font_size, 99.0);
        assert_eq!(settings.letter_spacing, -1.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: PresentationSettings = serde_json::from_str(r#"{"font_size": 24.0}"#).unwrap();
        assert_eq!(settings.font_size, 24.0);
        assert_eq!(settings.line_height, 1.6);
        assert_eq!(settings.text_color, LIGHT_TEXT_COLOR);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#F0F2F6"), Some([0xF0, 0xF2, 0xF6]));
        assert_eq!(parse_hex_color(" #fff "), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("333333"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }
}
