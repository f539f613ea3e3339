use eframe::egui::{
    self,
    epaint::Shadow,
    style::{
        Selection,
        WidgetVisuals,
        Widgets,
    },
    Color32,
    Stroke,
    Visuals,
};

use crate::core::presentation::{
    parse_hex_color,
    DARK_BACKGROUND_COLOR,
    DARK_TEXT_COLOR,
    LIGHT_BACKGROUND_COLOR,
    LIGHT_TEXT_COLOR,
};

#[derive(Clone)]
pub struct Theme {
    dark: ThemeDetails,
    light: ThemeDetails,
}

impl Default for Theme {
    fn default() -> Self {
        Self::reader()
    }
}

impl Theme {
    pub fn reader() -> Self {
        Theme { dark: ThemeDetails::reader_dark(), light: ThemeDetails::reader_light() }
    }

    fn details(&self, ctx: &egui::Context) -> &ThemeDetails {
        match ctx.theme() {
            egui::Theme::Dark => &self.dark,
            egui::Theme::Light => &self.light,
        }
    }

    pub fn accent(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).accent
    }

    /// Background behind the sentence currently being read aloud.
    pub fn highlight(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).highlight
    }

    /// Reading-pane colors, falling back to the palette when a stored color is malformed.
    pub fn reading_colors(&self, text: &str, background: &str, dark: bool) -> (Color32, Color32) {
        let (fallback_text, fallback_background) = if dark {
            (DARK_TEXT_COLOR, DARK_BACKGROUND_COLOR)
        } else {
            (LIGHT_TEXT_COLOR, LIGHT_BACKGROUND_COLOR)
        };
        (
            color_or(text, fallback_text),
            color_or(background, fallback_background),
        )
    }
}

pub fn hex_to_color32(input: &str) -> Option<Color32> {
    parse_hex_color(input).map(|[r, g, b]| Color32::from_rgb(r, g, b))
}

fn color_or(input: &str, fallback: &str) -> Color32 {
    hex_to_color32(input).or_else(|| hex_to_color32(fallback)).unwrap_or(Color32::GRAY)
}

#[derive(Clone)]
struct ThemeDetails {
    background: Color32,
    foreground: Color32,
    selection: Color32,
    accent: Color32,
    highlight: Color32,
    red: Color32,
    background_dark: Color32,
    background_light: Color32,
}

impl ThemeDetails {
    fn reader_light() -> Self {
        Self {
            background: Color32::from_rgb(0xF0, 0xF2, 0xF6),
            foreground: Color32::from_rgb(0x33, 0x33, 0x33),
            selection: Color32::from_rgb(200, 214, 240),
            accent: Color32::from_rgb(0x2E, 0x6B, 0xD8),
            highlight: Color32::from_rgb(255, 236, 153),
            red: Color32::from_rgb(200, 80, 80),
            background_dark: Color32::from_rgb(226, 230, 238),
            background_light: Color32::from_rgb(255, 255, 255),
        }
    }

    fn reader_dark() -> Self {
        Self {
            background: Color32::from_rgb(0x12, 0x12, 0x12),
            foreground: Color32::from_rgb(0xE0, 0xE0, 0xE0),
            selection: Color32::from_rgb(60, 70, 96),
            accent: Color32::from_rgb(110, 160, 255),
            highlight: Color32::from_rgb(92, 80, 30),
            red: Color32::from_rgb(255, 121, 121),
            background_dark: Color32::from_rgb(8, 8, 8),
            background_light: Color32::from_rgb(36, 36, 40),
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    set_theme_variant(ctx, &theme.dark, true);
    set_theme_variant(ctx, &theme.light, false);
}

pub fn apply_dark_mode(ctx: &egui::Context, enabled: bool) {
    ctx.set_theme(if enabled { egui::Theme::Dark } else { egui::Theme::Light });
}

fn set_theme_variant(ctx: &egui::Context, theme: &ThemeDetails, is_dark: bool) {
    let (default, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };

    let widget = |base: WidgetVisuals, bg_fill: Color32, stroke: Color32| WidgetVisuals {
        bg_fill,
        weak_bg_fill: bg_fill,
        bg_stroke: Stroke { color: stroke, ..base.bg_stroke },
        fg_stroke: Stroke { color: theme.foreground, ..base.fg_stroke },
        ..base
    };

    ctx.set_visuals_of(
        variant,
        Visuals {
            dark_mode: is_dark,
            widgets: Widgets {
                noninteractive: widget(
                    default.widgets.noninteractive,
                    theme.background,
                    theme.background_dark,
                ),
                inactive: widget(
                    default.widgets.inactive,
                    theme.background_light,
                    theme.background_dark,
                ),
                hovered: widget(default.widgets.hovered, theme.selection, theme.accent),
                active: widget(default.widgets.active, theme.selection, theme.accent),
                open: widget(default.widgets.open, theme.background_dark, theme.accent),
            },
            selection: Selection {
                bg_fill: theme.selection,
                stroke: Stroke { color: theme.foreground, ..default.selection.stroke },
            },
            hyperlink_color: theme.accent,
            extreme_bg_color: theme.background_dark,
            error_fg_color: theme.red,
            window_shadow: Shadow { color: theme.background_dark, ..default.window_shadow },
            window_fill: theme.background,
            window_stroke: Stroke { color: theme.background_light, ..default.window_stroke },
            panel_fill: theme.background,
            ..default
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_colors_fall_back_to_palette() {
        let theme = Theme::reader();
        let (text, background) = theme.reading_colors("nope", "#FFF", true);
        assert_eq!(text, Color32::from_rgb(0xE0, 0xE0, 0xE0));
        assert_eq!(background, Color32::WHITE);
    }
}
