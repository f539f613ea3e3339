use std::time::{
    Duration,
    Instant,
};

use eframe::egui;

use crate::gui::theme::Theme;

pub const SPLASH_DURATION: Duration = Duration::from_millis(2500);
const SPLASH_TITLE: &str = "Dyslexia Reader";
const SPLASH_TAGLINE: &str = "Making reading accessible for everyone";

pub struct MessageOverlay {
    pub active: bool,
    pub message: Option<String>,
    splash_until: Option<Instant>,
}

impl MessageOverlay {
    pub fn new() -> Self {
        Self { active: false, message: None, splash_until: None }
    }

    pub fn with_splash(duration: Duration) -> Self {
        Self { splash_until: Some(Instant::now() + duration), ..Self::new() }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.active = true;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
        self.active = false;
    }

    pub fn is_busy(&self) -> bool {
        self.active
    }

    pub fn splash_visible(&self) -> bool {
        self.splash_until.map(|until| Instant::now() < until).unwrap_or(false)
    }

    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme) {
        if self.splash_visible() {
            self.show_splash(ctx, theme);
            return;
        }
        self.splash_until = None;

        if self.active {
            egui::Area::new(egui::Id::new("message_overlay"))
                .order(egui::Order::Foreground)
                .fixed_pos(egui::Pos2::new(0.0, 0.0))
                .show(ctx, |ui| {
                    let screen_size = ui.ctx().screen_rect().size();
                    ui.allocate_space(screen_size);
                    ui.painter().rect_filled(
                        ui.ctx().screen_rect(),
                        0.0,
                        egui::Color32::from_black_alpha(120),
                    );
                });

            let message = self.message.as_deref().unwrap_or("Processing...");

            egui::Window::new("message_box")
                .order(egui::Order::Foreground)
                .collapsible(false)
                .resizable(false)
                .title_bar(false)
                .fixed_size(egui::Vec2::new(220.0, 100.0))
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::new(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.style_mut().visuals.window_stroke =
                        egui::Stroke::new(2.0, theme.accent(ui.ctx()));

                    ui.vertical_centered(|ui| {
                        ui.add_space(12.0);
                        ui.add(egui::Spinner::new());
                        ui.label(message);
                    });
                });
        }
    }

    fn show_splash(&self, ctx: &egui::Context, theme: &Theme) {
        let accent = theme.accent(ctx);

        egui::Area::new(egui::Id::new("splash_overlay"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::Pos2::ZERO)
            .show(ctx, |ui| {
                let screen = ui.ctx().screen_rect();
                ui.allocate_space(screen.size());
                ui.painter().rect_filled(screen, 0.0, ui.visuals().panel_fill);
                ui.painter().text(
                    screen.center() - egui::vec2(0.0, 20.0),
                    egui::Align2::CENTER_CENTER,
                    SPLASH_TITLE,
                    egui::FontId::proportional(36.0),
                    accent,
                );
                ui.painter().text(
                    screen.center() + egui::vec2(0.0, 24.0),
                    egui::Align2::CENTER_CENTER,
                    SPLASH_TAGLINE,
                    egui::FontId::proportional(16.0),
                    ui.visuals().text_color(),
                );
            });

        if let Some(until) = self.splash_until {
            ctx.request_repaint_after(until.saturating_duration_since(Instant::now()));
        }
    }
}

impl Default for MessageOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_message_toggles() {
        let mut overlay = MessageOverlay::new();
        assert!(!overlay.is_busy());
        overlay.set_message("Processing...");
        assert!(overlay.is_busy());
        overlay.clear_message();
        assert!(!overlay.is_busy());
        assert!(overlay.message.is_none());
    }

    #[test]
    fn splash_expires() {
        assert!(MessageOverlay::with_splash(Duration::from_secs(60)).splash_visible());
        assert!(!MessageOverlay::with_splash(Duration::ZERO).splash_visible());
    }
}
