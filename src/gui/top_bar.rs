use eframe::egui;

use crate::{
    config::ScreenFeatures,
    core::models::ViewMode,
    gui::theme::Theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopBarAction {
    ToggleDarkMode,
    OpenSettings,
    OpenApiKey,
    UploadPdf,
    OpenPhoto,
    SelectView(ViewMode),
}

pub struct TopBarState<'a> {
    pub features: ScreenFeatures,
    pub dark_mode: bool,
    pub busy: bool,
    pub has_text: bool,
    pub file_name: Option<&'a str>,
    pub view_mode: ViewMode,
}

pub struct TopBar;

impl TopBar {
    pub fn show(ctx: &egui::Context, state: &TopBarState<'_>, theme: &Theme) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("Dyslexia Reader").size(22.0).strong().color(theme.accent(ctx)),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if state.features.settings_panel && ui.button("⚙").on_hover_text("Settings").clicked()
                    {
                        action = Some(TopBarAction::OpenSettings);
                    }

                    if state.features.dark_mode {
                        let icon = if state.dark_mode { "☀" } else { "🌙" };
                        if ui.button(icon).on_hover_text("Toggle dark mode").clicked() {
                            action = Some(TopBarAction::ToggleDarkMode);
                        }
                    }

                    if ui.button("🔑").on_hover_text("API key").clicked() {
                        action = Some(TopBarAction::OpenApiKey);
                    }
                });
            });
            ui.add_space(4.0);

            if let Some(upload) = Self::upload_bar(ui, state) {
                action = Some(upload);
            }

            if let Some(name) = state.file_name {
                ui.label(format!("📄 {name}"));
            }

            if let Some(select) = Self::view_mode_toggles(ui, state, theme) {
                action = Some(select);
            }
            ui.add_space(6.0);
        });

        action
    }

    fn upload_bar(ui: &mut egui::Ui, state: &TopBarState<'_>) -> Option<TopBarAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.add_enabled_ui(!state.busy, |ui| {
                if ui.button("📂 Upload PDF").clicked() {
                    action = Some(TopBarAction::UploadPdf);
                }
                if state.features.image_capture && ui.button("📷 Open Photo").clicked() {
                    action = Some(TopBarAction::OpenPhoto);
                }
            });
        });

        action
    }

    fn view_mode_toggles(
        ui: &mut egui::Ui,
        state: &TopBarState<'_>,
        theme: &Theme,
    ) -> Option<TopBarAction> {
        let mut action = None;
        let enabled = !state.busy && state.has_text;

        ui.horizontal(|ui| {
            ui.add_enabled_ui(enabled, |ui| {
                for mode in ViewMode::ALL {
                    let selected = state.view_mode == mode;
                    let mut text = egui::RichText::new(mode.label());
                    if selected {
                        text = text.strong().color(theme.accent(ui.ctx()));
                    }
                    if ui.selectable_label(selected, text).clicked() {
                        action = Some(TopBarAction::SelectView(mode));
                    }
                }
            });
        });

        action
    }
}
