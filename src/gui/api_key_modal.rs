use eframe::egui;

use super::modal::{
    action_buttons,
    Modal,
    ModalConfig,
    ModalResult,
};
use crate::core::text::is_blank;

const EXPLANATION: &str = "This key is used for local app functionality. The backend uses its \
                           own key. You can get one for free from Google AI Studio \
                           (aistudio.google.com).";

pub struct ApiKeyModal {
    modal: Modal<String>,
}

impl ApiKeyModal {
    pub fn new() -> Self {
        let config = ModalConfig { close_on_outside_click: true, ..Default::default() };
        Self { modal: Modal::new("Enter Gemini API Key").with_config(config) }
    }

    pub fn open(&mut self, current: Option<&str>) {
        self.modal.open_with(current.unwrap_or_default().to_string());
    }

    /// Returns the key the user chose to save. Blank keys cannot be confirmed.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<String> {
        let result = self.modal.show(ctx, |ui, key| {
            ui.set_width(380.0);
            ui.label(EXPLANATION);
            ui.add_space(8.0);
            ui.add(
                egui::TextEdit::singleline(key)
                    .password(true)
                    .hint_text("YOUR_GEMINI_API_KEY")
                    .desired_width(f32::INFINITY),
            );

            let blank = is_blank(key);
            if blank {
                ui.colored_label(ui.visuals().error_fg_color, "API Key cannot be empty!");
            }
            ui.add_space(8.0);
            action_buttons(ui, key, "Save Key", "Cancel", !blank)
        });

        match result {
            Some(ModalResult::Confirmed(key)) => Some(key.trim().to_string()),
            Some(ModalResult::Cancelled) | None => None,
        }
    }
}

impl Default for ApiKeyModal {
    fn default() -> Self {
        Self::new()
    }
}
