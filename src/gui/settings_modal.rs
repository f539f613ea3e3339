use eframe::egui::{
    self,
    Modal,
    Slider,
    SliderClamping,
};

use crate::{
    core::presentation::{
        PresentationSettings,
        FONT_SIZE_RANGE,
        LETTER_SPACING_RANGE,
        LINE_HEIGHT_RANGE,
        WORD_SPACING_RANGE,
    },
    gui::theme::hex_to_color32,
};

/// Edits a draft copy of the presentation settings; nothing is applied until saved.
pub struct SettingsModal {
    open: bool,
    draft: PresentationSettings,
    original: PresentationSettings,
    allow_dark_mode: bool,
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsModal {
    pub fn new() -> Self {
        Self {
            open: false,
            draft: PresentationSettings::default(),
            original: PresentationSettings::default(),
            allow_dark_mode: true,
        }
    }

    pub fn open_settings(&mut self, current: &PresentationSettings, allow_dark_mode: bool) {
        self.draft = current.clone();
        self.original = current.clone();
        self.allow_dark_mode = allow_dark_mode;
        self.open = true;
    }

    fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Option<PresentationSettings> {
        if !self.open {
            return None;
        }

        let mut result = None;

        let modal = Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(420.0);
            ui.heading("Settings");
            ui.add_space(10.0);

            egui::Grid::new("presentation_grid").num_columns(2).spacing([12.0, 10.0]).show(
                ui,
                |ui| {
                    ui.label("Font Size");
                    let mut font_size = self.draft.font_size;
                    if ui.add(slider(&mut font_size, FONT_SIZE_RANGE, 1.0, 0)).changed() {
                        self.draft.set_font_size(font_size);
                    }
                    ui.end_row();

                    ui.label("Line Height");
                    let mut line_height = self.draft.line_height;
                    if ui.add(slider(&mut line_height, LINE_HEIGHT_RANGE, 0.1, 1)).changed() {
                        self.draft.set_line_height(line_height);
                    }
                    ui.end_row();

                    ui.label("Word Spacing");
                    let mut word_spacing = self.draft.word_spacing;
                    if ui.add(slider(&mut word_spacing, WORD_SPACING_RANGE, 0.01, 2)).changed() {
                        self.draft.set_word_spacing(word_spacing);
                    }
                    ui.end_row();

                    ui.label("Letter Spacing");
                    let mut letter_spacing = self.draft.letter_spacing;
                    if ui.add(slider(&mut letter_spacing, LETTER_SPACING_RANGE, 0.01, 2)).changed()
                    {
                        self.draft.set_letter_spacing(letter_spacing);
                    }
                    ui.end_row();

                    ui.label("Text Color");
                    let mut text_color = self.draft.text_color.clone();
                    if color_input(ui, &mut text_color, "e.g., #333333") {
                        self.draft.set_text_color(text_color);
                    }
                    ui.end_row();

                    ui.label("Background Color");
                    let mut background = self.draft.background_color.clone();
                    if color_input(ui, &mut background, "e.g., #F0F2F6") {
                        self.draft.set_background_color(background);
                    }
                    ui.end_row();

                    if self.allow_dark_mode {
                        ui.label("Dark Mode");
                        let mut dark_mode = self.draft.dark_mode;
                        if ui.checkbox(&mut dark_mode, "").changed() {
                            self.draft.set_dark_mode(dark_mode);
                        }
                        ui.end_row();
                    }
                },
            );

            ui.separator();

            ui.horizontal(|ui| {
                let save_clicked =
                    ui.add_enabled(self.is_dirty(), egui::Button::new("Save Settings")).clicked();
                let close_clicked = ui.button("Close Settings").clicked();

                let mut reset_clicked = false;
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    reset_clicked = ui.button("Restore Default").clicked();
                });

                if save_clicked {
                    result = Some(self.draft.clone());
                    self.original = self.draft.clone();
                    ui.close();
                } else if close_clicked {
                    ui.close();
                } else if reset_clicked {
                    let dark_mode = self.draft.dark_mode;
                    self.draft = PresentationSettings::default();
                    self.draft.set_dark_mode(dark_mode);
                }
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        result
    }
}

fn slider(
    value: &mut f32,
    range: std::ops::RangeInclusive<f32>,
    step: f64,
    decimals: usize,
) -> Slider<'_> {
    Slider::new(value, range).step_by(step).fixed_decimals(decimals).clamping(SliderClamping::Always)
}

/// Hex input with a live swatch; the swatch is hidden while the text does not parse.
fn color_input(ui: &mut egui::Ui, value: &mut String, hint: &str) -> bool {
    ui.horizontal(|ui| {
        let changed = ui
            .add(egui::TextEdit::singleline(value).hint_text(hint).desired_width(110.0))
            .changed();

        if let Some(color) = hex_to_color32(value) {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(22.0, 22.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 4.0, color);
        } else {
            ui.colored_label(ui.visuals().error_fg_color, "invalid");
        }

        changed
    })
    .inner
}
