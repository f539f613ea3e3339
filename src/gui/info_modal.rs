use eframe::egui;

#[derive(Default, Clone)]
struct InfoData {
    title: String,
    message: String,
}

/// Acknowledge-only dialog for quiz results and export confirmations.
pub struct InfoModal {
    open: bool,
    data: InfoData,
}

impl InfoModal {
    pub fn new() -> Self {
        Self { open: false, data: InfoData::default() }
    }

    pub fn show_info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.data = InfoData { title: title.into(), message: message.into() };
        self.open = true;
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        let modal = egui::Modal::new(egui::Id::new("info_modal")).show(ctx, |ui| {
            ui.set_width(380.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("ℹ").size(24.0).color(ui.visuals().hyperlink_color));
                ui.label(egui::RichText::new(&self.data.title).size(18.0).strong());
            });
            ui.add_space(8.0);
            ui.label(egui::RichText::new(&self.data.message).size(15.0));
            ui.add_space(15.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    ui.close();
                }
            });
        });

        if modal.should_close() {
            self.open = false;
            self.data = InfoData::default();
        }
    }
}

impl Default for InfoModal {
    fn default() -> Self {
        Self::new()
    }
}
