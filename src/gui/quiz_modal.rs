use eframe::egui;

use crate::core::quiz::{
    QuizScore,
    QuizSession,
};

pub struct QuizModal {
    open: bool,
}

impl QuizModal {
    pub fn new() -> Self {
        Self { open: false }
    }

    /// Reopening always starts from a blank answer sheet.
    pub fn open(&mut self, session: &mut QuizSession) {
        session.reset_selections();
        self.open = true;
    }

    /// Returns the score once the user submits.
    pub fn show(&mut self, ctx: &egui::Context, session: &mut QuizSession) -> Option<QuizScore> {
        if !self.open {
            return None;
        }

        let mut result = None;

        let modal = egui::Modal::new(egui::Id::new("quiz_modal")).show(ctx, |ui| {
            ui.set_width(520.0);
            ui.heading("Comprehension Quiz");
            ui.add_space(10.0);

            egui::ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
                let mut picked = None;
                for (index, question) in session.questions().iter().enumerate() {
                    ui.label(
                        egui::RichText::new(format!("{}. {}", index + 1, question.question))
                            .strong(),
                    );
                    for option in &question.options {
                        let selected = session.selection(index) == Some(option.as_str());
                        if ui.radio(selected, option).clicked() {
                            picked = Some((index, option.clone()));
                        }
                    }
                    ui.add_space(8.0);
                }
                if let Some((index, option)) = picked {
                    session.select_answer(index, option);
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Submit Quiz").clicked() {
                    result = Some(session.submit());
                    ui.close();
                }
                if ui.button("Close").clicked() {
                    ui.close();
                }
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        result
    }
}

impl Default for QuizModal {
    fn default() -> Self {
        Self::new()
    }
}
