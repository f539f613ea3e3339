use eframe::egui;

use crate::core::{
    tasks::TaskFailure,
    ReaderError,
};

#[derive(Default, Clone)]
pub struct ErrorData {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

/// Dialog for failures the user should see. Errors are terminal; there is no retry button.
pub struct ErrorModal {
    open: bool,
    data: ErrorData,
}

impl ErrorModal {
    pub fn new() -> Self {
        Self { open: false, data: ErrorData::default() }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn show_error(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        details: Option<String>,
    ) {
        self.data = ErrorData { title: title.into(), message: message.into(), details };
        self.open = true;
    }

    pub fn show_failure(&mut self, title: impl Into<String>, failure: TaskFailure) {
        let details = (failure.details != failure.message).then_some(failure.details);
        self.show_error(title, failure.message, details);
    }

    pub fn show_reader_error(&mut self, title: impl Into<String>, error: &ReaderError) {
        let message = error.user_message();
        let details = match error {
            ReaderError::EmptyInput(_) => None,
            other => Some(format!("{other:?}")),
        };
        self.show_error(title, message, details);
    }

    pub fn show(&mut self, ctx: &egui::Context) -> bool {
        if !self.open {
            return false;
        }

        let modal = egui::Modal::new(egui::Id::new("error_modal")).show(ctx, |ui| {
            ui.set_width(420.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("⚠").size(24.0).color(ui.visuals().error_fg_color));
                ui.label(egui::RichText::new(&self.data.title).size(18.0).strong());
            });

            ui.add_space(10.0);
            ui.label(egui::RichText::new(&self.data.message).size(15.0));

            if let Some(details) = &self.data.details {
                ui.add_space(10.0);
                ui.collapsing("Details", |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut details.as_str())
                            .desired_width(f32::INFINITY)
                            .desired_rows(4)
                            .code_editor(),
                    );
                });
            }

            ui.add_space(15.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    ui.close();
                }
            });
        });

        if modal.should_close() {
            self.open = false;
            self.data = ErrorData::default();
            return true;
        }

        false
    }
}

impl Default for ErrorModal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_details() {
        let mut modal = ErrorModal::new();
        modal.show_reader_error("Quiz", &ReaderError::EmptyInput("No text".into()));
        assert!(modal.is_open());
        assert_eq!(modal.data.message, "No text");
        assert!(modal.data.details.is_none());
    }

    #[test]
    fn failure_details_are_kept_when_distinct() {
        let mut modal = ErrorModal::new();
        modal.show_failure(
            "Upload Failed",
            TaskFailure { message: "Bad PDF".into(), details: "Service { status: 400 }".into() },
        );
        assert_eq!(modal.data.details.as_deref(), Some("Service { status: 400 }"));
    }
}
