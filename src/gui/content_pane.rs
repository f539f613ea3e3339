use std::ops::Range;

use eframe::egui::{
    self,
    text::LayoutJob,
    Color32,
    FontId,
    TextFormat,
};

use crate::{
    config::ScreenFeatures,
    core::{
        models::ViewMode,
        presentation::PresentationSettings,
        text::{
            is_blank,
            sentence_ranges,
        },
        ContentStore,
    },
    gui::theme::Theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentAction {
    Listen,
    StopListening,
    OpenQuiz,
    Export,
}

pub struct ContentView<'a> {
    pub store: &'a ContentStore,
    pub settings: &'a PresentationSettings,
    pub features: ScreenFeatures,
    pub narration_cursor: Option<usize>,
    pub narrating: bool,
}

pub struct ReadingStyle {
    pub font_size: f32,
    pub line_height: f32,
    pub letter_spacing: f32,
    pub word_spacing: f32,
    pub text_color: Color32,
    pub highlight: Color32,
}

impl ReadingStyle {
    pub fn new(settings: &PresentationSettings, text_color: Color32, highlight: Color32) -> Self {
        Self {
            font_size: settings.font_size,
            line_height: settings.line_height_px(),
            letter_spacing: settings.letter_spacing * settings.font_size,
            word_spacing: settings.word_spacing * settings.font_size,
            text_color,
            highlight,
        }
    }

    fn format(&self, highlighted: bool) -> TextFormat {
        TextFormat {
            font_id: FontId::proportional(self.font_size),
            color: self.text_color,
            line_height: Some(self.line_height),
            extra_letter_spacing: self.letter_spacing,
            background: if highlighted { self.highlight } else { Color32::TRANSPARENT },
            ..Default::default()
        }
    }

    fn space_format(&self, highlighted: bool) -> TextFormat {
        TextFormat { extra_letter_spacing: self.letter_spacing + self.word_spacing, ..self.format(highlighted) }
    }
}

/// Lays out `text` with the reading style, highlighting sentence `active` if given.
pub fn reading_layout(
    text: &str,
    style: &ReadingStyle,
    active: Option<usize>,
    wrap_width: f32,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = wrap_width;

    let highlight = active.and_then(|index| sentence_ranges(text).into_iter().nth(index));

    match highlight {
        Some(Range { start, end }) => {
            append_words(&mut job, &text[..start], style, false);
            append_words(&mut job, &text[start..end], style, true);
            append_words(&mut job, &text[end..], style, false);
        }
        None => append_words(&mut job, text, style, false),
    }

    job
}

// egui has no word spacing, so each space gets extra letter spacing.
fn append_words(job: &mut LayoutJob, text: &str, style: &ReadingStyle, highlighted: bool) {
    let mut start = 0;
    for (index, ch) in text.char_indices() {
        if ch == ' ' {
            if start < index {
                job.append(&text[start..index], 0.0, style.format(highlighted));
            }
            job.append(" ", 0.0, style.space_format(highlighted));
            start = index + 1;
        }
    }
    if start < text.len() {
        job.append(&text[start..], 0.0, style.format(highlighted));
    }
}

pub fn show(ui: &mut egui::Ui, view: &ContentView<'_>, theme: &Theme) -> Option<ContentAction> {
    let settings = view.settings;
    let (text_color, background) =
        theme.reading_colors(&settings.text_color, &settings.background_color, settings.dark_mode);
    let style = ReadingStyle::new(settings, text_color, theme.highlight(ui.ctx()));
    let text = view.store.text_to_display();
    let mut action = None;

    egui::Frame::new().fill(background).inner_margin(16.0).corner_radius(8.0).show(ui, |ui| {
        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            for url in view.store.image_urls() {
                ui.add(egui::Image::new(url.as_str()).max_width(ui.available_width()));
                ui.add_space(8.0);
            }

            if is_blank(text) {
                ui.label(egui::RichText::new(empty_placeholder(view.store)).italics().color(text_color));
                return;
            }

            let job = reading_layout(text, &style, view.narration_cursor, ui.available_width());
            ui.add(egui::Label::new(job).wrap());

            ui.add_space(20.0);
            action = action_buttons(ui, view);
        });
    });

    action
}

fn empty_placeholder(store: &ContentStore) -> &'static str {
    if !store.has_text() {
        "Upload a PDF or photo to start reading."
    } else {
        "Nothing to show for this view yet."
    }
}

fn action_buttons(ui: &mut egui::Ui, view: &ContentView<'_>) -> Option<ContentAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        if view.narrating {
            if ui.button("⏹ Stop").clicked() {
                action = Some(ContentAction::StopListening);
            }
        } else if ui.button("🔊 Listen").clicked() {
            action = Some(ContentAction::Listen);
        }

        if view.store.view_mode() != ViewMode::Summary && ui.button("❓ Quiz").clicked() {
            action = Some(ContentAction::OpenQuiz);
        }

        if view.features.document_export && ui.button("🖨 Export").clicked() {
            action = Some(ContentAction::Export);
        }
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> ReadingStyle {
        ReadingStyle::new(&PresentationSettings::default(), Color32::BLACK, Color32::YELLOW)
    }

    #[test]
    fn active_sentence_is_highlighted() {
        let text = "One two. Three four.";
        let job = reading_layout(text, &style(), Some(1), 400.0);

        assert_eq!(job.text, text);
        let highlighted: String = job
            .sections
            .iter()
            .filter(|section| section.format.background == Color32::YELLOW)
            .map(|section| &job.text[section.byte_range.clone()])
            .collect();
        assert_eq!(highlighted, "Three four.");
    }

    #[test]
    fn spaces_carry_word_spacing() {
        let job = reading_layout("a b", &style(), None, 400.0);
        assert_eq!(job.sections.len(), 3);
        let settings = PresentationSettings::default();
        let expected = (settings.letter_spacing + settings.word_spacing) * settings.font_size;
        assert!((job.sections[1].format.extra_letter_spacing - expected).abs() < 1e-4);
        assert!(job.sections.iter().all(|s| s.format.background == Color32::TRANSPARENT));
    }

    #[test]
    fn out_of_range_cursor_highlights_nothing() {
        let job = reading_layout("Only one.", &style(), Some(5), 400.0);
        assert!(job.sections.iter().all(|s| s.format.background == Color32::TRANSPARENT));
    }
}
