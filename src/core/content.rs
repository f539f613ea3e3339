use std::collections::HashMap;

use super::{
    models::{
        Document,
        ProcessingMode,
        SourceKind,
        ViewMode,
    },
    quiz::QuizSession,
};

pub const EMPTY_RESULT_PLACEHOLDER: &str = "No result.";

/// Picks the text for a view mode. Missing derived text selects as empty.
pub fn select_text<'a>(
    mode: ViewMode,
    extracted: &'a str,
    processed: &'a HashMap<ProcessingMode, String>,
) -> &'a str {
    match mode.processing_mode() {
        None => extracted,
        Some(processing) => processed.get(&processing).map(String::as_str).unwrap_or(""),
    }
}

/// State of the currently loaded document and everything derived from it.
#[derive(Debug, Default)]
pub struct ContentStore {
    document: Document,
    processed: HashMap<ProcessingMode, String>,
    view_mode: ViewMode,
    quiz: QuizSession,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_for_new_upload(&mut self) {
        self.document = Document::default();
        self.processed.clear();
        self.quiz.clear();
        self.view_mode = ViewMode::Actual;
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.document.source = Some(source.into());
    }

    pub fn set_extracted_text(&mut self, kind: SourceKind, text: String, image_urls: Vec<String>) {
        self.document.extracted_text = if text.is_empty() {
            kind.empty_text_placeholder().to_string()
        } else {
            text
        };
        self.document.image_urls = image_urls;
    }

    /// Only the entry for `mode` is written; the other derived text is left alone.
    pub fn set_processed_text(&mut self, mode: ProcessingMode, text: String) {
        let text = if text.is_empty() { EMPTY_RESULT_PLACEHOLDER.to_string() } else { text };
        self.processed.insert(mode, text);
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn extracted_text(&self) -> &str {
        &self.document.extracted_text
    }

    pub fn image_urls(&self) -> &[String] {
        &self.document.image_urls
    }

    pub fn processed_text(&self, mode: ProcessingMode) -> Option<&str> {
        self.processed.get(&mode).map(String::as_str)
    }

    pub fn has_text(&self) -> bool {
        !self.document.extracted_text.trim().is_empty()
    }

    pub fn text_to_display(&self) -> &str {
        select_text(self.view_mode, &self.document.extracted_text, &self.processed)
    }

    /// The simplified text feeds the quiz while it is on screen; otherwise the original does.
    pub fn quiz_source_text(&self) -> &str {
        match self.view_mode {
            ViewMode::Simplified => self.processed_text(ProcessingMode::Simplified).unwrap_or(""),
            _ => self.extracted_text(),
        }
    }

    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    pub fn quiz_mut(&mut self) -> &mut QuizSession {
        &mut self.quiz
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::QuizQuestion;

    fn loaded_store() -> ContentStore {
        let mut store = ContentStore::new();
        store.set_source("/docs/lesson.pdf");
        store.set_extracted_text(
            SourceKind::Pdf,
            "Original text.".to_string(),
            vec!["http://host/img/1.png".to_string()],
        );
        store.set_processed_text(ProcessingMode::Simplified, "Easy text.".to_string());
        store.set_processed_text(ProcessingMode::Summary, "Short.".to_string());
        store
    }

    #[test]
    fn selector_returns_text_for_each_mode() {
        let mut store = loaded_store();

        store.set_view_mode(ViewMode::Actual);
        assert_eq!(store.text_to_display(), "Original text.");
        store.set_view_mode(ViewMode::Simplified);
        assert_eq!(store.text_to_display(), "Easy text.");
        store.set_view_mode(ViewMode::Summary);
        assert_eq!(store.text_to_display(), "Short.");
        store.set_view_mode(ViewMode::from("unknown-mode"));
        assert_eq!(store.text_to_display(), "Original text.");
    }

    #[test]
    fn selector_is_recomputed_after_updates() {
        let mut store = loaded_store();
        store.set_view_mode(ViewMode::Simplified);
        store.set_processed_text(ProcessingMode::Simplified, "Even easier.".to_string());
        assert_eq!(store.text_to_display(), "Even easier.");
        assert_eq!(store.processed_text(ProcessingMode::Summary), Some("Short."));
    }

    #[test]
    fn reset_clears_everything() {
        let mut store = loaded_store();
        store.quiz_mut().replace_questions(vec![QuizQuestion {
            question: "Why?".to_string(),
            options: vec!["Because".to_string()],
            correct_answer: "Because".to_string(),
        }]);
        store.quiz_mut().select_answer(0, "Because");
        store.set_view_mode(ViewMode::Summary);

        store.reset_for_new_upload();

        assert_eq!(store.extracted_text(), "");
        assert!(store.image_urls().is_empty());
        assert!(store.quiz().is_empty());
        assert_eq!(store.view_mode(), ViewMode::Actual);
        assert_eq!(store.text_to_display(), "");
        assert_eq!(store.document().source, None);
        assert_eq!(store.processed_text(ProcessingMode::Simplified), None);
    }

    #[test]
    fn missing_processed_text_selects_empty() {
        let mut store = ContentStore::new();
        store.set_extracted_text(SourceKind::Image, "Photo text".to_string(), Vec::new());
        store.set_view_mode(ViewMode::Summary);
        assert_eq!(store.text_to_display(), "");
    }

    #[test]
    fn empty_server_results_use_placeholders() {
        let mut store = ContentStore::new();
        store.set_extracted_text(SourceKind::Image, String::new(), Vec::new());
        assert_eq!(store.extracted_text(), "No text extracted from image.");
        store.set_processed_text(ProcessingMode::Summary, String::new());
        assert_eq!(store.processed_text(ProcessingMode::Summary), Some(EMPTY_RESULT_PLACEHOLDER));
    }

    #[test]
    fn quiz_source_follows_simplified_view() {
        let mut store = loaded_store();
        assert_eq!(store.quiz_source_text(), "Original text.");
        store.set_view_mode(ViewMode::Simplified);
        assert_eq!(store.quiz_source_text(), "Easy text.");
        store.set_view_mode(ViewMode::Summary);
        assert_eq!(store.quiz_source_text(), "Original text.");
    }
}
