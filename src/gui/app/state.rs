use std::path::Path;

use crate::{
    api::Extraction,
    config::ScreenFeatures,
    core::{
        models::{
            ProcessingMode,
            QuizQuestion,
            SourceKind,
            ViewMode,
        },
        presentation::PresentationSettings,
        tasks::TaskFailure,
        ContentStore,
    },
    persistence::Preferences,
};

/// Everything the screen renders from. Owned by the UI thread and passed to each view by
/// reference; background results are folded in through the `finish_*` methods.
pub struct AppState {
    pub content: ContentStore,
    pub presentation: PresentationSettings,
    pub api_key: Option<String>,
    pub features: ScreenFeatures,
}

impl AppState {
    pub fn new(preferences: Preferences, features: ScreenFeatures) -> Self {
        let mut presentation = preferences.presentation;
        if !features.dark_mode && presentation.dark_mode {
            presentation.set_dark_mode(false);
        }

        Self { content: ContentStore::new(), presentation, api_key: preferences.api_key, features }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().map(|key| !key.trim().is_empty()).unwrap_or(false)
    }

    /// PDF uploads need a saved key; photos go straight to the service.
    pub fn can_upload(&self, kind: SourceKind) -> bool {
        match kind {
            SourceKind::Pdf => self.has_api_key(),
            SourceKind::Image => true,
        }
    }

    pub fn begin_upload(&mut self, source: &Path) {
        self.content.reset_for_new_upload();
        self.content.set_source(source.display().to_string());
    }

    pub fn finish_upload(
        &mut self,
        kind: SourceKind,
        result: Result<Extraction, TaskFailure>,
    ) -> Result<(), TaskFailure> {
        let extraction = result?;
        tracing::info!(
            "Extracted {} characters and {} images",
            extraction.text.len(),
            extraction.image_urls.len()
        );
        self.content.set_extracted_text(kind, extraction.text, extraction.image_urls);
        Ok(())
    }

    /// Switches straight to the original text, or names the derivation that must be requested.
    pub fn select_view(&mut self, mode: ViewMode) -> Option<ProcessingMode> {
        match mode.processing_mode() {
            None => {
                self.content.set_view_mode(ViewMode::Actual);
                None
            }
            Some(processing) => Some(processing),
        }
    }

    /// On failure the previous text for `mode` and the current view are left untouched.
    pub fn finish_processing(
        &mut self,
        mode: ProcessingMode,
        result: Result<String, TaskFailure>,
    ) -> Result<(), TaskFailure> {
        let text = result?;
        self.content.set_processed_text(mode, text);
        self.content.set_view_mode(mode.view_mode());
        Ok(())
    }

    pub fn finish_quiz(
        &mut self,
        result: Result<Vec<QuizQuestion>, TaskFailure>,
    ) -> Result<usize, TaskFailure> {
        let questions = result?;
        self.content.quiz_mut().replace_questions(questions);
        Ok(self.content.quiz().questions().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let preferences = Preferences { api_key: Some("key".into()), ..Default::default() };
        AppState::new(preferences, ScreenFeatures::full())
    }

    fn failure(message: &str) -> TaskFailure {
        TaskFailure { message: message.into(), details: String::new() }
    }

    fn loaded() -> AppState {
        let mut state = state();
        state.begin_upload(Path::new("/docs/story.pdf"));
        let extraction = Extraction { text: "Original text.".into(), image_urls: vec![] };
        state.finish_upload(SourceKind::Pdf, Ok(extraction)).unwrap();
        state
    }

    #[test]
    fn pdf_upload_requires_key() {
        assert!(state().has_api_key());
        assert!(state().can_upload(SourceKind::Pdf));

        let blank = Preferences { api_key: Some("  ".into()), ..Default::default() };
        let blank = AppState::new(blank, ScreenFeatures::full());
        assert!(!blank.has_api_key());
        assert!(!blank.can_upload(SourceKind::Pdf));

        let missing = AppState::new(Preferences::default(), ScreenFeatures::full());
        assert!(!missing.can_upload(SourceKind::Pdf));
    }

    #[test]
    fn photo_upload_needs_no_key() {
        let missing = AppState::new(Preferences::default(), ScreenFeatures::full());
        assert!(missing.can_upload(SourceKind::Image));
    }

    #[test]
    fn failed_upload_leaves_store_empty() {
        let mut state = loaded();
        state.begin_upload(Path::new("/docs/next.pdf"));
        assert!(state.finish_upload(SourceKind::Pdf, Err(failure("bad pdf"))).is_err());

        assert!(!state.content.has_text());
        assert_eq!(state.content.text_to_display(), "");
        assert_eq!(state.content.document().file_name(), Some("next.pdf"));
    }

    #[test]
    fn failed_processing_keeps_last_good_text() {
        let mut state = loaded();
        assert_eq!(state.select_view(ViewMode::Simplified), Some(ProcessingMode::Simplified));
        state.finish_processing(ProcessingMode::Simplified, Ok("Easy text.".into())).unwrap();
        assert_eq!(state.content.view_mode(), ViewMode::Simplified);

        state.select_view(ViewMode::Actual);
        assert!(state
            .finish_processing(ProcessingMode::Simplified, Err(failure("quota")))
            .is_err());

        assert_eq!(state.content.view_mode(), ViewMode::Actual);
        assert_eq!(state.content.processed_text(ProcessingMode::Simplified), Some("Easy text."));
    }

    #[test]
    fn quiz_result_replaces_questions() {
        let mut state = loaded();
        let questions = vec![QuizQuestion {
            question: "Q?".into(),
            options: vec!["A".into(), "B".into()],
            correct_answer: "A".into(),
        }];
        assert_eq!(state.finish_quiz(Ok(questions)).unwrap(), 1);
        assert_eq!(state.content.quiz().questions().len(), 1);
        assert_eq!(state.content.quiz().selection(0), None);
    }

    #[test]
    fn dark_mode_is_dropped_without_the_feature() {
        let mut presentation = PresentationSettings::default();
        presentation.set_dark_mode(true);
        let preferences = Preferences { api_key: None, presentation };
        let state = AppState::new(preferences, ScreenFeatures::minimal());
        assert!(!state.presentation.dark_mode);
        assert_eq!(state.presentation, PresentationSettings::default());
    }
}
