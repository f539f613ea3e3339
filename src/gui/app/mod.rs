mod modals;
mod state;

use std::sync::Arc;

use eframe::egui;
use modals::Modals;
pub use state::AppState;

use super::{
    content_pane::{
        self,
        ContentAction,
        ContentView,
    },
    file_dialogs,
    message_overlay::{
        MessageOverlay,
        SPLASH_DURATION,
    },
    theme::{
        apply_dark_mode,
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
        TopBarState,
    },
};
use crate::{
    api::{
        ContentClient,
        UploadFile,
    },
    config::AppConfig,
    core::{
        models::{
            SourceKind,
            ViewMode,
        },
        presentation::PresentationSettings,
        quiz::QuizSession,
        tasks::{
            NarrationSlot,
            TaskManager,
            TaskResult,
        },
        ReaderError,
    },
    export,
    narration::{
        NarrationController,
        NarrationEvent,
        RodioOutput,
    },
    persistence::{
        get_data_file_path,
        KeyValueStore,
        PreferencesRepository,
        STORAGE_FILE,
    },
};

pub struct ReaderApp {
    state: AppState,
    preferences: PreferencesRepository,

    // UI State
    theme: Theme,
    message_overlay: MessageOverlay,
    modals: Modals,

    // Background work
    task_manager: TaskManager,
    narration: NarrationController,
    narration_slot: NarrationSlot,
}

impl ReaderApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Result<Self, ReaderError> {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let store = KeyValueStore::open_or_empty(get_data_file_path(STORAGE_FILE));
        let preferences = PreferencesRepository::new(store);
        let state = AppState::new(preferences.load(), config.features);

        let client = ContentClient::new(&config)?;
        let audio = Arc::new(RodioOutput::new()?);
        let mut task_manager = TaskManager::new(client, audio)?;
        let ctx = cc.egui_ctx.clone();
        task_manager.set_repaint_notifier(Arc::new(move || ctx.request_repaint()));

        tracing::info!("Using content service at {}", config.backend_url);

        let theme = Theme::reader();
        set_theme(&cc.egui_ctx, &theme);
        apply_dark_mode(&cc.egui_ctx, state.presentation.dark_mode);

        Ok(Self {
            state,
            preferences,
            theme,
            message_overlay: MessageOverlay::with_splash(SPLASH_DURATION),
            modals: Modals::default(),
            task_manager,
            narration: NarrationController::new(),
            narration_slot: NarrationSlot::default(),
        })
    }
}

impl eframe::App for ReaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        let top_bar_state = TopBarState {
            features: self.state.features,
            dark_mode: self.state.presentation.dark_mode,
            busy: self.message_overlay.is_busy(),
            has_text: self.state.content.has_text(),
            file_name: self.state.content.document().file_name(),
            view_mode: self.state.content.view_mode(),
        };
        if let Some(action) = TopBar::show(ctx, &top_bar_state, &self.theme) {
            self.handle_top_bar_action(action, ctx);
        }

        let mut content_action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let view = ContentView {
                store: &self.state.content,
                settings: &self.state.presentation,
                features: self.state.features,
                narration_cursor: self.narration.cursor(),
                narrating: self.narration.is_active(),
            };
            content_action = content_pane::show(ui, &view, &self.theme);
        });
        if let Some(action) = content_action {
            self.handle_content_action(action);
        }

        self.show_modals(ctx);
        self.message_overlay.show(ctx, &self.theme);
    }
}

impl ReaderApp {
    fn handle_task_result(&mut self, result: TaskResult) {
        tracing::debug!("Task result: {}", result.task_type());
        if result.ends_busy() {
            self.message_overlay.clear_message();
        }

        match result {
            TaskResult::Upload { kind, result } => {
                if let Err(failure) = self.state.finish_upload(kind, result) {
                    self.modals.error.show_failure("Upload Failed", failure);
                }
            }
            TaskResult::Processed { mode, result } => {
                if let Err(failure) = self.state.finish_processing(mode, result) {
                    self.modals.error.show_failure("Processing Failed", failure);
                }
            }
            TaskResult::Quiz(result) => match self.state.finish_quiz(result) {
                Ok(0) => {
                    self.modals.info.show_info("Quiz", "No quiz questions were generated.");
                }
                Ok(_) => self.modals.quiz.open(self.state.content.quiz_mut()),
                Err(failure) => self.modals.error.show_failure("Quiz Failed", failure),
            },
            TaskResult::Narration(event) => {
                if let NarrationEvent::Sentence { index } = event {
                    tracing::debug!("Reading sentence {}", index);
                }
            }
            TaskResult::NarrationEnded(result) => {
                self.narration_slot.release_finished();
                if let Err(failure) = result {
                    self.modals.error.show_failure("Playback Error", failure);
                }
            }
        }
    }

    fn handle_top_bar_action(&mut self, action: TopBarAction, ctx: &egui::Context) {
        match action {
            TopBarAction::ToggleDarkMode => {
                self.state.presentation.toggle_dark_mode();
                apply_dark_mode(ctx, self.state.presentation.dark_mode);
                self.save_presentation();
            }
            TopBarAction::OpenSettings => {
                self.modals
                    .settings
                    .open_settings(&self.state.presentation, self.state.features.dark_mode);
            }
            TopBarAction::OpenApiKey => self.modals.api_key.open(self.state.api_key.as_deref()),
            TopBarAction::UploadPdf => self.upload(SourceKind::Pdf),
            TopBarAction::OpenPhoto => self.upload(SourceKind::Image),
            TopBarAction::SelectView(mode) => self.select_view(mode),
        }
    }

    fn handle_content_action(&mut self, action: ContentAction) {
        match action {
            ContentAction::Listen => self.start_narration(),
            ContentAction::StopListening => self.stop_narration(),
            ContentAction::OpenQuiz => self.request_quiz(),
            ContentAction::Export => self.export(),
        }
    }

    fn show_modals(&mut self, ctx: &egui::Context) {
        if let Some(key) = self.modals.api_key.show(ctx) {
            match self.preferences.save_api_key(&key) {
                Ok(()) => {
                    tracing::info!("API key saved");
                    self.state.api_key = Some(key);
                }
                Err(e) => self.modals.error.show_reader_error("Error", &e),
            }
        }

        if let Some(settings) = self.modals.settings.show(ctx) {
            self.apply_presentation(ctx, settings);
        }

        if let Some(score) = self.modals.quiz.show(ctx, self.state.content.quiz_mut()) {
            tracing::info!("Quiz submitted: {}/{}", score.score, score.total);
            self.modals
                .info
                .show_info("Quiz Results", format!("You scored {} out of {}!", score.score, score.total));
        }

        self.modals.error.show(ctx);
        self.modals.info.show(ctx);
    }

    fn upload(&mut self, kind: SourceKind) {
        if !self.state.can_upload(kind) {
            self.modals.api_key.open(self.state.api_key.as_deref());
            return;
        }

        let picked = match kind {
            SourceKind::Pdf => file_dialogs::pick_pdf(),
            SourceKind::Image => file_dialogs::pick_photo(),
        };
        let Some(path) = picked else {
            return;
        };

        let upload = match kind {
            SourceKind::Pdf => UploadFile::pdf(&path),
            SourceKind::Image => UploadFile::image(&path),
        };
        let upload = match upload {
            Ok(upload) => upload,
            Err(e) => {
                tracing::error!("Failed to read {}: {}", path.display(), e);
                self.modals.error.show_reader_error("Upload Failed", &e);
                return;
            }
        };

        self.stop_narration();
        self.state.begin_upload(&path);
        self.message_overlay.set_message("Processing...");
        self.task_manager.upload_document(upload);
    }

    fn select_view(&mut self, mode: ViewMode) {
        if !self.state.content.has_text() {
            return;
        }
        self.stop_narration();

        if let Some(processing) = self.state.select_view(mode) {
            self.message_overlay.set_message("Processing...");
            self.task_manager
                .process_text(processing, self.state.content.extracted_text().to_string());
        }
    }

    fn start_narration(&mut self) {
        let text = self.state.content.text_to_display().to_string();
        match self.task_manager.start_narration(&self.narration, &text) {
            Ok(handle) => self.narration_slot.track(handle),
            Err(e) => {
                tracing::warn!("Narration not started: {}", e);
                self.modals.error.show_reader_error("Playback Error", &e);
            }
        }
    }

    fn stop_narration(&mut self) {
        self.narration_slot.stop(&self.narration);
    }

    fn request_quiz(&mut self) {
        let source = self.state.content.quiz_source_text();
        match QuizSession::validate_source(source) {
            Ok(source) => {
                let source = source.to_string();
                self.message_overlay.set_message("Generating quiz...");
                self.task_manager.generate_quiz(source);
            }
            Err(e) => self.modals.error.show_reader_error("No Text", &e),
        }
    }

    fn export(&mut self) {
        let view_mode = self.state.content.view_mode();
        let html = match export::render_html(
            view_mode,
            self.state.content.text_to_display(),
            &self.state.presentation,
        ) {
            Ok(html) => html,
            Err(e) => {
                self.modals.error.show_reader_error("No Content", &e);
                return;
            }
        };

        let suggested = export::suggested_file_name(view_mode, &chrono::Local::now());
        let Some(path) = file_dialogs::pick_export_path(&suggested) else {
            return;
        };

        match export::write_html(&path, &html) {
            Ok(()) => self.modals.info.show_info("Export", format!("Saved to {}", path.display())),
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                self.modals.error.show_reader_error("Export Failed", &e);
            }
        }
    }

    fn apply_presentation(&mut self, ctx: &egui::Context, settings: PresentationSettings) {
        self.state.presentation = settings;
        apply_dark_mode(ctx, self.state.presentation.dark_mode);
        self.save_presentation();
    }

    fn save_presentation(&mut self) {
        if let Err(e) = self.preferences.save_presentation(&self.state.presentation) {
            tracing::warn!("Failed to save presentation settings: {}", e);
        }
    }
}
