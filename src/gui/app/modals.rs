use crate::gui::{
    api_key_modal::ApiKeyModal,
    error_modal::ErrorModal,
    info_modal::InfoModal,
    quiz_modal::QuizModal,
    settings_modal::SettingsModal,
};

#[derive(Default)]
pub struct Modals {
    pub api_key: ApiKeyModal,
    pub settings: SettingsModal,
    pub quiz: QuizModal,
    pub error: ErrorModal,
    pub info: InfoModal,
}
