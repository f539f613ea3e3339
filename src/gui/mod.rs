pub mod api_key_modal;
pub mod app;
pub mod content_pane;
pub mod error_modal;
pub mod file_dialogs;
pub mod info_modal;
pub mod message_overlay;
pub mod modal;
pub mod quiz_modal;
pub mod settings_modal;
pub mod theme;
pub mod top_bar;

pub use app::{
    AppState,
    ReaderApp,
};
