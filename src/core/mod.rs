pub mod content;
pub mod errors;
pub mod models;
pub mod presentation;
pub mod quiz;
pub mod tasks;
pub mod text;

pub use content::ContentStore;
pub use errors::ReaderError;
pub use models::{
    Document,
    ProcessingMode,
    QuizQuestion,
    SourceKind,
    ViewMode,
};
pub use presentation::PresentationSettings;
pub use quiz::QuizSession;
