use crate::{
    api::Extraction,
    core::{
        models::{
            ProcessingMode,
            QuizQuestion,
            SourceKind,
        },
        ReaderError,
    },
    narration::{
        NarrationEvent,
        NarrationOutcome,
    },
};

/// A failed background operation, ready for the error dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFailure {
    pub message: String,
    pub details: String,
}

impl From<ReaderError> for TaskFailure {
    fn from(error: ReaderError) -> Self {
        Self { message: error.user_message(), details: format!("{error:?}") }
    }
}

#[derive(Debug, Clone)]
pub enum TaskResult {
    Upload { kind: SourceKind, result: Result<Extraction, TaskFailure> },
    Processed { mode: ProcessingMode, result: Result<String, TaskFailure> },
    Quiz(Result<Vec<QuizQuestion>, TaskFailure>),

    Narration(NarrationEvent),
    NarrationEnded(Result<NarrationOutcome, TaskFailure>),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::Upload { .. } => "upload",
            TaskResult::Processed { .. } => "processed",
            TaskResult::Quiz(_) => "quiz",
            TaskResult::Narration(_) => "narration_event",
            TaskResult::NarrationEnded(_) => "narration_ended",
        }
    }

    /// Whether this result ends a request that showed the busy overlay.
    pub fn ends_busy(&self) -> bool {
        matches!(self, TaskResult::Upload { .. } | TaskResult::Processed { .. } | TaskResult::Quiz(_))
    }
}
