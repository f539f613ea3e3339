pub mod handle;
pub mod manager;
pub mod types;

pub use handle::{
    NarrationSlot,
    TaskHandle,
};
pub use manager::{
    RepaintNotifier,
    TaskManager,
};
pub use types::{
    TaskFailure,
    TaskResult,
};
