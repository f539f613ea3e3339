use tokio::task::JoinHandle;

use crate::narration::NarrationController;

/// Handle to a running narration.
pub struct TaskHandle {
    controller: NarrationController,
    join_handle: Option<JoinHandle<()>>,
}

impl TaskHandle {
    pub fn new(controller: NarrationController, join_handle: JoinHandle<()>) -> Self {
        Self { controller, join_handle: Some(join_handle) }
    }

    pub fn cancel(&self) {
        self.controller.stop();
    }

    pub fn is_finished(&self) -> bool {
        self.join_handle.as_ref().map(|h| h.is_finished()).unwrap_or(true)
    }
}

/// The narration task the screen is following.
///
/// End reports arrive through the result channel and may belong to a run that was already
/// replaced, so a handle is only forgotten once its own task is done.
#[derive(Default)]
pub struct NarrationSlot {
    current: Option<TaskHandle>,
}

impl NarrationSlot {
    pub fn track(&mut self, handle: TaskHandle) {
        self.current = Some(handle);
    }

    pub fn release_finished(&mut self) {
        if self.current.as_ref().is_some_and(TaskHandle::is_finished) {
            self.current = None;
        }
    }

    /// Stops the live run; without a tracked task the controller is stopped directly.
    pub fn stop(&self, controller: &NarrationController) {
        match self.current.as_ref().filter(|handle| !handle.is_finished()) {
            Some(handle) => handle.cancel(),
            None => controller.stop(),
        }
    }
}
