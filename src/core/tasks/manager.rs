use std::sync::{
    mpsc,
    Arc,
};

use tokio::runtime::Runtime;

use super::{
    TaskFailure,
    TaskHandle,
    TaskResult,
};
use crate::{
    api::{
        ContentClient,
        UploadFile,
    },
    core::{
        models::{
            ProcessingMode,
            SourceKind,
        },
        ReaderError,
    },
    narration::{
        AudioOutput,
        NarrationController,
    },
};

/// Called after every result is sent so the UI wakes up and drains the channel.
pub type RepaintNotifier = Arc<dyn Fn() + Send + Sync>;

pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    client: ContentClient,
    audio: Arc<dyn AudioOutput>,
    repaint: RepaintNotifier,
}

impl TaskManager {
    pub fn new(client: ContentClient, audio: Arc<dyn AudioOutput>) -> Result<Self, ReaderError> {
        let runtime = Arc::new(
            tokio::runtime::Builder::new_multi_thread()
                .thread_name("reader-tasks")
                .enable_all()
                .build()?,
        );

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender, client, audio, repaint: Arc::new(|| {}) })
    }

    pub fn set_repaint_notifier(&mut self, repaint: RepaintNotifier) {
        self.repaint = repaint;
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, RepaintNotifier, ContentClient) {
        (self.sender.clone(), self.repaint.clone(), self.client.clone())
    }

    pub fn upload_document(&self, upload: UploadFile) {
        let (sender, repaint, client) = self.task_context();
        let kind = upload.kind;
        tracing::info!("Uploading {} ({} bytes)", upload.file_name, upload.bytes.len());

        self.runtime.spawn(async move {
            let result = match kind {
                SourceKind::Pdf => client.upload_pdf(upload).await,
                SourceKind::Image => client.upload_image(upload).await,
            };
            let result = result.map_err(|e| {
                tracing::error!("Upload failed: {}", e);
                TaskFailure::from(e)
            });

            let _ = sender.send(TaskResult::Upload { kind, result });
            repaint();
        });
    }

    pub fn process_text(&self, mode: ProcessingMode, text: String) {
        let (sender, repaint, client) = self.task_context();

        self.runtime.spawn(async move {
            let result = client.process(mode, &text).await.map_err(|e| {
                tracing::error!("{} failed: {}", mode.endpoint(), e);
                TaskFailure::from(e)
            });

            let _ = sender.send(TaskResult::Processed { mode, result });
            repaint();
        });
    }

    pub fn generate_quiz(&self, text: String) {
        let (sender, repaint, client) = self.task_context();

        self.runtime.spawn(async move {
            let result = client.generate_quiz(&text).await.map_err(|e| {
                tracing::error!("Quiz generation failed: {}", e);
                TaskFailure::from(e)
            });

            let _ = sender.send(TaskResult::Quiz(result));
            repaint();
        });
    }

    /// Claims `controller` on the calling thread, then narrates in the background.
    ///
    /// Blank text and a busy controller are rejected before anything is spawned.
    pub fn start_narration(
        &self,
        controller: &NarrationController,
        text: &str,
    ) -> Result<TaskHandle, ReaderError> {
        let run = controller.start(text)?;
        let (sender, repaint, client) = self.task_context();
        let audio = self.audio.clone();

        let join_handle = self.runtime.spawn(async move {
            let events = sender.clone();
            let notify = repaint.clone();
            let result = run
                .play(&client, audio.as_ref(), move |event| {
                    let _ = events.send(TaskResult::Narration(event));
                    notify();
                })
                .await;

            match &result {
                Ok(outcome) => tracing::info!("Narration ended: {:?}", outcome),
                Err(e) => tracing::error!("Narration failed: {}", e),
            }

            let _ = sender.send(TaskResult::NarrationEnded(result.map_err(TaskFailure::from)));
            repaint();
        });

        Ok(TaskHandle::new(controller.clone(), join_handle))
    }
}
