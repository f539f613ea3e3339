//! Sentence-by-sentence narration.
//!
//! Text is split into sentences; each one is synthesized and played before the next is requested,
//! so the cursor always names the sentence the user is hearing. At most one run is active per
//! controller, and a stop request interrupts whichever await is in flight.

pub mod audio;

use std::sync::{
    atomic::{
        AtomicBool,
        Ordering,
    },
    Arc,
    Mutex,
};

use async_trait::async_trait;
use tokio::sync::Notify;

pub use audio::{
    AudioOutput,
    RodioOutput,
};

use crate::core::{
    text::{
        is_blank,
        split_sentences,
    },
    ReaderError,
};

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, sentence: &str) -> Result<Vec<u8>, ReaderError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationEvent {
    Started { total: usize },
    Sentence { index: usize },
    Finished,
    Stopped,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationOutcome {
    Completed,
    Stopped,
}

/// Shared stop flag that can also be awaited.
#[derive(Clone, Default)]
struct StopSignal {
    flag: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl StopSignal {
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    pub async fn stopped(&self) {
        loop {
            // Register before checking the flag so a concurrent stop() cannot be missed.
            let notified = self.notify.notified();
            if self.is_stopped() {
                return;
            }
            notified.await;
        }
    }
}

#[derive(Default)]
struct Shared {
    active: AtomicBool,
    cursor: Mutex<Option<usize>>,
    stop: StopSignal,
}

#[derive(Clone, Default)]
pub struct NarrationController {
    shared: Arc<Shared>,
}

impl NarrationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the controller for a new run.
    ///
    /// Fails with `EmptyInput` for blank text and `NarrationBusy` while another run holds the
    /// controller. The claim is released when the returned run is dropped.
    pub fn start(&self, text: &str) -> Result<NarrationRun, ReaderError> {
        if is_blank(text) {
            return Err(ReaderError::EmptyInput("There is no text to read aloud.".to_string()));
        }

        if self
            .shared
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ReaderError::NarrationBusy);
        }

        self.shared.stop.reset();
        self.set_cursor(None);

        Ok(NarrationRun { controller: self.clone(), sentences: split_sentences(text) })
    }

    /// Claims the controller and plays `text` to the end.
    pub async fn run<F>(
        &self,
        text: &str,
        synthesizer: &dyn SpeechSynthesizer,
        audio: &dyn AudioOutput,
        on_event: F,
    ) -> Result<NarrationOutcome, ReaderError>
    where
        F: FnMut(NarrationEvent) + Send,
    {
        self.start(text)?.play(synthesizer, audio, on_event).await
    }

    pub fn stop(&self) {
        if self.is_active() {
            tracing::info!("[Narration] Stop requested");
            self.shared.stop.stop();
        }
    }

    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::SeqCst)
    }

    /// Index of the sentence currently being narrated.
    pub fn cursor(&self) -> Option<usize> {
        self.shared.cursor.lock().map(|cursor| *cursor).unwrap_or(None)
    }

    fn set_cursor(&self, value: Option<usize>) {
        if let Ok(mut cursor) = self.shared.cursor.lock() {
            *cursor = value;
        }
    }
}

/// A claimed narration; dropping it releases the controller.
pub struct NarrationRun {
    controller: NarrationController,
    sentences: Vec<String>,
}

impl NarrationRun {
    pub async fn play<F>(
        self,
        synthesizer: &dyn SpeechSynthesizer,
        audio: &dyn AudioOutput,
        mut on_event: F,
    ) -> Result<NarrationOutcome, ReaderError>
    where
        F: FnMut(NarrationEvent) + Send,
    {
        let controller = &self.controller;
        let stop = controller.shared.stop.clone();
        tracing::info!("[Narration] Reading {} sentences", self.sentences.len());
        on_event(NarrationEvent::Started { total: self.sentences.len() });

        for (index, sentence) in self.sentences.iter().enumerate() {
            if stop.is_stopped() {
                return Ok(self.stopped(audio, &mut on_event));
            }

            controller.set_cursor(Some(index));
            on_event(NarrationEvent::Sentence { index });

            let step = async {
                let clip = synthesizer.synthesize(sentence).await?;
                audio.play(clip).await
            };

            let result = tokio::select! {
                result = step => Some(result),
                _ = stop.stopped() => None,
            };

            match result {
                Some(Ok(())) => {}
                Some(Err(e)) => {
                    tracing::warn!("[Narration] Sentence {} failed: {}", index, e);
                    controller.set_cursor(None);
                    on_event(NarrationEvent::Failed(e.user_message()));
                    return Err(e);
                }
                None => return Ok(self.stopped(audio, &mut on_event)),
            }
        }

        controller.set_cursor(None);
        on_event(NarrationEvent::Finished);
        Ok(NarrationOutcome::Completed)
    }

    fn stopped<F>(&self, audio: &dyn AudioOutput, on_event: &mut F) -> NarrationOutcome
    where
        F: FnMut(NarrationEvent),
    {
        audio.stop();
        self.controller.set_cursor(None);
        on_event(NarrationEvent::Stopped);
        NarrationOutcome::Stopped
    }
}

impl Drop for NarrationRun {
    fn drop(&mut self) {
        self.controller.set_cursor(None);
        self.controller.shared.active.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use tokio::sync::mpsc;

    use super::*;

    #[derive(Default)]
    struct FakeSynth {
        requested: Mutex<Vec<String>>,
        fail_at: Option<usize>,
    }

    #[async_trait]
    impl SpeechSynthesizer for FakeSynth {
        async fn synthesize(&self, sentence: &str) -> Result<Vec<u8>, ReaderError> {
            let mut requested = self.requested.lock().unwrap();
            let index = requested.len();
            requested.push(sentence.to_string());
            if Some(index) == self.fail_at {
                return Err(ReaderError::Service { status: 500, detail: Some("tts down".into()) });
            }
            Ok(sentence.as_bytes().to_vec())
        }
    }

    #[derive(Default)]
    struct FakeAudio {
        played: AtomicUsize,
        stopped: AtomicBool,
        hang: bool,
    }

    #[async_trait]
    impl AudioOutput for FakeAudio {
        async fn play(&self, _clip: Vec<u8>) -> Result<(), ReaderError> {
            self.played.fetch_add(1, Ordering::SeqCst);
            if self.hang {
                std::future::pending::<()>().await;
            }
            Ok(())
        }

        fn stop(&self) {
            self.stopped.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn sentences_are_read_in_order() {
        let controller = NarrationController::new();
        let synth = FakeSynth::default();
        let audio = FakeAudio::default();
        let observer = controller.clone();
        let mut cursor_at_start = Some(usize::MAX);
        let mut cursors = Vec::new();
        let mut events = Vec::new();

        let outcome = controller
            .run("One. Two! Three?", &synth, &audio, |event| {
                match event {
                    NarrationEvent::Started { .. } => cursor_at_start = observer.cursor(),
                    NarrationEvent::Sentence { .. } => cursors.push(observer.cursor()),
                    _ => {}
                }
                events.push(event);
            })
            .await
            .unwrap();

        assert_eq!(outcome, NarrationOutcome::Completed);
        assert_eq!(*synth.requested.lock().unwrap(), vec!["One.", "Two!", "Three?"]);
        assert_eq!(audio.played.load(Ordering::SeqCst), 3);
        assert_eq!(cursor_at_start, None);
        assert_eq!(cursors, vec![Some(0), Some(1), Some(2)]);
        assert_eq!(events.first(), Some(&NarrationEvent::Started { total: 3 }));
        assert_eq!(events.last(), Some(&NarrationEvent::Finished));
        assert_eq!(controller.cursor(), None);
        assert!(!controller.is_active());
    }

    #[tokio::test]
    async fn failure_halts_the_run() {
        let controller = NarrationController::new();
        let synth = FakeSynth { fail_at: Some(1), ..Default::default() };
        let audio = FakeAudio::default();
        let mut events = Vec::new();

        let err = controller
            .run("One. Two. Three.", &synth, &audio, |event| events.push(event))
            .await
            .unwrap_err();

        assert!(matches!(err, ReaderError::Service { status: 500, .. }));
        assert_eq!(synth.requested.lock().unwrap().len(), 2);
        assert_eq!(audio.played.load(Ordering::SeqCst), 1);
        assert_eq!(events.last(), Some(&NarrationEvent::Failed("tts down".into())));
        assert_eq!(controller.cursor(), None);
        assert!(!controller.is_active());
    }

    #[tokio::test]
    async fn blank_text_is_rejected() {
        let controller = NarrationController::new();
        let err = controller
            .run("  \n", &FakeSynth::default(), &FakeAudio::default(), |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, ReaderError::EmptyInput(_)));
        assert!(!controller.is_active());
    }

    #[tokio::test]
    async fn second_start_is_rejected_while_active() {
        let controller = NarrationController::new();
        let run = controller.start("Hello there.").unwrap();

        assert!(matches!(controller.start("Another."), Err(ReaderError::NarrationBusy)));

        drop(run);
        assert!(controller.start("Another.").is_ok());
    }

    #[tokio::test]
    async fn stop_interrupts_playback() {
        let controller = NarrationController::new();
        let synth = Arc::new(FakeSynth::default());
        let audio = Arc::new(FakeAudio { hang: true, ..Default::default() });
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        let task = {
            let controller = controller.clone();
            let synth = synth.clone();
            let audio = audio.clone();
            tokio::spawn(async move {
                controller
                    .run("First. Second.", synth.as_ref(), audio.as_ref(), |event| {
                        let _ = event_tx.send(event);
                    })
                    .await
            })
        };

        while let Some(event) = event_rx.recv().await {
            if event == (NarrationEvent::Sentence { index: 0 }) {
                break;
            }
        }
        while audio.played.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        controller.stop();

        let outcome = task.await.unwrap().unwrap();
        assert_eq!(outcome, NarrationOutcome::Stopped);
        assert_eq!(synth.requested.lock().unwrap().len(), 1);
        assert!(audio.stopped.load(Ordering::SeqCst));
        assert_eq!(controller.cursor(), None);
        assert!(!controller.is_active());
    }
}
