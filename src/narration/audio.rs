//! Audio output for narration.
//!
//! rodio's `OutputStream` is `!Send`, so the stream lives on one dedicated thread that receives
//! commands over a channel. Only one clip exists at a time; a clip's completion is reported
//! through the oneshot handed over with it.

use std::{
    io::Cursor,
    sync::mpsc as sync_mpsc,
    time::Duration,
};

use async_trait::async_trait;
use rodio::{
    Decoder,
    OutputStream,
    OutputStreamHandle,
    Sink,
};
use tokio::sync::oneshot;

use crate::core::ReaderError;

#[async_trait]
pub trait AudioOutput: Send + Sync {
    /// Resolves once the clip has played to the end.
    async fn play(&self, clip: Vec<u8>) -> Result<(), ReaderError>;

    /// Interrupts the current clip, if any.
    fn stop(&self);
}

type ClipDone = oneshot::Sender<Result<(), ReaderError>>;

enum AudioCommand {
    Play { clip: Vec<u8>, done: ClipDone },
    Stop,
    Shutdown,
}

pub struct RodioOutput {
    cmd_tx: sync_mpsc::Sender<AudioCommand>,
}

impl RodioOutput {
    pub fn new() -> Result<Self, ReaderError> {
        let (cmd_tx, cmd_rx) = sync_mpsc::channel();

        std::thread::Builder::new()
            .name("narration-audio".into())
            .spawn(move || audio_thread(cmd_rx))
            .map_err(|e| ReaderError::Audio(format!("Failed to spawn audio thread: {e}")))?;

        Ok(Self { cmd_tx })
    }
}

impl Drop for RodioOutput {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(AudioCommand::Shutdown);
    }
}

#[async_trait]
impl AudioOutput for RodioOutput {
    async fn play(&self, clip: Vec<u8>) -> Result<(), ReaderError> {
        let (done, finished) = oneshot::channel();
        self.cmd_tx
            .send(AudioCommand::Play { clip, done })
            .map_err(|_| ReaderError::Audio("Audio thread has shut down".to_string()))?;

        finished
            .await
            .map_err(|_| ReaderError::Audio("Audio thread dropped the clip".to_string()))?
    }

    fn stop(&self) {
        let _ = self.cmd_tx.send(AudioCommand::Stop);
    }
}

fn start_clip(handle: &OutputStreamHandle, clip: Vec<u8>) -> Result<Sink, ReaderError> {
    let sink = Sink::try_new(handle).map_err(|e| ReaderError::Audio(e.to_string()))?;
    let source = Decoder::new(Cursor::new(clip))
        .map_err(|e| ReaderError::Audio(format!("Decode error: {e}")))?;
    sink.append(source);
    Ok(sink)
}

fn audio_thread(cmd_rx: sync_mpsc::Receiver<AudioCommand>) {
    let output = match OutputStream::try_default() {
        Ok(pair) => Some(pair),
        Err(e) => {
            tracing::error!("[Audio] Failed to open audio output: {}", e);
            None
        }
    };

    let mut current: Option<(Sink, ClipDone)> = None;

    loop {
        // Short timeout so the sink can be polled for completion.
        match cmd_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(AudioCommand::Play { clip, done }) => {
                if let Some((sink, previous)) = current.take() {
                    sink.stop();
                    let _ = previous.send(Err(ReaderError::Audio("Interrupted".to_string())));
                }

                let Some((_stream, handle)) = &output else {
                    let _ = done.send(Err(ReaderError::Audio(
                        "No audio output available".to_string(),
                    )));
                    continue;
                };

                match start_clip(handle, clip) {
                    Ok(sink) => current = Some((sink, done)),
                    Err(e) => {
                        let _ = done.send(Err(e));
                    }
                }
            }
            Ok(AudioCommand::Stop) => {
                if let Some((sink, done)) = current.take() {
                    sink.stop();
                    let _ = done.send(Err(ReaderError::Audio("Playback stopped".to_string())));
                }
            }
            Ok(AudioCommand::Shutdown) | Err(sync_mpsc::RecvTimeoutError::Disconnected) => break,
            Err(sync_mpsc::RecvTimeoutError::Timeout) => {}
        }

        let finished = current.as_ref().map(|(sink, _)| sink.empty()).unwrap_or(false);
        if finished {
            if let Some((_sink, done)) = current.take() {
                let _ = done.send(Ok(()));
            }
        }
    }

    tracing::debug!("[Audio] Audio thread exiting");
}
