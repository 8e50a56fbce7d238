//! Image upload pipeline with background decode worker.
//!
//! Uploads are decoded off the UI thread and delivered as one-shot events,
//! drained non-blockingly each tick. Each request carries a monotonically
//! increasing sequence number so callers can observe completion order.

use crossbeam_channel::{unbounded, Receiver, Sender};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// File extensions accepted for upload.
const SUPPORTED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "tif", "tga",
];

/// Errors raised before a decode is even attempted.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The file is not a supported raster format; nothing was queued
    #[error("unsupported file type: {0}")]
    UnsupportedFile(PathBuf),
    /// The decode worker has shut down
    #[error("upload worker unavailable")]
    WorkerGone,
}

/// Commands sent to the decode worker.
#[derive(Debug)]
enum WorkerCommand {
    /// Decode the image at the given path
    Decode { seq: u64, path: PathBuf },
    /// Stop the worker thread
    Stop,
}

/// Completion events from the decode worker.
///
/// Exactly one event is emitted per accepted upload. A failed decode
/// creates no layer and must trigger no recomposite.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// Decode succeeded
    Decoded {
        seq: u64,
        path: PathBuf,
        image: Arc<RgbaImage>,
    },
    /// Decode failed; terminal for this upload
    Failed {
        seq: u64,
        path: PathBuf,
        error: String,
    },
}

impl UploadEvent {
    /// The sequence number the request was tagged with at submit time
    pub fn seq(&self) -> u64 {
        match self {
            UploadEvent::Decoded { seq, .. } | UploadEvent::Failed { seq, .. } => *seq,
        }
    }
}

/// Upload queue with a background decode worker.
pub struct UploadQueue {
    command_tx: Sender<WorkerCommand>,
    event_rx: Receiver<UploadEvent>,
    worker_handle: Option<JoinHandle<()>>,
    next_seq: u64,
}

impl UploadQueue {
    /// Create a new queue and spawn its worker.
    pub fn new() -> Self {
        let (command_tx, command_rx) = unbounded::<WorkerCommand>();
        let (event_tx, event_rx) = unbounded::<UploadEvent>();

        let worker_handle = thread::spawn(move || {
            Self::worker_loop(command_rx, event_tx);
        });

        Self {
            command_tx,
            event_rx,
            worker_handle: Some(worker_handle),
            next_seq: 0,
        }
    }

    /// Worker thread main loop.
    fn worker_loop(command_rx: Receiver<WorkerCommand>, event_tx: Sender<UploadEvent>) {
        loop {
            match command_rx.recv() {
                Ok(WorkerCommand::Decode { seq, path }) => {
                    let event = match image::open(&path) {
                        Ok(decoded) => {
                            let image = Arc::new(decoded.to_rgba8());
                            log::info!(
                                "Decoded upload {:?} ({}x{})",
                                path,
                                image.width(),
                                image.height()
                            );
                            UploadEvent::Decoded { seq, path, image }
                        }
                        Err(e) => {
                            log::warn!("Failed to decode upload {:?}: {}", path, e);
                            UploadEvent::Failed {
                                seq,
                                path,
                                error: e.to_string(),
                            }
                        }
                    };
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
                Ok(WorkerCommand::Stop) | Err(_) => break,
            }
        }
    }

    /// Check whether a path looks like a decodable raster.
    pub fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                SUPPORTED_EXTENSIONS.iter().any(|s| *s == ext)
            })
            .unwrap_or(false)
    }

    /// Queue a file for decoding. Rejects unsupported file types up front
    /// without creating any state; returns the request's sequence number.
    pub fn submit(&mut self, path: PathBuf) -> Result<u64, UploadError> {
        if !Self::is_supported(&path) {
            return Err(UploadError::UnsupportedFile(path));
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.command_tx
            .send(WorkerCommand::Decode { seq, path })
            .map_err(|_| UploadError::WorkerGone)?;
        Ok(seq)
    }

    /// Drain completion events (non-blocking).
    pub fn poll_events(&mut self) -> Vec<UploadEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        events
    }
}

impl Default for UploadQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for UploadQueue {
    fn drop(&mut self) {
        let _ = self.command_tx.send(WorkerCommand::Stop);
        if let Some(handle) = self.worker_handle.take() {
            let _ = handle.join();
        }
    }
}
