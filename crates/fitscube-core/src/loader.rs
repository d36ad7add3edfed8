use std::error::Error as StdError;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::ViewerConfig;
use crate::error::{FailureKind, FitscubeError, Result};
use crate::frame::FrameStack;
use crate::io::directory::list_frame_files;
use crate::io::fits::read_frame;

/// Why a load stopped: classification, message and a diagnostic trace.
#[derive(Error, Clone, Debug, PartialEq)]
#[error("{kind}: {message}")]
pub struct LoadFailure {
    pub kind: FailureKind,
    pub message: String,
    /// Error source chain, one cause per line.
    pub trace: String,
    /// File being read when the load failed, if any.
    pub path: Option<PathBuf>,
}

impl LoadFailure {
    pub fn from_error(err: &FitscubeError, path: Option<&Path>) -> Self {
        let mut trace = String::new();
        if let Some(p) = path {
            trace.push_str(&format!("while reading {}\n", p.display()));
        }
        trace.push_str(&err.to_string());
        let mut source = StdError::source(err);
        while let Some(cause) = source {
            trace.push_str(&format!("\ncaused by: {cause}"));
            source = cause.source();
        }

        Self {
            kind: err.kind(),
            message: match path {
                Some(p) => format!("{}: {err}", p.display()),
                None => err.to_string(),
            },
            trace,
            path: path.map(Path::to_path_buf),
        }
    }

    fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "loader thread panicked".to_string());
        Self {
            kind: FailureKind::Other,
            trace: format!("panic: {message}"),
            message,
            path: None,
        }
    }
}

/// Event emitted by a background load.
#[derive(Debug)]
pub enum LoadEvent {
    /// Percentage of files read, 0-100, non-decreasing.
    Progress(u8),
    Done {
        stack: FrameStack,
        elapsed: Duration,
    },
    Failed(LoadFailure),
    /// Always the last event of a load, sent exactly once.
    Finished,
}

/// A [`LoadEvent`] tagged with the load it belongs to.
#[derive(Debug)]
pub struct LoadMessage {
    pub generation: u64,
    pub event: LoadEvent,
}

/// Everything a loader thread needs to populate one frame stack.
#[derive(Clone, Debug)]
pub struct LoadRequest {
    pub directory: PathBuf,
    pub files: Vec<PathBuf>,
    pub generation: u64,
    pub progress_step: u8,
}

impl LoadRequest {
    /// List `directory` according to `config`.
    pub fn from_directory(directory: &Path, config: &ViewerConfig, generation: u64) -> Result<Self> {
        let files = list_frame_files(directory, config.sort_entries)?;
        Ok(Self {
            directory: directory.to_path_buf(),
            files,
            generation,
            progress_step: config.progress_step,
        })
    }
}

/// Read every file in order into a frame stack.
///
/// `on_progress` receives 0 first, then a percentage each time at least
/// `progress_step` more percent of the files have been read, then 100.
/// The first unreadable file aborts the whole load.
pub fn read_stack(
    files: &[PathBuf],
    progress_step: u8,
    cancel: &AtomicBool,
    mut on_progress: impl FnMut(u8),
) -> std::result::Result<FrameStack, LoadFailure> {
    let total = files.len();
    let step = progress_step.clamp(1, 100) as usize;
    let mut frames = Vec::with_capacity(total);
    let mut last_reported = 0usize;
    let mut expected_dims = None;

    on_progress(0);

    for (index, path) in files.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            return Err(LoadFailure::from_error(&FitscubeError::Cancelled, None));
        }

        let mut frame =
            read_frame(path).map_err(|e| LoadFailure::from_error(&e, Some(path)))?;
        frame.metadata.frame_index = index;
        debug!("Read frame {index} from {}", path.display());

        let dims = frame.dimensions();
        match expected_dims {
            None => expected_dims = Some(dims),
            Some((width, height)) if (width, height) != dims => {
                let err = FitscubeError::DimensionMismatch {
                    index,
                    width,
                    height,
                    actual_width: dims.0,
                    actual_height: dims.1,
                };
                return Err(LoadFailure::from_error(&err, Some(path)));
            }
            Some(_) => {}
        }
        frames.push(frame);

        let pct = (index + 1) * 100 / total.max(1);
        if pct < 100 && pct >= last_reported + step {
            last_reported = pct;
            on_progress(pct as u8);
        }
    }

    on_progress(100);
    Ok(FrameStack::new(frames))
}

/// Handle to a running background load.
pub struct LoadHandle {
    generation: u64,
    rx: mpsc::Receiver<LoadMessage>,
    cancel: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl LoadHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Next pending message, without blocking.
    pub fn try_recv(&self) -> Option<LoadMessage> {
        self.rx.try_recv().ok()
    }

    /// Next message, blocking. `None` once the loader has exited and the channel is drained.
    pub fn recv(&self) -> Option<LoadMessage> {
        self.rx.recv().ok()
    }

    /// Ask the loader to stop before the next file.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Block until the load finishes and return all of its events.
    pub fn wait(mut self) -> Vec<LoadEvent> {
        let mut events = Vec::new();
        while let Some(msg) = self.recv() {
            let finished = matches!(msg.event, LoadEvent::Finished);
            events.push(msg.event);
            if finished {
                break;
            }
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        events
    }
}

/// Run `request` on a dedicated thread.
///
/// `notify` is called after every event so an event loop can wake up.
pub fn spawn_loader<N>(request: LoadRequest, notify: N) -> Result<LoadHandle>
where
    N: Fn() + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));
    let generation = request.generation;
    let thread_cancel = Arc::clone(&cancel);

    let thread = std::thread::Builder::new()
        .name(format!("fitscube-loader-{generation}"))
        .spawn(move || run_load(request, &thread_cancel, &tx, &notify))?;

    Ok(LoadHandle {
        generation,
        rx,
        cancel,
        thread: Some(thread),
    })
}

fn run_load(
    request: LoadRequest,
    cancel: &AtomicBool,
    tx: &mpsc::Sender<LoadMessage>,
    notify: &dyn Fn(),
) {
    let generation = request.generation;
    let send = |event: LoadEvent| {
        let _ = tx.send(LoadMessage { generation, event });
        notify();
    };

    info!(
        "Loading {} files from {} (load {generation})",
        request.files.len(),
        request.directory.display()
    );
    let start = Instant::now();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        read_stack(&request.files, request.progress_step, cancel, |pct| {
            send(LoadEvent::Progress(pct))
        })
    }));

    match outcome {
        Ok(Ok(stack)) => {
            let elapsed = start.elapsed();
            info!("Loaded {} frames in {:.2?}", stack.len(), elapsed);
            send(LoadEvent::Done { stack, elapsed });
        }
        Ok(Err(failure)) if failure.kind == FailureKind::Cancelled => {
            info!("Load {generation} cancelled");
        }
        Ok(Err(failure)) => {
            error!("Load {generation} failed: {}", failure.trace);
            send(LoadEvent::Failed(failure));
        }
        Err(payload) => {
            let failure = LoadFailure::from_panic(payload.as_ref());
            error!("Load {generation} panicked: {}", failure.message);
            send(LoadEvent::Failed(failure));
        }
    }

    send(LoadEvent::Finished);
}

/// Load a directory synchronously on the calling thread.
pub fn load_directory(
    directory: &Path,
    config: &ViewerConfig,
    on_progress: impl FnMut(u8),
) -> std::result::Result<FrameStack, LoadFailure> {
    let request = LoadRequest::from_directory(directory, config, 0)
        .map_err(|e| LoadFailure::from_error(&e, Some(directory)))?;
    let cancel = AtomicBool::new(false);
    read_stack(&request.files, request.progress_step, &cancel, on_progress)
}
