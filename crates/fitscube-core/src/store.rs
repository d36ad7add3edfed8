use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::LoadPolicy;
use crate::error::{FitscubeError, Result};
use crate::frame::FrameStack;
use crate::loader::LoadFailure;

/// Lifecycle of the frame stack for the selected directory.
#[derive(Clone, Debug, Default)]
pub enum LoadState {
    #[default]
    Empty,
    Loading {
        generation: u64,
        directory: PathBuf,
    },
    Ready(Arc<FrameStack>),
    Failed(LoadFailure),
}

impl LoadState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Loading { .. } => "Loading",
            Self::Ready(_) => "Ready",
            Self::Failed(_) => "Failed",
        }
    }
}

/// Readiness-gated owner of the frame stack.
///
/// Readers go through [`FrameStore::ready`], which refuses access until a
/// load has completed, so nothing can observe a partially loaded stack.
#[derive(Debug, Default)]
pub struct FrameStore {
    state: LoadState,
    generation: u64,
    directory: Option<PathBuf>,
}

impl FrameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready(_))
    }

    /// Enter the loading state for `directory` and return the new generation.
    ///
    /// With [`LoadPolicy::Reject`] a load already in flight makes this fail;
    /// with [`LoadPolicy::Restart`] the caller is expected to cancel the old
    /// loader, whose late results are then dropped by [`FrameStore::finish`].
    pub fn begin_load(&mut self, directory: &Path, policy: LoadPolicy) -> Result<u64> {
        if let LoadState::Loading { generation, .. } = &self.state {
            match policy {
                LoadPolicy::Reject => {
                    warn!("Load of {} rejected: load {generation} in progress", directory.display());
                    return Err(FitscubeError::LoadInProgress);
                }
                LoadPolicy::Restart => {
                    info!("Restarting load: generation {generation} superseded");
                }
            }
        }

        self.generation += 1;
        self.directory = Some(directory.to_path_buf());
        self.state = LoadState::Loading {
            generation: self.generation,
            directory: directory.to_path_buf(),
        };
        Ok(self.generation)
    }

    /// Record the outcome of load `generation`. Returns `false` for stale results.
    pub fn finish(
        &mut self,
        generation: u64,
        result: std::result::Result<FrameStack, LoadFailure>,
    ) -> bool {
        if generation != self.generation || !self.is_loading() {
            warn!(
                "Dropping result of stale load {generation} (current {})",
                self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(stack) => LoadState::Ready(Arc::new(stack)),
            Err(failure) => LoadState::Failed(failure),
        };
        true
    }

    /// The loaded stack, or [`FitscubeError::NotReady`] while empty, loading or failed.
    pub fn ready(&self) -> Result<&Arc<FrameStack>> {
        match &self.state {
            LoadState::Ready(stack) => Ok(stack),
            _ => Err(FitscubeError::NotReady),
        }
    }

    pub fn frame_count(&self) -> Option<usize> {
        self.ready().ok().map(|s| s.len())
    }

    /// (width, height) of the loaded frames.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.ready().ok().and_then(|s| s.dimensions())
    }
}
