//! Per-run scratch directory.
//!
//! Every pipeline run owns exactly one `RunWorkspace`. All intermediate
//! artifacts (sampled frames, demuxed audio) live under it, and dropping
//! the workspace removes the whole tree, which covers success, partial
//! failure and fatal failure exit paths alike.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::error::MediaResult;

/// Exclusive scratch directory for one pipeline run.
#[derive(Debug)]
pub struct RunWorkspace {
    root: TempDir,
}

impl RunWorkspace {
    /// Create a fresh workspace under the system temp directory.
    pub fn create() -> MediaResult<Self> {
        let root = tempfile::Builder::new().prefix("vfit-run-").tempdir()?;
        debug!(path = %root.path().display(), "Created run workspace");
        Ok(Self { root })
    }

    /// Workspace root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Directory for sampled frames, created on first call.
    pub fn frames_dir(&self) -> MediaResult<PathBuf> {
        let dir = self.root.path().join("frames");
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(dir)
    }

    /// Path for the demuxed audio file.
    pub fn audio_path(&self) -> PathBuf {
        self.root.path().join("audio.mp3")
    }

    /// Remove the workspace eagerly, surfacing IO errors.
    ///
    /// Dropping achieves the same cleanup best-effort; this is for
    /// callers that want the error.
    pub fn close(self) -> MediaResult<()> {
        let path = self.root.path().to_path_buf();
        self.root.close()?;
        debug!(path = %path.display(), "Removed run workspace");
        Ok(())
    }
}
