//! # Report Artifacts
//!
//! Every orchestration gets its own report file. The name carries the scan id
//! plus a random suffix and the file is created exclusively, so two scans can
//! never write to, read from or delete each other's report.
//!
//! An [`Artifact`] removes its file exactly once: through [`Artifact::release`]
//! on the normal path, or on drop if the orchestration is torn down early
//! (panic, aborted task). A file that is already gone counts as removed.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempPath;
use tracing::{debug, warn};
use uuid::Uuid;
use vision_common::error::ScanError;

const REPORT_SUFFIX: &str = ".xml";

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Reserves a fresh report path for `scan_id`.
    ///
    /// The file is created empty so the name is owned from this point on; the
    /// scanner truncates it when it writes its report.
    pub fn acquire(&self, scan_id: Uuid) -> Result<Artifact, ScanError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| ScanError::ArtifactIo {
            path: self.dir.clone(),
            source,
        })?;

        let prefix = format!("vision-{scan_id}-");
        let file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(REPORT_SUFFIX)
            .tempfile_in(&self.dir)
            .map_err(|source| ScanError::ArtifactIo {
                path: self.dir.clone(),
                source,
            })?;

        let path = file.into_temp_path();
        let location = path.to_path_buf();
        debug!(%scan_id, path = %location.display(), "report artifact acquired");
        Ok(Artifact {
            location,
            path: Some(path),
        })
    }
}

/// Exclusive handle on one report path.
#[derive(Debug)]
pub struct Artifact {
    location: PathBuf,
    path: Option<TempPath>,
}

impl Artifact {
    pub fn path(&self) -> &Path {
        &self.location
    }

    /// Deletes the report file. A missing file is not an error.
    pub fn release(mut self) -> Result<(), ScanError> {
        match self.path.take() {
            Some(path) => remove(path),
            None => Ok(()),
        }
    }
}

impl Drop for Artifact {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            if let Err(err) = remove(path) {
                warn!(error = %err, "failed to remove report artifact on drop");
            }
        }
    }
}

fn remove(path: TempPath) -> Result<(), ScanError> {
    let location = path.to_path_buf();
    match path.close() {
        Ok(()) => {
            debug!(path = %location.display(), "report artifact released");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %location.display(), "report artifact already gone");
            Ok(())
        }
        Err(source) => Err(ScanError::ArtifactIo {
            path: location,
            source,
        }),
    }
}
