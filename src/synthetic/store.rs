use crate::synthetic::error::SyntheticSeriesError;
use crate::synthetic::generator::SyntheticSeries;
use crate::utils::{ensure_dir_exists, parent_dir};
use log::{debug, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default location of the artifact, relative to the working directory.
pub const DEFAULT_SYNTHETIC_SERIES_PATH: &str = "data/national_indicator_synthetic.json";

/// `Uninitialized → Materializing → Materialized`. `Materialized` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializationState {
    Uninitialized,
    Materializing,
    Materialized,
}

/// What a call to [`SyntheticSeriesStore::materialize`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialization {
    /// No artifact existed; a fresh series was generated and written.
    Created,
    /// An artifact was already there and was left untouched.
    AlreadyPresent,
}

/// The file-backed home of the synthetic series.
///
/// The artifact is created at most once: if it exists it is never rewritten. The
/// write goes through a temporary file in the same directory that is then linked
/// into place only if the target is still absent, so concurrent first-time
/// initializations cannot clobber each other.
#[derive(Debug)]
pub struct SyntheticSeriesStore {
    path: PathBuf,
    state: MaterializationState,
}

impl SyntheticSeriesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: MaterializationState::Uninitialized,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> MaterializationState {
        self.state
    }

    /// Ensures the artifact exists, generating a new series only if it does not.
    pub async fn materialize(&mut self) -> Result<Materialization, SyntheticSeriesError> {
        self.materialize_with(SyntheticSeries::generate).await
    }

    /// Like [`Self::materialize`], with a custom generator. `generate` is only called
    /// when the artifact is missing.
    pub async fn materialize_with<G>(
        &mut self,
        generate: G,
    ) -> Result<Materialization, SyntheticSeriesError>
    where
        G: FnOnce() -> SyntheticSeries,
    {
        if self.state == MaterializationState::Materialized {
            return Ok(Materialization::AlreadyPresent);
        }

        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| SyntheticSeriesError::Read(self.path.clone(), e))?;
        if exists {
            debug!("Synthetic series already present at {}", self.path.display());
            self.state = MaterializationState::Materialized;
            return Ok(Materialization::AlreadyPresent);
        }

        self.state = MaterializationState::Materializing;
        let dir = parent_dir(&self.path).to_path_buf();
        ensure_dir_exists(&dir)
            .await
            .map_err(|e| SyntheticSeriesError::DirCreation(dir.clone(), e))?;

        let bytes = serde_json::to_vec_pretty(&generate()).map_err(SyntheticSeriesError::Encode)?;
        let target = self.path.clone();
        let created = tokio::task::spawn_blocking(move || write_if_absent(&dir, &target, &bytes))
            .await?
            .map_err(|e| SyntheticSeriesError::Write(self.path.clone(), e))?;

        self.state = MaterializationState::Materialized;
        if created {
            info!("Wrote synthetic series to {}", self.path.display());
            Ok(Materialization::Created)
        } else {
            info!(
                "Synthetic series appeared at {} while generating, keeping it",
                self.path.display()
            );
            Ok(Materialization::AlreadyPresent)
        }
    }

    pub async fn load(&self) -> Result<SyntheticSeries, SyntheticSeriesError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| SyntheticSeriesError::Read(self.path.clone(), e))?;
        serde_json::from_slice(&bytes).map_err(|e| SyntheticSeriesError::Decode(self.path.clone(), e))
    }
}

/// Returns `Ok(false)` when `target` already exists.
fn write_if_absent(dir: &Path, target: &Path, bytes: &[u8]) -> io::Result<bool> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    match tmp.persist_noclobber(target) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.error),
    }
}
