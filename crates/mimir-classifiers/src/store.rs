//! Training-set persistence
//!
//! JSON-lines flat file holding the examples the active model was fitted
//! from, so a restarted process can reconstruct the same model. Writes go
//! through a temp file and rename so a crash never leaves a torn snapshot.

use mimir_core::{LabeledExample, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Flat-file store for the current training set
#[derive(Debug, Clone)]
pub struct TrainingStore {
    path: PathBuf,
}

impl TrainingStore {
    /// Create a store backed by the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted training set.
    ///
    /// A missing file is an empty set, not an error.
    pub fn load(&self) -> Result<Vec<LabeledExample>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let mut examples = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            examples.push(serde_json::from_str(&line)?);
        }

        debug!(count = examples.len(), path = %self.path.display(), "loaded training set");
        Ok(examples)
    }

    /// Replace the persisted training set wholesale
    pub fn replace(&self, examples: &[LabeledExample]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        {
            let file = File::create(&tmp)?;
            let mut writer = BufWriter::new(file);
            for example in examples {
                serde_json::to_writer(&mut writer, example)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;

        debug!(count = examples.len(), path = %self.path.display(), "persisted training set");
        Ok(())
    }
}
