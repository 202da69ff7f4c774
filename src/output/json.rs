//! JSON file sink
//!
//! Artifacts are laid out as `<root>/v<N>/<category>.json`.

use crate::model::{Category, Record, Version};
use crate::output::traits::{OutputError, OutputResult, OutputSink};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Writes each category artifact as a pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    root: PathBuf,
}

impl JsonFileSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns where the artifact for (version, category) is written
    pub fn artifact_path(&self, version: Version, category: Category) -> PathBuf {
        self.root
            .join(version.to_string())
            .join(format!("{}.json", category.slug()))
    }
}

impl OutputSink for JsonFileSink {
    fn write(&self, version: Version, category: Category, records: &[Record]) -> OutputResult<PathBuf> {
        let path = self.artifact_path(version, category);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| OutputError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let file = File::create(&path).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(path)
    }
}
