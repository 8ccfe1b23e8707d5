use std::path::PathBuf;

use anyhow::Context;

use crate::foundation::error::{TwibbonError, TwibbonResult};

/// Save collaborator receiving the encoded export.
pub trait SaveSink {
    /// Persist or hand off `bytes` under `filename`. Returns where it went, for reporting.
    fn save(&mut self, filename: &str, bytes: &[u8]) -> TwibbonResult<String>;
}

/// Writes exports into a directory, creating it on first use.
#[derive(Clone, Debug)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    /// Sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SaveSink for FileSink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> TwibbonResult<String> {
        validate_filename(filename)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        let path = self.dir.join(filename);
        std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "export saved");
        Ok(path.display().to_string())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    /// Saved `(filename, bytes)` pairs in call order.
    pub(crate) saved: Vec<(String, Vec<u8>)>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything saved so far.
    pub fn saved(&self) -> &[(String, Vec<u8>)] {
        &self.saved
    }
}

impl SaveSink for InMemorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> TwibbonResult<String> {
        validate_filename(filename)?;
        self.saved.push((filename.to_string(), bytes.to_vec()));
        Ok(format!("memory:{filename}"))
    }
}

/// Reject names that are empty or would escape the target directory.
pub(crate) fn validate_filename(filename: &str) -> TwibbonResult<()> {
    if filename.trim().is_empty() {
        return Err(TwibbonError::validation("export filename must not be empty"));
    }
    if filename.contains(['/', '\\']) || filename == "." || filename == ".." {
        return Err(TwibbonError::validation(format!(
            "export filename '{filename}' must be a bare file name"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
