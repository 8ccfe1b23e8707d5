use std::path::Path;

use anyhow::Context;

use crate::encode::png::DEFAULT_EXPORT_FILENAME;
use crate::encode::sink::validate_filename;
use crate::foundation::error::{TwibbonError, TwibbonResult};
use crate::render::composite::RenderSettings;
use crate::transform::state::ScaleLimits;

/// When decodes are re-run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedrawPolicy {
    /// Decode on asset change only; transform changes redraw from decoded pixels.
    #[default]
    Cached,
    /// Every change re-requests both decodes and waits for the pair again.
    ReloadAlways,
}

/// Editor configuration. Every field has a default, so `{}` is a valid config file.
///
/// The output resolution is deliberately absent: it is fixed at [`crate::Canvas::OUTPUT`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Scale limits per input modality.
    pub limits: ScaleLimits,
    /// File name passed to the save collaborator.
    pub export_filename: String,
    /// Render options.
    pub render: RenderSettings,
    /// Decode scheduling.
    pub redraw_policy: RedrawPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            limits: ScaleLimits::default(),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            render: RenderSettings::default(),
            redraw_policy: RedrawPolicy::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> TwibbonResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| TwibbonError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> TwibbonResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check limits and the export file name.
    pub fn validate(&self) -> TwibbonResult<()> {
        self.limits.validate()?;
        validate_filename(&self.export_filename)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
