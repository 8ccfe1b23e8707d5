use crate::foundation::core::Layer;

/// Severity of a user-facing notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Confirmation of a completed action.
    Success,
    /// An action could not be carried out.
    Error,
}

/// Message the host should surface to the user (toast, status line, stderr).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Notice {
    /// Transform returned to defaults.
    Reset,
    /// Export handed to the save collaborator.
    Exported {
        /// Where the collaborator put it.
        location: String,
    },
    /// Export was attempted without a photo or a finished composite.
    ExportBlocked,
    /// An image could not be decoded.
    DecodeFailed {
        /// Layer whose source failed.
        layer: Layer,
    },
}

impl Notice {
    /// Severity of this notice.
    pub fn level(&self) -> NoticeLevel {
        match self {
            Self::Reset | Self::Exported { .. } => NoticeLevel::Success,
            Self::ExportBlocked | Self::DecodeFailed { .. } => NoticeLevel::Error,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reset => f.write_str("Position and zoom reset!"),
            Self::Exported { .. } => f.write_str("Image downloaded successfully!"),
            Self::ExportBlocked => f.write_str("Please select a frame and upload a photo first"),
            Self::DecodeFailed { layer } => write!(f, "Could not read the {layer} image"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/notice.rs"]
mod tests;
