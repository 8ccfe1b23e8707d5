use crate::foundation::core::Layer;

/// Convenience result type used across twibbon.
pub type TwibbonResult<T> = Result<T, TwibbonError>;

/// Top-level error taxonomy used by editor APIs.
#[derive(thiserror::Error, Debug)]
pub enum TwibbonError {
    /// Invalid user-provided configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image source could not be resolved into pixels.
    #[error("decode error ({layer}): {message}")]
    Decode {
        /// Which layer failed to decode.
        layer: Layer,
        /// Underlying decoder message.
        message: String,
    },

    /// Export was requested before any composite exists.
    #[error("export unavailable: {0}")]
    ExportUnavailable(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TwibbonError {
    /// Build a [`TwibbonError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TwibbonError::Decode`] value.
    pub fn decode(layer: Layer, msg: impl Into<String>) -> Self {
        Self::Decode {
            layer,
            message: msg.into(),
        }
    }

    /// Build a [`TwibbonError::ExportUnavailable`] value.
    pub fn export_unavailable(msg: impl Into<String>) -> Self {
        Self::ExportUnavailable(msg.into())
    }

    /// Build a [`TwibbonError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Rebuild an equivalent error; `anyhow::Error` is not `Clone`.
    pub(crate) fn duplicate(&self) -> Self {
        match self {
            Self::Validation(m) => Self::Validation(m.clone()),
            Self::Decode { layer, message } => Self::Decode {
                layer: *layer,
                message: message.clone(),
            },
            Self::ExportUnavailable(m) => Self::ExportUnavailable(m.clone()),
            Self::Serde(m) => Self::Serde(m.clone()),
            Self::Other(e) => Self::Other(anyhow::anyhow!("{e:#}")),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
