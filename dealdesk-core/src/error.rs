//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use dealdesk_api::ApiError;

use dealdesk_api::EntityKind;

/// Core layer error type
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No client registered for the requested entity
    #[error("No client registered for resource: {0}")]
    ClientMissing(EntityKind),

    /// `submit` was called while no form editor is open
    #[error("No form editor is open")]
    NoActiveForm,

    /// `confirm_delete` was called while no delete prompt is open
    #[error("No delete confirmation is pending")]
    NoDeletePrompt,

    /// Remote call error (converted from the client library)
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl CoreError {
    /// Whether this is expected behavior (user input, missing record, etc.),
    /// used for log level selection.
    ///
    /// Level `warn` should be used when this returns `true`, `error`
    /// otherwise. Update this method when adding variants.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Api(e) => e.is_expected(),
            Self::ClientMissing(_) | Self::NoActiveForm | Self::NoDeletePrompt => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
