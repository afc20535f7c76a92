// src/error.rs
use std::any::Any;
use thiserror::Error;

/// Failures the analysis orchestrator reports back to the hosting UI.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrchestratorError {
    #[error("File dialog not available. Please use the manual file input below.")]
    DialogUnavailable,

    #[error("Please select a file first")]
    NoFileSelected,

    #[error("Error opening file dialog: {0}. Please use the manual file input below.")]
    DialogInvocationFailed(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("An analysis is already running")]
    Busy,
}

/// Error returned by a statement backend. Carries a human readable message.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PickerError {
    #[error("file picker is not available in this environment")]
    Unavailable,

    #[error("{0}")]
    Invocation(String),
}

impl From<PickerError> for OrchestratorError {
    fn from(err: PickerError) -> Self {
        match err {
            PickerError::Unavailable => OrchestratorError::DialogUnavailable,
            PickerError::Invocation(message) => OrchestratorError::DialogInvocationFailed(message),
        }
    }
}

impl From<BackendError> for OrchestratorError {
    fn from(err: BackendError) -> Self {
        OrchestratorError::AnalysisFailed(err.message)
    }
}

/// Extracts the message from a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_text_matches_user_facing_messages() {
        assert_eq!(
            OrchestratorError::NoFileSelected.to_string(),
            "Please select a file first"
        );
        assert_eq!(
            OrchestratorError::from(BackendError::new("Unsupported file format")).to_string(),
            "Analysis failed: Unsupported file format"
        );
        assert!(OrchestratorError::from(PickerError::Invocation("no portal".into()))
            .to_string()
            .contains("no portal"));
    }

    #[test]
    fn unavailable_picker_maps_to_dialog_unavailable() {
        assert_eq!(
            OrchestratorError::from(PickerError::Unavailable),
            OrchestratorError::DialogUnavailable
        );
    }

    #[test]
    fn panic_payloads_are_readable() {
        let static_payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(static_payload.as_ref()), "boom");

        let owned_payload: Box<dyn Any + Send> = Box::new(String::from("kaboom"));
        assert_eq!(panic_message(owned_payload.as_ref()), "kaboom");

        let other: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }
}
