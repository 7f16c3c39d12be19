//! Client-perceived state of a sign-up or sign-in form submission.

use serde::Serialize;
use thiserror::Error;

/// Form submission lifecycle: `Idle -> Submitting -> {Success, Error}`.
///
/// `Error` is recoverable by submitting again; `Success` is terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error { message: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot {action} while {from}")]
pub struct InvalidTransition {
    pub from: &'static str,
    pub action: &'static str,
}

impl SubmissionState {
    fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Success => "success",
            SubmissionState::Error { .. } => "error",
        }
    }

    /// Start a submission. Allowed from `Idle` and `Error`.
    pub fn submit(&self) -> Result<Self, InvalidTransition> {
        match self {
            SubmissionState::Idle | SubmissionState::Error { .. } => Ok(SubmissionState::Submitting),
            other => Err(InvalidTransition {
                from: other.name(),
                action: "submit",
            }),
        }
    }

    /// Resolve an in-flight submission.
    pub fn resolve<T, E: std::fmt::Display>(
        &self,
        outcome: &Result<T, E>,
    ) -> Result<Self, InvalidTransition> {
        if *self != SubmissionState::Submitting {
            return Err(InvalidTransition {
                from: self.name(),
                action: "resolve",
            });
        }
        Ok(match outcome {
            Ok(_) => SubmissionState::Success,
            Err(e) => SubmissionState::Error {
                message: e.to_string(),
            },
        })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Success)
    }

    /// Message to show next to the form, if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Error { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_submission() {
        let state = SubmissionState::default().submit().unwrap();
        let state = state.resolve::<(), String>(&Ok(())).unwrap();

        assert_eq!(state, SubmissionState::Success);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_error_is_recoverable() {
        let state = SubmissionState::Idle.submit().unwrap();
        let state = state
            .resolve::<(), _>(&Err("Invalid email or password"))
            .unwrap();

        assert_eq!(state.error_message(), Some("Invalid email or password"));
        assert_eq!(state.submit().unwrap(), SubmissionState::Submitting);
    }

    #[test]
    fn test_success_is_terminal() {
        let err = SubmissionState::Success.submit().unwrap_err();
        assert_eq!(err.to_string(), "cannot submit while success");
    }

    #[test]
    fn test_double_submit_rejected() {
        assert!(SubmissionState::Submitting.submit().is_err());
    }

    #[test]
    fn test_resolve_requires_submitting() {
        assert!(SubmissionState::Idle.resolve::<(), String>(&Ok(())).is_err());
    }
}
