use thiserror::Error;

/// Tagged error kinds for the analysis pipeline.
///
/// `InvalidSbom` and `Internal` are fatal to the analysis and surfaced to
/// the caller. `ExternalUnavailable` is recovered locally by the adapters:
/// the pipeline proceeds with zero-valued defaults for the affected item
/// and the final report still emits.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid SBOM: {reason}")]
    InvalidSbom { reason: String },

    #[error("external source '{source_name}' unavailable: {details}")]
    ExternalUnavailable {
        source_name: String,
        details: String,
    },

    #[error("internal analysis failure in phase '{}'{}: {}", .phase, fmt_id(.id), .details)]
    Internal {
        phase: &'static str,
        id: Option<String>,
        details: String,
    },
}

fn fmt_id(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(" (id: {})", id),
        None => String::new(),
    }
}

impl AnalysisError {
    pub fn invalid_sbom(reason: impl Into<String>) -> Self {
        AnalysisError::InvalidSbom {
            reason: reason.into(),
        }
    }

    pub fn internal(phase: &'static str, id: Option<String>, details: impl Into<String>) -> Self {
        AnalysisError::Internal {
            phase,
            id,
            details: details.into(),
        }
    }
}

/// Process exit codes for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    CriticalFindings = 1,
    InvalidArguments = 2,
    ApplicationError = 3,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
