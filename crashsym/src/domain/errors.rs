//! Structured error types for crashsym
//!
//! Using thiserror for automatic Display implementation and error chaining.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymbolicateError {
    #[error("Error when using {command}: {status}{}", stderr_suffix(.stderr))]
    SubprocessFailure { command: String, status: ExitStatus, stderr: String },

    #[error("Empty result from {command}")]
    EmptyResolution { command: String },

    #[error("No usable debug symbols for {image} (tried {})", display_paths(.tried))]
    ExhaustedCandidates { image: String, tried: Vec<PathBuf> },

    #[error("Malformed crash report: {0}")]
    MalformedInput(String),

    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} did not finish within {}s", .timeout.as_secs())]
    Timeout { command: String, timeout: Duration },
}

impl SymbolicateError {
    /// Whether this error describes one failed resolver attempt
    ///
    /// These are the errors the strict/lenient policy applies to. Anything
    /// else is fatal to the call.
    #[must_use]
    pub fn is_candidate_failure(&self) -> bool {
        matches!(
            self,
            Self::SubprocessFailure { .. }
                | Self::EmptyResolution { .. }
                | Self::Spawn { .. }
                | Self::Timeout { .. }
        )
    }
}

impl From<serde_json::Error> for SymbolicateError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{stderr}")
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_input_display() {
        let err = SymbolicateError::MalformedInput("missing system.cpu_arch".to_string());
        assert_eq!(err.to_string(), "Malformed crash report: missing system.cpu_arch");
        assert!(!err.is_candidate_failure());
    }

    #[test]
    fn test_exhausted_candidates_lists_paths() {
        let err = SymbolicateError::ExhaustedCandidates {
            image: "libsystem_kernel.dylib".to_string(),
            tried: vec![PathBuf::from("/a/libsystem_kernel.dylib"), PathBuf::from("/b")],
        };
        let msg = err.to_string();
        assert!(msg.contains("libsystem_kernel.dylib"));
        assert!(msg.contains("/a/libsystem_kernel.dylib, /b"));
        assert!(!err.is_candidate_failure());
    }

    #[test]
    fn test_empty_resolution_is_candidate_failure() {
        let err = SymbolicateError::EmptyResolution { command: "atosl -o x".to_string() };
        assert_eq!(err.to_string(), "Empty result from atosl -o x");
        assert!(err.is_candidate_failure());
    }

    #[test]
    fn test_timeout_display() {
        let err = SymbolicateError::Timeout {
            command: "atos -o app.dSYM".to_string(),
            timeout: Duration::from_secs(60),
        };
        assert_eq!(err.to_string(), "atos -o app.dSYM did not finish within 60s");
        assert!(err.is_candidate_failure());
    }

    #[test]
    fn test_json_error_becomes_malformed_input() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SymbolicateError::from(json_err);
        assert!(matches!(err, SymbolicateError::MalformedInput(_)));
    }
}
