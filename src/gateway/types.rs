//! Submission types and error definitions.

use std::time::Duration;
use thiserror::Error;

/// Which transaction a request asks the gateway to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionKind {
    /// Bank transfer from the faucet wallet.
    Faucet,
    /// Node registration with an attestation certificate.
    Register,
}

impl SubmissionKind {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionKind::Faucet => "faucet",
            SubmissionKind::Register => "register",
        }
    }
}

impl std::fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transaction hash returned by the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxHash(pub String);

impl TxHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TxHash> for String {
    fn from(hash: TxHash) -> Self {
        hash.0
    }
}

/// Failures launching or waiting on the client binary.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// The process could not be started (missing binary, permissions).
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading the process output failed.
    #[error("I/O error while waiting on '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process exited unsuccessfully.
    #[error("'{program}' exited with {}: {stderr}", exit_label(.code))]
    Exit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The process did not finish before the deadline and was killed.
    #[error("'{program}' timed out after {} seconds", .after.as_secs())]
    TimedOut { program: String, after: Duration },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Errors that can occur while submitting a transaction.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No key with the configured wallet name is known to the client.
    #[error("no key named '{0}' in the client keyring")]
    KeyNotFound(String),

    /// The client binary could not be run to completion.
    #[error("invocation failed: {0}")]
    Invocation(#[from] InvocationError),

    /// The client produced output that could not be interpreted.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The network rejected the transaction.
    #[error("submission rejected with code {code}: {raw_log}")]
    Submission { code: u32, raw_log: String },

    /// Writing the transient certificate file failed.
    #[error("transient file error: {0}")]
    TransientFile(#[source] std::io::Error),
}

impl GatewayError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::KeyNotFound(_) => "key_not_found",
            GatewayError::Invocation(InvocationError::TimedOut { .. }) => "timeout",
            GatewayError::Invocation(_) => "invocation",
            GatewayError::MalformedResponse(_) => "malformed_response",
            GatewayError::Submission { .. } => "rejected",
            GatewayError::TransientFile(_) => "filesystem",
        }
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GatewayError::Submission {
            code: 5,
            raw_log: "insufficient funds".into(),
        };
        assert_eq!(err.to_string(), "submission rejected with code 5: insufficient funds");

        let err = GatewayError::from(InvocationError::TimedOut {
            program: "secretd".into(),
            after: Duration::from_secs(30),
        });
        assert_eq!(err.to_string(), "invocation failed: 'secretd' timed out after 30 seconds");
        assert_eq!(err.kind(), "timeout");
    }

    #[test]
    fn test_exit_without_code() {
        let err = InvocationError::Exit {
            program: "secretd".into(),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_key_not_found_is_distinct() {
        let err = GatewayError::KeyNotFound("a".into());
        assert_eq!(err.kind(), "key_not_found");
        assert!(!matches!(err, GatewayError::Invocation(_)));
    }
}
