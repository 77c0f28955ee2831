//! Transaction-submission subsystem.
//!
//! # Data Flow
//! ```text
//! Validated request value
//!     → service.rs (choose submission, resolve sender, own transient file)
//!     → command.rs (typed argument vector)
//!     → runner.rs (child process with timeout)
//!     → interpret.rs / keys.rs (parse stdout)
//!     → TxHash or GatewayError
//! ```
//!
//! # Security Constraints
//! - Arguments are passed directly to the binary, never through a shell
//! - Certificates are never logged
//! - Every invocation has a deadline

pub mod command;
pub mod interpret;
pub mod keys;
pub mod runner;
pub mod service;
pub mod transient;
pub mod types;

pub use runner::{CommandRunner, ProcessOutput, ProcessRunner};
pub use service::{Gateway, Submission};
pub use types::{GatewayError, GatewayResult, InvocationError, SubmissionKind, TxHash};
