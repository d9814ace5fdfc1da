//! Create assignments and post grades through the Canvas LMS REST API.
//!
//! [`GradingClient`] holds the course identity and an authenticated HTTP
//! transport. The bearer token comes from the caller or from
//! `~/.canvasgrader`, a file that must be readable by its owner only.
//!
//! Grade uploads are processed by Canvas as a deferred job: a successful
//! call means the upload was accepted, and rows whose student key is unknown
//! are dropped by Canvas without an error.

pub mod clients;
pub mod error;
pub mod models;
pub mod utils;

pub use clients::{GradingClient, HttpTransport, RemoteResponse, Transport};
pub use error::{GraderError, Result};
pub use models::{
    AssignmentId, AssignmentSpec, ClientConfig, CommentPayload, CourseId, CredentialFile,
    CredentialSource, ExplicitKey, GradePayload, GradeValue, StudentId,
};
pub use utils::init_tracing;
