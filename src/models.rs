pub mod assignment;
pub mod client_config;
pub mod credentials;
pub mod grades;

pub use assignment::{AssignmentId, AssignmentSpec, CreatedAssignment};
pub use client_config::{ClientConfig, CourseId};
pub use credentials::{CredentialFile, CredentialSource, ExplicitKey};
pub use grades::{CommentPayload, GradePayload, GradeValue, StudentId};
