use tracing::{debug, info};

use crate::clients::transport::{HttpTransport, Transport};
use crate::error::Result;
use crate::models::{
    AssignmentId, AssignmentSpec, ClientConfig, CommentPayload, CourseId, CreatedAssignment,
    CredentialFile, CredentialSource, ExplicitKey, GradePayload, grades::grade_data_fields,
};
use crate::utils::init_tracing;

/// Client for one Canvas course.
///
/// Creates assignments and posts grades and comments through the Canvas REST
/// API. Each operation sends exactly one request and blocks until it is
/// answered. There is no retry, pagination or caching; a non-2xx answer comes
/// back as [`crate::GraderError::RemoteApi`].
///
/// The client may be reused for any number of sequential calls but is not
/// meant to be shared between threads.
///
/// # Example
///
/// ```no_run
/// use canvas_grader::{ClientConfig, GradePayload, GradingClient};
///
/// let config = ClientConfig::new("canvas.example.edu", 1234).with_id_namespace("sis_user_id");
/// let client = GradingClient::new(config)?;
/// let assignment = client.create_assignment_named("Homework 1", 10)?;
/// let grades = GradePayload::from([("A0001".into(), 9.into())]);
/// client.grade_assignment(assignment, Some(&grades), None)?;
/// # Ok::<(), canvas_grader::GraderError>(())
/// ```
pub struct GradingClient<T = HttpTransport> {
    host: String,
    course_id: CourseId,
    id_namespace: Option<String>,
    transport: T,
}

impl GradingClient<HttpTransport> {
    /// Build a client from `config`. Without an explicit key the key is read
    /// from `~/.canvasgrader`, which must exist and be private to its owner.
    pub fn new(config: ClientConfig) -> Result<Self> {
        match config.api_key.clone() {
            Some(key) => Self::with_credentials(config, &ExplicitKey::new(key)),
            None => Self::with_credentials(config, &CredentialFile::default_location()?),
        }
    }

    /// Build a client whose key comes from `source`. Any `api_key` already in
    /// `config` is ignored.
    pub fn with_credentials(config: ClientConfig, source: &impl CredentialSource) -> Result<Self> {
        if config.enable_logs {
            init_tracing();
        }
        let api_key = source.resolve_credential()?;
        let transport = HttpTransport::new(&api_key)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> GradingClient<T> {
    /// Build a client that sends through `transport`. The transport is
    /// responsible for authentication.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        debug!(
            host = config.host.as_str(),
            course_id = config.course_id.as_str(),
            id_namespace = config.id_namespace.as_deref(),
            "Grading client ready"
        );
        Self {
            host: config.host,
            course_id: config.course_id,
            id_namespace: config.id_namespace,
            transport,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    pub fn id_namespace(&self) -> Option<&str> {
        self.id_namespace.as_deref()
    }

    /// `https://{host}/api/v1/courses/{course_id}/{path}`, with every leading
    /// and trailing `/` removed from `path`.
    pub fn build_url(&self, path: &str) -> String {
        format!(
            "https://{}/api/v1/courses/{}/{}",
            self.host,
            self.course_id,
            path.trim_matches('/')
        )
    }

    /// Create an assignment and return its id.
    pub fn create_assignment(&self, spec: &AssignmentSpec) -> Result<AssignmentId> {
        let url = self.build_url("/assignments");
        let body = self
            .transport
            .post_form(&url, &spec.form_fields())?
            .into_success_body()?;
        let created: CreatedAssignment = serde_json::from_str(&body)?;

        info!(
            assignment_id = created.id.0,
            name = spec.name.as_str(),
            "Assignment created"
        );
        Ok(created.id)
    }

    /// Create a published assignment.
    pub fn create_assignment_named(
        &self,
        name: impl Into<String>,
        points_possible: impl Into<f64>,
    ) -> Result<AssignmentId> {
        self.create_assignment(&AssignmentSpec::new(name, points_possible))
    }

    /// Post grades and/or comments for `assignment_id`.
    ///
    /// Keys are sent as given (prefixed with the id namespace, if any). With
    /// neither grades nor comments the request is still sent with an empty
    /// form.
    ///
    /// Canvas runs the update as a deferred job. `Ok(())` means the request
    /// was accepted, not that every row was applied: keys that do not match a
    /// student in the course are dropped by Canvas without any error here.
    pub fn grade_assignment(
        &self,
        assignment_id: AssignmentId,
        grades: Option<&GradePayload>,
        comments: Option<&CommentPayload>,
    ) -> Result<()> {
        let url = self.build_url(&format!(
            "/assignments/{}/submissions/update_grades",
            assignment_id
        ));
        let form = self.grade_form(grades, comments);
        self.transport.post_form(&url, &form)?.into_success_body()?;

        info!(
            assignment_id = assignment_id.0,
            grades = grades.map_or(0, |g| g.len()),
            comments = comments.map_or(0, |c| c.len()),
            "Grade update accepted"
        );
        Ok(())
    }

    /// The form [`GradingClient::grade_assignment`] sends for these payloads.
    pub fn grade_form(
        &self,
        grades: Option<&GradePayload>,
        comments: Option<&CommentPayload>,
    ) -> Vec<(String, String)> {
        grade_data_fields(self.id_namespace.as_deref(), grades, comments)
    }
}
