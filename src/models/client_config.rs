use std::fmt;

use secrecy::SecretString;

/// Course identifier as it appears in API paths. Canvas accepts both the
/// numeric id and prefixed forms such as `sis_course_id:ABC123`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseId(String);

impl CourseId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for CourseId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

macro_rules! course_id_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for CourseId {
            fn from(value: $t) -> Self {
                Self(value.to_string())
            }
        })*
    };
}
course_id_from_int!(u32, u64, i32, i64);

/// Connection identity for a [`crate::GradingClient`].
///
/// `host` is the bare Canvas host name (`canvas.example.edu`), without scheme.
/// When `id_namespace` is set, every student key is sent as
/// `namespace:key`, which is how Canvas addresses users by an alternate id
/// such as `sis_user_id`.
///
/// Leaving `api_key` unset makes the client read `~/.canvasgrader`.
#[derive(Clone)]
pub struct ClientConfig {
    pub host: String,
    pub course_id: CourseId,
    pub id_namespace: Option<String>,
    pub api_key: Option<SecretString>,
    pub enable_logs: bool,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, course_id: impl Into<CourseId>) -> Self {
        Self {
            host: host.into(),
            course_id: course_id.into(),
            id_namespace: None,
            api_key: None,
            enable_logs: false,
        }
    }

    pub fn with_id_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.id_namespace = Some(namespace.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<SecretString>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Install the stderr tracing subscriber when the client is built.
    pub fn with_logs(mut self, enable: bool) -> Self {
        self.enable_logs = enable;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("course_id", &self.course_id)
            .field("id_namespace", &self.id_namespace)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("enable_logs", &self.enable_logs)
            .finish()
    }
}
