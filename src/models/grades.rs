use std::collections::BTreeMap;
use std::fmt;

/// Grades to post, keyed by student.
pub type GradePayload = BTreeMap<StudentId, GradeValue>;

/// Text comments to post, keyed by student.
pub type CommentPayload = BTreeMap<StudentId, String>;

/// A student key as the caller knows it: a Canvas user id, an SIS id, a login.
///
/// Integer and string keys are both accepted and turned into their string
/// form here, once. Keys are not checked against the course roster.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StudentId(String);

impl StudentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key Canvas expects inside `grade_data[...]`.
    pub fn compose(&self, namespace: Option<&str>) -> String {
        match namespace {
            Some(ns) => format!("{}:{}", ns, self.0),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for StudentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

macro_rules! student_id_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for StudentId {
            fn from(value: $t) -> Self {
                Self(value.to_string())
            }
        })*
    };
}
student_id_from_int!(u32, u64, i32, i64);

/// A posted grade. Canvas interprets the value against the assignment's
/// grading type, so points, percentages (`"87%"`), letter grades and
/// `"pass"`/`"fail"` are all passed through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum GradeValue {
    Points(f64),
    Text(String),
}

impl fmt::Display for GradeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64's Display already prints 95.0 as "95"
            GradeValue::Points(points) => write!(f, "{}", points),
            GradeValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for GradeValue {
    fn from(value: f64) -> Self {
        GradeValue::Points(value)
    }
}

impl From<f32> for GradeValue {
    fn from(value: f32) -> Self {
        GradeValue::Points(value.into())
    }
}

impl From<i32> for GradeValue {
    fn from(value: i32) -> Self {
        GradeValue::Points(value.into())
    }
}

impl From<u32> for GradeValue {
    fn from(value: u32) -> Self {
        GradeValue::Points(value.into())
    }
}

impl From<&str> for GradeValue {
    fn from(value: &str) -> Self {
        GradeValue::Text(value.to_owned())
    }
}

impl From<String> for GradeValue {
    fn from(value: String) -> Self {
        GradeValue::Text(value)
    }
}

/// Builds the `grade_data` form for one `update_grades` call. Grades come
/// first, then comments, each in key order.
pub fn grade_data_fields(
    namespace: Option<&str>,
    grades: Option<&GradePayload>,
    comments: Option<&CommentPayload>,
) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    for (sid, grade) in grades.into_iter().flatten() {
        fields.push((
            format!("grade_data[{}][posted_grade]", sid.compose(namespace)),
            grade.to_string(),
        ));
    }
    for (sid, comment) in comments.into_iter().flatten() {
        fields.push((
            format!("grade_data[{}][text_comment]", sid.compose(namespace)),
            comment.clone(),
        ));
    }
    fields
}
