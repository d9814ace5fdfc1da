use std::fmt;

use serde::{Deserialize, Serialize};

/// Canvas id of an assignment.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AssignmentId(pub u64);

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AssignmentId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl PartialEq<u64> for AssignmentId {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

/// Parameters for creating an assignment.
#[derive(Clone, Debug, PartialEq)]
pub struct AssignmentSpec {
    pub name: String,
    pub points_possible: f64,
    pub published: bool,
}

impl AssignmentSpec {
    /// A published assignment worth `points_possible`.
    pub fn new(name: impl Into<String>, points_possible: impl Into<f64>) -> Self {
        Self {
            name: name.into(),
            points_possible: points_possible.into(),
            published: true,
        }
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    pub(crate) fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("assignment[name]".to_owned(), self.name.clone()),
            (
                "assignment[points_possible]".to_owned(),
                self.points_possible.to_string(),
            ),
            (
                "assignment[published]".to_owned(),
                self.published.to_string(),
            ),
        ]
    }
}

/// The part of the created-assignment response the client needs.
#[derive(Deserialize, Debug)]
pub struct CreatedAssignment {
    pub id: AssignmentId,
}
