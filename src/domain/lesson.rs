//! The lesson record and its identifier.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque lesson identifier (UUIDv4 string)
///
/// Generated once when a lesson is created and never reassigned. The
/// default value is blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(String);

impl LessonId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no identifier has been assigned yet
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for LessonId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for LessonId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for LessonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single video lesson
///
/// Serialized field order matches the on-disk record:
/// `{id, title, description, author, duration, category}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Unique identifier; blank for records written before ids existed
    /// until the owning store assigns and persists one
    #[serde(default)]
    pub id: LessonId,

    pub title: String,

    pub description: String,

    pub author: String,

    /// Length in minutes
    pub duration: u32,

    pub category: String,
}

impl Lesson {
    /// Create a lesson with a freshly generated id
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        author: impl Into<String>,
        duration: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: LessonId::generate(),
            title: title.into(),
            description: description.into(),
            author: author.into(),
            duration,
            category: category.into(),
        }
    }

    /// Replace the id (used when restoring a known record)
    pub fn with_id(mut self, id: impl Into<LessonId>) -> Self {
        self.id = id.into();
        self
    }
}

impl std::fmt::Display for Lesson {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) by {}, {} min",
            self.title, self.category, self.author, self.duration
        )
    }
}

/// Lessons used to populate an empty catalog
pub fn sample_lessons() -> Vec<Lesson> {
    vec![
        Lesson::new(
            "Python Basics",
            "Introduction to Python",
            "Alice",
            45,
            "Programming",
        ),
        Lesson::new(
            "OOP in Python",
            "Classes and objects",
            "Bob",
            60,
            "Programming",
        ),
        Lesson::new(
            "Advanced Python",
            "A deep dive",
            "Charlie",
            90,
            "Programming",
        ),
    ]
}
