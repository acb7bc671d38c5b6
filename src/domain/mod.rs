//! Domain types for the lesson catalog.
//!
//! - Lesson: the catalog record and its opaque id
//! - LessonPatch: per-field edit instructions

pub mod lesson;
pub mod patch;

// Re-export commonly used types
pub use lesson::{sample_lessons, Lesson, LessonId};
pub use patch::{FieldUpdate, LessonPatch};
