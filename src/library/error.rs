//! Error types for the catalog and playlist stores.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::LessonId;
use crate::library::playlist::PlaylistId;

/// Failures reading or writing a JSON backing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors returned by catalog and playlist operations
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Lesson not found: {0}")]
    LessonNotFound(LessonId),

    #[error("Lesson already exists: {0}")]
    DuplicateLesson(LessonId),

    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// The in-memory change was applied but could not be written out
    #[error("Change applied in memory but not persisted: {0}")]
    Persist(#[from] StoreError),
}

impl LibraryError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LibraryError::LessonNotFound(_) | LibraryError::PlaylistNotFound(_)
        )
    }
}
