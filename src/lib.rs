//! lesson-catalog - persistent video lesson catalog
//!
//! Stores lesson records in a JSON file, supports partial edits, filtering
//! and several interchangeable sorting algorithms, and keeps named
//! playlists of lessons in a second JSON file.
//!
//! # Modules
//!
//! - `domain`: Data structures (Lesson, LessonPatch)
//! - `sort`: Sort strategies and natural-order comparison
//! - `library`: Catalog, playlists and their backing stores
//! - `config`: Store locations and defaults
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! lessons add --title "Lesson 1" --author Ann --duration 30 --category Rust
//! lessons sort title --strategy natural
//! lessons playlist create "Evening"
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;
pub mod sort;

// Re-export main types at crate root for convenience
pub use domain::{FieldUpdate, Lesson, LessonId, LessonPatch};
pub use library::{Catalog, LibraryError, Playlist, PlaylistId, PlaylistManager, StoreError};
pub use sort::{SortDirection, SortEngine, SortField, SortStrategy};
