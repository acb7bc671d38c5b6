//! Persistent lesson catalog and playlists.
//!
//! # Storage Layout
//!
//! ```text
//! ~/.lessons/
//! ├── catalog.json      # [ {id, title, description, author, duration, category}, ... ]
//! └── playlists.json    # [ {id, name, lessons: [ <lesson record>, ... ]}, ... ]
//! ```
//!
//! Both files are rewritten in full after every mutation.

pub mod catalog;
pub mod error;
pub mod playlist;
pub mod store;

pub use catalog::{Catalog, SortReport};
pub use error::{LibraryError, StoreError};
pub use playlist::{Playlist, PlaylistId, PlaylistManager, SyncSummary};
pub use store::JsonStore;
