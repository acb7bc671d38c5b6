//! Playlists and their persistent registry.
//!
//! A playlist stores full copies of the lessons added to it, and those
//! copies are what gets persisted. Editing a lesson in the catalog does not
//! update playlists until [`Playlist::sync_with`] is called.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::catalog::Catalog;
use super::error::{LibraryError, StoreError};
use super::store::JsonStore;
use crate::domain::{Lesson, LessonId};

/// Opaque playlist identifier (UUIDv4 string)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(String);

impl PlaylistId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for PlaylistId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, ordered list of lessons
///
/// The same lesson may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(default)]
    pub id: PlaylistId,

    pub name: String,

    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// Result of [`Playlist::sync_with`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Entries whose snapshot differed from the catalog and was replaced
    pub updated: usize,

    /// Ids with no matching catalog lesson; those entries are left as-is
    pub missing: Vec<LessonId>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            lessons: Vec::new(),
        }
    }

    /// Append a copy of `lesson`
    pub fn add_lesson(&mut self, lesson: Lesson) {
        self.lessons.push(lesson);
    }

    /// Position of the first entry with `id`
    pub fn find_lesson_index(&self, id: &LessonId) -> Option<usize> {
        self.lessons.iter().position(|l| &l.id == id)
    }

    /// Remove the first entry with `id`
    pub fn remove_lesson(&mut self, id: &LessonId) -> Result<Lesson, LibraryError> {
        let index = self
            .find_lesson_index(id)
            .ok_or_else(|| LibraryError::LessonNotFound(id.clone()))?;
        Ok(self.lessons.remove(index))
    }

    /// Get the entry at `index`
    pub fn get(&self, index: usize) -> Option<&Lesson> {
        self.lessons.get(index)
    }

    /// Refresh every snapshot from the live catalog
    pub fn sync_with(&mut self, catalog: &Catalog) -> SyncSummary {
        let mut summary = SyncSummary::default();

        for entry in &mut self.lessons {
            match catalog.get(&entry.id) {
                Some(live) if live != &*entry => {
                    *entry = live.clone();
                    summary.updated += 1;
                }
                Some(_) => {}
                None => {
                    if !summary.missing.contains(&entry.id) {
                        summary.missing.push(entry.id.clone());
                    }
                }
            }
        }

        summary
    }

    /// Number of entries in this playlist
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Check if playlist is empty
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

/// Owner of every playlist, persisted as one JSON array
///
/// Mutations persist immediately, with the same dirty-tracking rules as
/// [`Catalog`].
#[derive(Debug)]
pub struct PlaylistManager {
    store: JsonStore,
    playlists: Vec<Playlist>,
    dirty: bool,
    load_error: Option<StoreError>,
}

impl PlaylistManager {
    /// Open the playlist store at `path`; unreadable data resets to empty
    ///
    /// Playlists with a blank or repeated id, and snapshots with a blank
    /// lesson id, are given fresh ids that are persisted immediately.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = JsonStore::new(path);

        let (mut playlists, load_error) = match store.load::<Playlist>() {
            Ok(playlists) => (playlists, None),
            Err(e) => {
                warn!("Playlists reset to empty: {}", e);
                (Vec::new(), Some(e))
            }
        };

        let reassigned = assign_missing_ids(&mut playlists);

        let mut manager = Self {
            store,
            playlists,
            dirty: false,
            load_error,
        };

        if reassigned > 0 {
            warn!(reassigned, path = %manager.path().display(), "Assigned fresh ids to stored playlists");
            // save() logs and leaves the manager dirty on failure
            let _ = manager.save();
        }

        manager
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// The error that forced an empty registry at open, if any
    pub fn load_error(&self) -> Option<&StoreError> {
        self.load_error.as_ref()
    }

    /// True when the last write to disk failed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rewrite the backing store with the current playlists
    pub fn save(&mut self) -> Result<(), LibraryError> {
        self.dirty = true;

        if let Err(e) = self.store.save(&self.playlists) {
            warn!(path = %self.path().display(), "Failed to persist playlists: {}", e);
            return Err(e.into());
        }

        self.dirty = false;
        Ok(())
    }

    /// Register a playlist
    pub fn add(&mut self, playlist: Playlist) -> Result<PlaylistId, LibraryError> {
        let id = playlist.id.clone();
        info!(%id, name = %playlist.name, "Adding playlist");
        self.playlists.push(playlist);
        self.save()?;
        Ok(id)
    }

    /// Create and register an empty playlist
    pub fn create(&mut self, name: impl Into<String>) -> Result<PlaylistId, LibraryError> {
        self.add(Playlist::new(name))
    }

    /// Look up a playlist by id
    pub fn get(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| &p.id == id)
    }

    /// Remove a playlist by id
    pub fn delete(&mut self, id: &PlaylistId) -> Result<Playlist, LibraryError> {
        let index = self
            .playlists
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| LibraryError::PlaylistNotFound(id.clone()))?;

        let removed = self.playlists.remove(index);
        info!(%id, "Deleted playlist");
        self.save()?;
        Ok(removed)
    }

    /// Run `f` against one playlist, then persist
    fn modify<R>(
        &mut self,
        id: &PlaylistId,
        f: impl FnOnce(&mut Playlist) -> Result<R, LibraryError>,
    ) -> Result<R, LibraryError> {
        let playlist = self
            .playlists
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| LibraryError::PlaylistNotFound(id.clone()))?;

        let result = f(playlist)?;
        self.save()?;
        Ok(result)
    }

    /// Append a lesson snapshot to a playlist
    pub fn add_lesson(&mut self, id: &PlaylistId, lesson: Lesson) -> Result<(), LibraryError> {
        self.modify(id, |p| {
            p.add_lesson(lesson);
            Ok(())
        })
    }

    /// Remove the first entry with `lesson_id` from a playlist
    pub fn remove_lesson(
        &mut self,
        id: &PlaylistId,
        lesson_id: &LessonId,
    ) -> Result<Lesson, LibraryError> {
        self.modify(id, |p| p.remove_lesson(lesson_id))
    }

    pub fn rename(&mut self, id: &PlaylistId, name: impl Into<String>) -> Result<(), LibraryError> {
        let name = name.into();
        self.modify(id, |p| {
            p.name = name;
            Ok(())
        })
    }

    /// Refresh a playlist's snapshots from `catalog` and persist
    pub fn sync(&mut self, id: &PlaylistId, catalog: &Catalog) -> Result<SyncSummary, LibraryError> {
        self.modify(id, |p| Ok(p.sync_with(catalog)))
    }

    /// All playlists in creation order
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}

/// Fill blank or repeated playlist ids and blank snapshot ids
///
/// Repeated lesson ids inside one playlist are legitimate and kept.
fn assign_missing_ids(playlists: &mut [Playlist]) -> usize {
    let mut seen = HashSet::new();
    let mut reassigned = 0;

    for playlist in playlists.iter_mut() {
        if playlist.id.is_blank() || seen.contains(&playlist.id) {
            playlist.id = PlaylistId::generate();
            reassigned += 1;
        }
        seen.insert(playlist.id.clone());

        for lesson in playlist.lessons.iter_mut().filter(|l| l.id.is_blank()) {
            lesson.id = LessonId::generate();
            reassigned += 1;
        }
    }

    reassigned
}
