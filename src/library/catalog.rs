//! The lesson catalog.
//!
//! Owns the ordered lesson list and its JSON backing store. Every mutation
//! rewrites the whole store before returning. If that write fails the change
//! stays applied in memory and the catalog is marked dirty until a later
//! [`Catalog::save`] succeeds.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use super::error::{LibraryError, StoreError};
use super::store::JsonStore;
use crate::domain::{Lesson, LessonId, LessonPatch};
use crate::sort::{SortEngine, SortField, SortStrategy};

/// Outcome of [`Catalog::sort`]
#[derive(Debug, Clone, Copy)]
pub struct SortReport {
    pub field: SortField,
    pub strategy: SortStrategy,
    /// Number of lessons reordered
    pub count: usize,
    /// Time spent sorting (excludes the store rewrite)
    pub elapsed: Duration,
}

/// Persistent, ordered collection of lessons
#[derive(Debug)]
pub struct Catalog {
    store: JsonStore,
    lessons: Vec<Lesson>,
    /// Memory is ahead of disk
    dirty: bool,
    load_error: Option<StoreError>,
}

impl Catalog {
    /// Open the catalog stored at `path`
    ///
    /// A missing file gives an empty catalog. An unreadable or malformed
    /// file also gives an empty catalog; the error is kept and available
    /// from [`Catalog::load_error`].
    ///
    /// Records with a blank or repeated id get a fresh one, and the store is
    /// rewritten at once so the new ids survive the next open. If that write
    /// fails the catalog opens dirty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = JsonStore::new(path);

        let (mut lessons, load_error) = match store.load::<Lesson>() {
            Ok(lessons) => (lessons, None),
            Err(e) => {
                warn!("Catalog reset to empty: {}", e);
                (Vec::new(), Some(e))
            }
        };

        let reassigned = assign_missing_ids(&mut lessons);

        let mut catalog = Self {
            store,
            lessons,
            dirty: false,
            load_error,
        };

        if reassigned > 0 {
            warn!(reassigned, path = %catalog.path().display(), "Assigned fresh ids to stored lessons");
            // save() logs and leaves the catalog dirty on failure
            let _ = catalog.save();
        }

        catalog
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// The error that forced an empty catalog at open, if any
    pub fn load_error(&self) -> Option<&StoreError> {
        self.load_error.as_ref()
    }

    /// True when the last write to disk failed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rewrite the backing store with the current contents
    pub fn save(&mut self) -> Result<(), LibraryError> {
        self.dirty = true;

        if let Err(e) = self.store.save(&self.lessons) {
            warn!(path = %self.path().display(), "Failed to persist catalog: {}", e);
            return Err(e.into());
        }

        self.dirty = false;
        Ok(())
    }

    /// Append a lesson, generating an id if it has none
    pub fn add(&mut self, mut lesson: Lesson) -> Result<LessonId, LibraryError> {
        if lesson.id.is_blank() {
            lesson.id = LessonId::generate();
        } else if self.find_index(&lesson.id).is_some() {
            return Err(LibraryError::DuplicateLesson(lesson.id));
        }

        let id = lesson.id.clone();
        info!(%id, title = %lesson.title, "Adding lesson");
        self.lessons.push(lesson);
        self.save()?;

        Ok(id)
    }

    /// Append several lessons with a single store rewrite
    pub fn extend(&mut self, lessons: impl IntoIterator<Item = Lesson>) -> Result<usize, LibraryError> {
        let mut added = 0;
        for mut lesson in lessons {
            if lesson.id.is_blank() || self.find_index(&lesson.id).is_some() {
                lesson.id = LessonId::generate();
            }
            self.lessons.push(lesson);
            added += 1;
        }

        info!(added, "Added lessons");
        self.save()?;
        Ok(added)
    }

    /// Position of the lesson with `id` in the current order
    pub fn find_index(&self, id: &LessonId) -> Option<usize> {
        self.lessons.iter().position(|l| &l.id == id)
    }

    /// Get a lesson by ID
    pub fn get(&self, id: &LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|l| &l.id == id)
    }

    /// Apply `patch` to the lesson with `id`
    ///
    /// The store is rewritten even when nothing changed.
    pub fn edit(&mut self, id: &LessonId, patch: LessonPatch) -> Result<&Lesson, LibraryError> {
        let index = self
            .find_index(id)
            .ok_or_else(|| LibraryError::LessonNotFound(id.clone()))?;

        let changed = patch.apply(&mut self.lessons[index]);
        info!(%id, changed, "Edited lesson");
        self.save()?;

        Ok(&self.lessons[index])
    }

    /// Remove the first lesson with `id`
    pub fn delete(&mut self, id: &LessonId) -> Result<Lesson, LibraryError> {
        let index = self
            .find_index(id)
            .ok_or_else(|| LibraryError::LessonNotFound(id.clone()))?;

        let removed = self.lessons.remove(index);
        info!(%id, "Deleted lesson");
        self.save()?;

        Ok(removed)
    }

    /// Lessons matching every supplied predicate, in current order
    ///
    /// Predicates are case-insensitive exact matches. `None` or an empty
    /// string skips that predicate.
    pub fn filter(&self, category: Option<&str>, author: Option<&str>) -> Vec<&Lesson> {
        let category = category.filter(|c| !c.is_empty()).map(str::to_lowercase);
        let author = author.filter(|a| !a.is_empty()).map(str::to_lowercase);

        self.lessons
            .iter()
            .filter(|l| {
                category
                    .as_ref()
                    .map_or(true, |c| l.category.to_lowercase() == *c)
            })
            .filter(|l| author.as_ref().map_or(true, |a| l.author.to_lowercase() == *a))
            .collect()
    }

    /// A reordered copy; the catalog itself is untouched
    pub fn sorted(&self, field: SortField, engine: SortEngine) -> Vec<Lesson> {
        engine.sort_lessons(&self.lessons, field)
    }

    /// Reorder the catalog in place and persist the new order
    #[instrument(skip(self), fields(count = self.lessons.len()))]
    pub fn sort(&mut self, field: SortField, engine: SortEngine) -> Result<SortReport, LibraryError> {
        let start = Instant::now();
        self.lessons = engine.sort_lessons(&self.lessons, field);
        let elapsed = start.elapsed();

        debug!(strategy = %engine.strategy, ?elapsed, "Sorted catalog");
        self.save()?;

        Ok(SortReport {
            field,
            strategy: engine.strategy,
            count: self.lessons.len(),
            elapsed,
        })
    }

    /// All lessons in current order
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Get the number of lessons
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

/// Give every lesson with a blank or already-seen id a fresh one
///
/// The first lesson holding an id keeps it. Returns how many were changed.
fn assign_missing_ids(lessons: &mut [Lesson]) -> usize {
    let mut seen = HashSet::new();
    let mut reassigned = 0;

    for lesson in lessons.iter_mut() {
        if lesson.id.is_blank() || seen.contains(&lesson.id) {
            lesson.id = LessonId::generate();
            reassigned += 1;
        }
        seen.insert(lesson.id.clone());
    }

    reassigned
}
