//! Catalog Integration Tests
//!
//! Tests for identity lookup, partial edits, filtering, persistence
//! round-trips and memory/disk divergence.

use std::collections::HashMap;

use lesson_catalog::library::StoreError;
use lesson_catalog::{Catalog, Lesson, LessonId, LessonPatch, LibraryError};
use tempfile::TempDir;

fn catalog_in(temp: &TempDir) -> Catalog {
    Catalog::open(temp.path().join("catalog.json"))
}

#[test]
fn test_lookup_succeeds_until_deleted() {
    let temp = TempDir::new().unwrap();
    let mut catalog = catalog_in(&temp);

    let ids: Vec<LessonId> = (0..5)
        .map(|i| {
            catalog
                .add(Lesson::new(format!("Lesson {}", i), "", "Ann", i, "Rust"))
                .unwrap()
        })
        .collect();

    for id in &ids {
        assert!(catalog.find_index(id).is_some());
    }

    catalog.delete(&ids[2]).unwrap();

    assert!(catalog.find_index(&ids[2]).is_none());
    assert!(catalog.get(&ids[2]).is_none());
    for id in ids.iter().filter(|id| *id != &ids[2]) {
        assert!(catalog.find_index(id).is_some());
    }
}

#[test]
fn test_delete_missing_leaves_state_alone() {
    let temp = TempDir::new().unwrap();
    let mut catalog = catalog_in(&temp);
    catalog.add(Lesson::new("Only", "", "Ann", 10, "Rust")).unwrap();
    let before = std::fs::read(catalog.path()).unwrap();

    let err = catalog.delete(&LessonId::from("missing")).unwrap_err();

    assert!(matches!(err, LibraryError::LessonNotFound(_)));
    assert_eq!(catalog.len(), 1);
    assert_eq!(std::fs::read(catalog.path()).unwrap(), before);
}

#[test]
fn test_unchanged_edit_keeps_store_bytes() {
    let temp = TempDir::new().unwrap();
    let mut catalog = catalog_in(&temp);
    let id = catalog
        .add(Lesson::new("Ownership", "Moves and borrows", "Ann", 42, "Rust"))
        .unwrap();
    catalog.add(Lesson::new("Traits", "Bounds", "Bob", 30, "Rust")).unwrap();

    let before = std::fs::read(catalog.path()).unwrap();
    catalog.edit(&id, LessonPatch::new()).unwrap();
    let after = std::fs::read(catalog.path()).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_edit_sets_only_named_fields() {
    let temp = TempDir::new().unwrap();
    let mut catalog = catalog_in(&temp);
    let id = catalog
        .add(Lesson::new("Ownership", "Moves", "Ann", 42, "Rust"))
        .unwrap();

    let patch = LessonPatch::new().description("").duration(0).author("Bob");
    let lesson = catalog.edit(&id, patch).unwrap().clone();

    assert_eq!(lesson.id, id);
    assert_eq!(lesson.title, "Ownership");
    assert_eq!(lesson.description, "");
    assert_eq!(lesson.author, "Bob");
    assert_eq!(lesson.duration, 0);
    assert_eq!(lesson.category, "Rust");

    let reopened = catalog_in(&temp);
    assert_eq!(reopened.get(&id), Some(&lesson));
}

#[test]
fn test_filter_by_category_and_author() {
    let temp = TempDir::new().unwrap();
    let mut catalog = catalog_in(&temp);
    catalog.add(Lesson::new("A", "", "Ann", 1, "Rust")).unwrap();
    catalog.add(Lesson::new("B", "", "bob", 2, "rust")).unwrap();
    catalog.add(Lesson::new("C", "", "Bob", 3, "Go")).unwrap();
    catalog.add(Lesson::new("D", "", "BOB", 4, "RUST")).unwrap();

    let both: Vec<&str> = catalog
        .filter(Some("Rust"), Some("Bob"))
        .into_iter()
        .map(|l| l.title.as_str())
        .collect();
    assert_eq!(both, vec!["B", "D"]);

    let by_category = catalog.filter(Some("RUST"), None);
    assert_eq!(by_category.len(), 3);

    let by_author = catalog.filter(None, Some("bob"));
    assert_eq!(by_author.len(), 3);

    // Exact match only, no substrings
    assert!(catalog.filter(Some("Rus"), None).is_empty());
}

#[test]
fn test_filter_without_predicates_returns_everything_in_order() {
    let temp = TempDir::new().unwrap();
    let mut catalog = catalog_in(&temp);
    for title in ["Zeta", "Alpha", "Mid"] {
        catalog.add(Lesson::new(title, "", "Ann", 1, "Rust")).unwrap();
    }

    let all: Vec<&str> = catalog
        .filter(None, None)
        .into_iter()
        .map(|l| l.title.as_str())
        .collect();
    assert_eq!(all, vec!["Zeta", "Alpha", "Mid"]);
}

#[test]
fn test_persist_then_reload_round_trip() {
    let temp = TempDir::new().unwrap();
    let mut catalog = catalog_in(&temp);
    catalog.add(Lesson::new("Python Basics", "Вступ до Python", "Ярослав", 45, "Програмування")).unwrap();
    catalog.add(Lesson::new("OOP", "Classes", "Oleh", 60, "Programming")).unwrap();
    catalog.add(Lesson::new("Advanced", "Deep dive", "Yulia", 90, "Programming")).unwrap();

    let expected: HashMap<LessonId, Lesson> = catalog
        .lessons()
        .iter()
        .map(|l| (l.id.clone(), l.clone()))
        .collect();

    let reloaded = catalog_in(&temp);
    assert!(reloaded.load_error().is_none());

    let actual: HashMap<LessonId, Lesson> = reloaded
        .lessons()
        .iter()
        .map(|l| (l.id.clone(), l.clone()))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_legacy_record_id_is_kept_across_opens() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"[{"title":"Old","description":"d","author":"a","duration":3,"category":"c"}]"#,
    )
    .unwrap();

    let first = Catalog::open(&path);
    assert_eq!(first.len(), 1);
    assert!(!first.is_dirty());
    let id = first.lessons()[0].id.clone();
    assert!(!id.is_blank());

    let second = Catalog::open(&path);
    assert_eq!(second.find_index(&id), Some(0));
    assert_eq!(second.get(&id).unwrap().title, "Old");
}

#[test]
fn test_duplicate_ids_in_store_are_made_unique() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"[
            {"id":"x","title":"First","description":"","author":"a","duration":1,"category":"c"},
            {"id":"x","title":"Second","description":"","author":"a","duration":2,"category":"c"}
        ]"#,
    )
    .unwrap();

    let mut catalog = Catalog::open(&path);
    let x = LessonId::from("x");
    assert_eq!(catalog.len(), 2);
    assert!(catalog.load_error().is_none());
    assert_eq!(catalog.get(&x).unwrap().title, "First");
    let second = catalog.lessons()[1].id.clone();
    assert_ne!(second, x);

    catalog.delete(&x).unwrap();
    assert!(catalog.find_index(&x).is_none());

    let reopened = Catalog::open(&path);
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.get(&second).unwrap().title, "Second");
}

#[test]
fn test_malformed_store_resets_to_empty() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.json");
    std::fs::write(&path, "[{\"title\": ").unwrap();

    let mut catalog = Catalog::open(&path);

    assert!(catalog.is_empty());
    assert!(matches!(catalog.load_error(), Some(StoreError::Parse { .. })));

    // Still usable; the next write replaces the bad file
    catalog.add(Lesson::new("Fresh", "", "Ann", 5, "Rust")).unwrap();
    let reopened = Catalog::open(&path);
    assert_eq!(reopened.len(), 1);
    assert!(reopened.load_error().is_none());
}

#[test]
fn test_failed_persist_leaves_memory_ahead_of_disk() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut catalog = Catalog::open(blocker.join("catalog.json"));
    let err = catalog
        .add(Lesson::new("Unsaved", "", "Ann", 5, "Rust"))
        .unwrap_err();

    assert!(matches!(err, LibraryError::Persist(StoreError::Write { .. })));
    assert_eq!(catalog.len(), 1);
    assert!(catalog.is_dirty());

    // Retrying against the same location still fails and stays dirty
    assert!(catalog.save().is_err());
    assert!(catalog.is_dirty());
}

#[test]
fn test_successful_save_clears_dirty_flag() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("later");
    std::fs::write(&dir, "in the way").unwrap();

    let mut catalog = Catalog::open(dir.join("catalog.json"));
    assert!(catalog.add(Lesson::new("Pending", "", "Ann", 5, "Rust")).is_err());
    assert!(catalog.is_dirty());

    std::fs::remove_file(&dir).unwrap();
    catalog.save().unwrap();

    assert!(!catalog.is_dirty());
    assert_eq!(Catalog::open(dir.join("catalog.json")).len(), 1);
}
