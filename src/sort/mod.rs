//! Sorting strategies for lesson sequences.
//!
//! The engine is stateless: it takes a slice plus a key-extraction function
//! and returns a newly ordered `Vec`. It never touches storage.
//!
//! Descending order inverts the comparator before sorting rather than
//! reversing an ascending result, so stable strategies keep tied entries in
//! their input order in both directions.

pub mod algorithms;
pub mod natural;

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Lesson;

pub use natural::{natural_cmp, NaturalKey};

/// Algorithm used to reorder a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStrategy {
    /// Selection sort (not stable)
    Selection,

    /// Insertion sort (stable)
    Insertion,

    /// Three-way partition quicksort with a middle pivot
    Quick,

    /// Library stable sort with natural-order text keys
    Natural,

    /// Library stable sort (`slice::sort_by`)
    #[default]
    Standard,
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortStrategy::Selection => "selection",
            SortStrategy::Insertion => "insertion",
            SortStrategy::Quick => "quick",
            SortStrategy::Natural => "natural",
            SortStrategy::Standard => "standard",
        };
        write!(f, "{}", name)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Orient an ascending comparison result
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Lesson attribute to sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    Author,
    Category,
    Duration,
}

/// Comparable value extracted from a lesson
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    /// Duration in minutes
    Minutes(u32),

    /// Case-folded text
    Text(String),

    /// Text compared in natural order
    Natural(NaturalKey),
}

impl SortField {
    /// Extract the sort key for `lesson`
    ///
    /// Text fields are case-folded, or wrapped for natural-order comparison
    /// when `natural` is set. Duration is always numeric.
    pub fn key(self, lesson: &Lesson, natural: bool) -> SortKey {
        let text = match self {
            SortField::Duration => return SortKey::Minutes(lesson.duration),
            SortField::Title => &lesson.title,
            SortField::Author => &lesson.author,
            SortField::Category => &lesson.category,
        };

        if natural {
            SortKey::Natural(NaturalKey(text.clone()))
        } else {
            SortKey::Text(text.to_lowercase())
        }
    }
}

/// A strategy plus a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortEngine {
    #[serde(default)]
    pub strategy: SortStrategy,

    #[serde(default)]
    pub direction: SortDirection,
}

impl SortEngine {
    pub fn new(strategy: SortStrategy, direction: SortDirection) -> Self {
        Self {
            strategy,
            direction,
        }
    }

    /// Return `items` reordered by the key produced by `key`
    ///
    /// Keys are extracted once per element.
    pub fn sort_by_key<T, K, F>(&self, items: &[T], key: F) -> Vec<T>
    where
        T: Clone,
        K: Ord,
        F: Fn(&T) -> K,
    {
        let direction = self.direction;
        let cmp = |a: &(K, T), b: &(K, T)| direction.apply(a.0.cmp(&b.0));

        let mut keyed: Vec<(K, T)> = items.iter().map(|item| (key(item), item.clone())).collect();

        match self.strategy {
            SortStrategy::Selection => algorithms::selection_sort(&mut keyed, cmp),
            SortStrategy::Insertion => algorithms::insertion_sort(&mut keyed, cmp),
            SortStrategy::Quick => keyed = algorithms::quick_sort(keyed, &cmp),
            SortStrategy::Natural | SortStrategy::Standard => keyed.sort_by(cmp),
        }

        keyed.into_iter().map(|(_, item)| item).collect()
    }

    /// Return `lessons` reordered by `field`
    pub fn sort_lessons(&self, lessons: &[Lesson], field: SortField) -> Vec<Lesson> {
        let natural = self.strategy == SortStrategy::Natural;
        self.sort_by_key(lessons, |lesson| field.key(lesson, natural))
    }
}
