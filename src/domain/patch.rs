//! Partial-field updates for lessons.
//!
//! Every field carries its own [`FieldUpdate`], so "leave alone" and
//! "set to empty" are distinct.

use super::lesson::Lesson;

/// Per-field edit instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Keep the existing value
    Unchanged,

    /// Overwrite with this value
    SetTo(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Unchanged
    }
}

impl<T> FieldUpdate<T> {
    /// Write the new value into `target`, returning whether it differed
    fn apply_to(self, target: &mut T) -> bool
    where
        T: PartialEq,
    {
        match self {
            FieldUpdate::Unchanged => false,
            FieldUpdate::SetTo(value) => {
                let changed = *target != value;
                *target = value;
                changed
            }
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldUpdate::Unchanged)
    }
}

impl FieldUpdate<String> {
    /// Interactive-input policy: blank text means "leave it alone"
    ///
    /// With this policy a field can never be cleared; use
    /// `FieldUpdate::SetTo(String::new())` for that.
    pub fn from_blank_as_unchanged(input: &str) -> Self {
        if input.trim().is_empty() {
            FieldUpdate::Unchanged
        } else {
            FieldUpdate::SetTo(input.to_string())
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => FieldUpdate::SetTo(v),
            None => FieldUpdate::Unchanged,
        }
    }
}

/// A set of field updates applied to one lesson by `Catalog::edit`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonPatch {
    pub title: FieldUpdate<String>,
    pub description: FieldUpdate<String>,
    pub author: FieldUpdate<String>,
    pub duration: FieldUpdate<u32>,
    pub category: FieldUpdate<String>,
}

impl LessonPatch {
    /// A patch that changes nothing
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = FieldUpdate::SetTo(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = FieldUpdate::SetTo(description.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = FieldUpdate::SetTo(author.into());
        self
    }

    pub fn duration(mut self, minutes: u32) -> Self {
        self.duration = FieldUpdate::SetTo(minutes);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = FieldUpdate::SetTo(category.into());
        self
    }

    /// True when every field is `Unchanged`
    pub fn is_empty(&self) -> bool {
        self.title.is_unchanged()
            && self.description.is_unchanged()
            && self.author.is_unchanged()
            && self.duration.is_unchanged()
            && self.category.is_unchanged()
    }

    /// Apply to a lesson; the id is never touched. Returns whether any field changed.
    pub fn apply(self, lesson: &mut Lesson) -> bool {
        let mut changed = false;
        changed |= self.title.apply_to(&mut lesson.title);
        changed |= self.description.apply_to(&mut lesson.description);
        changed |= self.author.apply_to(&mut lesson.author);
        changed |= self.duration.apply_to(&mut lesson.duration);
        changed |= self.category.apply_to(&mut lesson.category);
        changed
    }
}
