use crate::FULL_TURN;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

impl Label {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("You can't add an empty value")]
    EmptyLabel,
    #[error("'{0}' is already on the wheel")]
    DuplicateLabel(Label),
    #[error("No entry at index {index} (wheel has {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Half-open angular interval `[start, end)` in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub start: f64,
    pub end: f64,
}

impl Slice {
    /// Slice `index` of a wheel cut into `count` equal parts.
    ///
    /// Boundaries are computed as `k * 360 / count`, so neighbouring slices
    /// share the exact same boundary value and the last one ends at 360.
    pub fn of(index: usize, count: usize) -> Self {
        let boundary = |k: usize| k as f64 * FULL_TURN / count as f64;
        Self {
            start: boundary(index),
            end: boundary(index + 1),
        }
    }

    pub fn contains(&self, angle: f64) -> bool {
        self.start <= angle && angle < self.end
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn middle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    label: Label,
    slice_start: f64,
}

impl Entry {
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Start of this entry's slice in degrees, derived from its position.
    pub fn slice_start(&self) -> f64 {
        self.slice_start
    }
}

/// Ordered wheel entries. Slices are always equal-width and follow list
/// order starting at 0 degrees; every mutation re-derives them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryList {
    entries: Vec<Entry>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list in the given order, applying the same label rules as
    /// interactive insertion.
    pub fn from_labels(labels: impl IntoIterator<Item = Label>) -> Result<Self, EntryError> {
        let mut list = Self::new();
        for label in labels {
            list.check_label(&label, None)?;
            list.entries.push(Entry {
                label,
                slice_start: 0.0,
            });
        }
        list.reassign_slices();
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.entries.iter().map(Entry::label)
    }

    pub fn slice(&self, index: usize) -> Option<Slice> {
        (index < self.len()).then(|| Slice::of(index, self.len()))
    }

    pub fn slices(&self) -> impl Iterator<Item = Slice> + '_ {
        (0..self.len()).map(|i| Slice::of(i, self.len()))
    }

    /// Checks `label` against the empty and duplicate rules. `except` names
    /// an index whose current label may be matched (renaming in place).
    pub fn check_label(&self, label: &Label, except: Option<usize>) -> Result<(), EntryError> {
        if label.is_empty() {
            return Err(EntryError::EmptyLabel);
        }
        let duplicate = self
            .entries
            .iter()
            .enumerate()
            .any(|(i, e)| Some(i) != except && e.label == *label);
        if duplicate {
            return Err(EntryError::DuplicateLabel(label.clone()));
        }
        Ok(())
    }

    /// Inserts at the head of the list; the new entry's slice starts at 0.
    pub fn insert_front(&mut self, label: Label) -> Result<&Entry, EntryError> {
        self.check_label(&label, None)?;
        self.entries.insert(
            0,
            Entry {
                label,
                slice_start: 0.0,
            },
        );
        self.reassign_slices();
        Ok(&self.entries[0])
    }

    pub fn remove(&mut self, index: usize) -> Result<Entry, EntryError> {
        self.ensure_index(index)?;
        let removed = self.entries.remove(index);
        self.reassign_slices();
        Ok(removed)
    }

    pub fn rename(&mut self, index: usize, label: Label) -> Result<(), EntryError> {
        self.ensure_index(index)?;
        self.check_label(&label, Some(index))?;
        self.entries[index].label = label;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn ensure_index(&self, index: usize) -> Result<(), EntryError> {
        if index < self.len() {
            Ok(())
        } else {
            Err(EntryError::OutOfRange {
                index,
                len: self.len(),
            })
        }
    }

    fn reassign_slices(&mut self) {
        let count = self.len();
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.slice_start = Slice::of(i, count).start;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(labels: &[&str]) -> EntryList {
        EntryList::from_labels(labels.iter().map(|l| Label::new(*l))).unwrap()
    }

    #[test]
    fn test_slices_partition_the_full_turn() {
        for count in 1..=48 {
            let labels: Vec<_> = (0..count).map(|i| Label::new(format!("Option {i}"))).collect();
            let entries = EntryList::from_labels(labels).unwrap();
            let slices: Vec<_> = entries.slices().collect();

            assert_eq!(slices.len(), count);
            assert_eq!(slices[0].start, 0.0);
            assert_eq!(slices[count - 1].end, FULL_TURN);
            for pair in slices.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
            for (entry, slice) in entries.iter().zip(&slices) {
                assert_eq!(entry.slice_start(), slice.start);
                assert!((slice.width() - FULL_TURN / count as f64).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_slices_are_half_open() {
        let slice = Slice::of(1, 3);
        assert!(slice.contains(120.0));
        assert!(slice.contains(239.999));
        assert!(!slice.contains(240.0));
        assert_eq!(slice.middle(), 180.0);
    }

    #[test]
    fn test_insert_lands_at_front_and_shifts_others() {
        let mut entries = list(&["A", "B"]);
        let inserted = entries.insert_front(Label::new("X")).unwrap();
        assert_eq!(inserted.label().as_str(), "X");
        assert_eq!(inserted.slice_start(), 0.0);

        // old index k moves to (360 / (N + 1)) * (k + 1)
        assert_eq!(entries.get(1).unwrap().label().as_str(), "A");
        assert_eq!(entries.get(1).unwrap().slice_start(), 120.0);
        assert_eq!(entries.get(2).unwrap().label().as_str(), "B");
        assert_eq!(entries.get(2).unwrap().slice_start(), 240.0);
    }

    #[test]
    fn test_remove_rederives_slices() {
        let mut entries = list(&["A", "B", "C", "D"]);
        let removed = entries.remove(1).unwrap();
        assert_eq!(removed.label().as_str(), "B");

        let starts: Vec<_> = entries.iter().map(Entry::slice_start).collect();
        assert_eq!(starts, vec![0.0, 120.0, 240.0]);

        assert_eq!(
            entries.remove(3),
            Err(EntryError::OutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_empty_and_duplicate_labels_are_rejected() {
        let mut entries = list(&["A", "B"]);
        assert_eq!(
            entries.insert_front(Label::new("")),
            Err(EntryError::EmptyLabel)
        );
        assert_eq!(
            entries.insert_front(Label::new("B")),
            Err(EntryError::DuplicateLabel(Label::new("B")))
        );
        // case differs, so not an exact duplicate
        assert!(entries.insert_front(Label::new("b")).is_ok());
        assert_eq!(entries.len(), 3);

        assert!(EntryList::from_labels([Label::new("A"), Label::new("A")]).is_err());
    }

    #[test]
    fn test_whitespace_label_is_kept_as_typed() {
        let mut entries = list(&["A"]);
        let inserted = entries.insert_front(Label::new("  ")).unwrap();
        assert_eq!(inserted.label().as_str(), "  ");
        assert_eq!(entries.len(), 2);
        // a second one is an exact duplicate
        assert_eq!(
            entries.insert_front(Label::new("  ")),
            Err(EntryError::DuplicateLabel(Label::new("  ")))
        );
    }

    #[test]
    fn test_rename_keeps_position_and_checks_duplicates() {
        let mut entries = list(&["A", "B", "C"]);
        entries.rename(1, Label::new("B")).unwrap();
        entries.rename(1, Label::new("Beta")).unwrap();
        assert_eq!(entries.get(1).unwrap().label().as_str(), "Beta");
        assert_eq!(entries.get(1).unwrap().slice_start(), 120.0);

        assert_eq!(
            entries.rename(0, Label::new("C")),
            Err(EntryError::DuplicateLabel(Label::new("C")))
        );
        assert_eq!(entries.rename(2, Label::new("")), Err(EntryError::EmptyLabel));
        assert!(matches!(
            entries.rename(7, Label::new("Z")),
            Err(EntryError::OutOfRange { index: 7, .. })
        ));
    }

    #[test]
    fn test_clear() {
        let mut entries = list(&["A", "B"]);
        entries.clear();
        assert!(entries.is_empty());
        assert_eq!(entries.slice(0), None);
        assert_eq!(entries.slices().count(), 0);
    }
}
