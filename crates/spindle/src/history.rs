use crate::color::Color;
use crate::entry::Label;
use std::collections::VecDeque;

/// A settled spin: the winning label and the color its slice had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    label: Label,
    color: Color,
}

impl HistoryEntry {
    pub fn new(label: Label, color: Color) -> Self {
        Self { label, color }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Spin results, newest first. Grows for the whole session.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        self.entries.push_front(entry);
        &self.entries[0]
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
