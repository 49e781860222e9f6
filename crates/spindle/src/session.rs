use crate::color::{Color, Palette, generate_colors};
use crate::entry::{Entry, EntryError, EntryList, Label};
use crate::history::{History, HistoryEntry};
use crate::spin::{SpinError, SpinHandle, SpinId, SpinSettings};
use crate::wheel::{self, WheelState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub const DEFAULT_ENTRY_COUNT: usize = 6;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Entry(#[from] EntryError),
    #[error("Entries can't change while the wheel is spinning")]
    Spinning,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub palette: Palette,
    pub spin: SpinSettings,
    pub entries: EntryList,
}

impl SessionOptions {
    /// `Option 1` through `Option 6`.
    pub fn default_labels() -> Vec<Label> {
        (1..=DEFAULT_ENTRY_COUNT)
            .map(|i| Label::new(format!("Option {i}")))
            .collect()
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            spin: SpinSettings::default(),
            entries: EntryList::from_labels(Self::default_labels()).unwrap_or_default(),
        }
    }
}

/// Everything one wheel needs for a session: entries and their colors,
/// rotation, history and the random source for spins.
///
/// All mutation goes through the methods here. Entry edits are refused
/// while a spin is pending, and colors are regenerated in the same call
/// that changes the entry count, so `colors().len() == entries().len()`
/// always holds.
pub struct Session<R = StdRng> {
    entries: EntryList,
    colors: Vec<Color>,
    palette: Palette,
    spin_settings: SpinSettings,
    wheel: WheelState,
    history: History,
    pending: Option<SpinId>,
    next_spin: u64,
    rng: R,
}

impl Session<StdRng> {
    pub fn new(options: SessionOptions) -> Self {
        Self::with_rng(options, StdRng::from_os_rng())
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(options: SessionOptions, rng: R) -> Self {
        let colors = generate_colors(&options.palette, options.entries.len());
        Self {
            entries: options.entries,
            colors,
            palette: options.palette,
            spin_settings: options.spin,
            wheel: WheelState::default(),
            history: History::new(),
            pending: None,
            next_spin: 0,
            rng,
        }
    }

    pub fn entries(&self) -> &EntryList {
        &self.entries
    }

    /// Slice colors, index-aligned with `entries()`.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn spin_settings(&self) -> &SpinSettings {
        &self.spin_settings
    }

    pub fn wheel(&self) -> &WheelState {
        &self.wheel
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_spinning(&self) -> bool {
        self.wheel.is_spinning()
    }

    pub fn can_spin(&self) -> bool {
        !self.is_spinning() && !self.entries.is_empty()
    }

    pub fn entry_color(&self, index: usize) -> Option<(&Entry, Color)> {
        self.entries.get(index).zip(self.colors.get(index).copied())
    }

    pub fn add_entry(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let label = Label::new(text);
        log::debug!("Adding entry '{}'", label);
        self.entries.insert_front(label)?;
        self.regenerate_colors();
        Ok(())
    }

    pub fn remove_entry(&mut self, index: usize) -> Result<Entry, SessionError> {
        self.ensure_idle()?;
        let removed = self.entries.remove(index)?;
        log::debug!("Removed entry '{}' at {}", removed.label(), index);
        self.regenerate_colors();
        Ok(removed)
    }

    pub fn rename_entry(&mut self, index: usize, text: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let label = Label::new(text);
        log::debug!("Renaming entry {} to '{}'", index, label);
        self.entries.rename(index, label)?;
        Ok(())
    }

    pub fn clear_entries(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        log::debug!("Clearing {} entries", self.entries.len());
        self.entries.clear();
        self.regenerate_colors();
        Ok(())
    }

    /// Replaces the palette and repaints the current entries from it.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
        self.regenerate_colors();
    }

    /// Applies to spins requested from now on.
    pub fn set_spin_settings(&mut self, settings: SpinSettings) {
        self.spin_settings = settings;
    }

    /// Starts a spin with a random rotation from the configured range.
    ///
    /// A rejected request leaves the rotation untouched and issues no
    /// handle, so a spin can never be completed twice.
    pub fn request_spin(&mut self) -> Result<SpinHandle, SpinError> {
        if self.wheel.is_spinning() {
            return Err(SpinError::AlreadySpinning);
        }
        if self.entries.is_empty() {
            return Err(SpinError::NoEntries);
        }

        let delta = self.spin_settings.draw_delta(&mut self.rng);
        let (from, to) = self.wheel.begin_spin(delta)?;

        let id = SpinId::from(self.next_spin);
        self.next_spin += 1;
        self.pending = Some(id);

        log::debug!("Spin {} requested: {:.1} -> {:.1}", id, from, to);

        Ok(SpinHandle {
            id,
            from,
            to,
            duration: self.spin_settings.duration(),
            settle: self.spin_settings.settle(),
        })
    }

    /// Settles the pending spin and records the entry under the pointer.
    pub fn complete_spin(&mut self, handle: &SpinHandle) -> Result<&HistoryEntry, SpinError> {
        let expected = self.pending.ok_or(SpinError::NotSpinning)?;
        if handle.id != expected {
            return Err(SpinError::StaleHandle {
                expected,
                got: handle.id,
            });
        }

        let normalized = self.wheel.settle()?;
        self.pending = None;

        let index = wheel::resolve(&self.entries, normalized).ok_or(SpinError::NoEntries)?;
        let (entry, color) = self.entry_color(index).ok_or(SpinError::NoEntries)?;
        let result = HistoryEntry::new(entry.label().clone(), color);

        log::info!(
            "Spin {} settled at {:.1} degrees on '{}'",
            handle.id,
            normalized,
            result.label()
        );

        Ok(self.history.record(result))
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.is_spinning() {
            Err(SessionError::Spinning)
        } else {
            Ok(())
        }
    }

    fn regenerate_colors(&mut self) {
        self.colors = generate_colors(&self.palette, self.entries.len());
    }
}
