pub mod color;
pub mod entry;
pub mod history;
pub mod macros;
pub mod session;
pub mod spin;
pub mod wheel;

pub use color::{Color, Palette, PaletteError, generate_colors};
pub use entry::{Entry, EntryError, EntryList, Label, Slice};
pub use history::{History, HistoryEntry};
pub use session::{Session, SessionError, SessionOptions};
pub use spin::{Settle, SettingsError, SpinError, SpinHandle, SpinId, SpinSettings};
pub use wheel::WheelState;

/// Degrees in a full turn of the wheel.
pub const FULL_TURN: f64 = 360.0;
