use derive_more::{Display, From, Into};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, DurationMilliSeconds, serde_as};
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

/// How the end of a spin is detected.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Settle {
    /// Completes on the animation's final rendered frame.
    #[default]
    #[strum(to_string = "transition", serialize = "event")]
    Transition,
    /// Completes after a fixed timeout equal to the spin duration. The timer
    /// is not tied to rendering, so a late frame can still be in flight when
    /// the result is recorded.
    #[strum(to_string = "timer", serialize = "timeout")]
    Timer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into)]
#[display("#{_0}")]
pub struct SpinId(u64);

/// Token for the one spin in flight. Only the handle returned by
/// `Session::request_spin` can complete it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinHandle {
    pub id: SpinId,
    /// Cumulative rotation before the spin, in degrees.
    pub from: f64,
    /// Cumulative rotation the wheel comes to rest at, in degrees.
    pub to: f64,
    pub duration: Duration,
    pub settle: Settle,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpinError {
    #[error("The wheel is already spinning")]
    AlreadySpinning,
    #[error("There is nothing on the wheel to spin")]
    NoEntries,
    #[error("No spin is in progress")]
    NotSpinning,
    #[error("Spin {got} does not match the pending spin {expected}")]
    StaleHandle { expected: SpinId, got: SpinId },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("Spin range {min}..{max} must be finite, positive and ordered")]
    InvalidRange { min: f64, max: f64 },
    #[error("Spin duration must be greater than zero")]
    ZeroDuration,
}

#[serde_as]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct SpinSettingsRepr {
    min_degrees: f64,
    max_degrees: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    duration_ms: Duration,
    settle: Settle,
}

impl Default for SpinSettingsRepr {
    fn default() -> Self {
        SpinSettings::default().into()
    }
}

/// Range of the random rotation added per spin and how long it animates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SpinSettingsRepr", into = "SpinSettingsRepr")]
pub struct SpinSettings {
    min_degrees: f64,
    max_degrees: f64,
    duration: Duration,
    settle: Settle,
}

impl SpinSettings {
    pub const DEFAULT_MIN_DEGREES: f64 = 720.0;
    pub const DEFAULT_MAX_DEGREES: f64 = 1080.0;
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

    pub fn new(
        min_degrees: f64,
        max_degrees: f64,
        duration: Duration,
        settle: Settle,
    ) -> Result<Self, SettingsError> {
        let valid_range = min_degrees.is_finite()
            && max_degrees.is_finite()
            && min_degrees > 0.0
            && min_degrees <= max_degrees;
        if !valid_range {
            return Err(SettingsError::InvalidRange {
                min: min_degrees,
                max: max_degrees,
            });
        }
        if duration.is_zero() {
            return Err(SettingsError::ZeroDuration);
        }
        Ok(Self {
            min_degrees,
            max_degrees,
            duration,
            settle,
        })
    }

    pub fn min_degrees(&self) -> f64 {
        self.min_degrees
    }

    pub fn max_degrees(&self) -> f64 {
        self.max_degrees
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn settle(&self) -> Settle {
        self.settle
    }

    /// Uniform rotation delta in `min_degrees..=max_degrees`.
    pub fn draw_delta<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.min_degrees..=self.max_degrees)
    }
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            min_degrees: Self::DEFAULT_MIN_DEGREES,
            max_degrees: Self::DEFAULT_MAX_DEGREES,
            duration: Self::DEFAULT_DURATION,
            settle: Settle::default(),
        }
    }
}

impl TryFrom<SpinSettingsRepr> for SpinSettings {
    type Error = SettingsError;

    fn try_from(repr: SpinSettingsRepr) -> Result<Self, Self::Error> {
        Self::new(
            repr.min_degrees,
            repr.max_degrees,
            repr.duration_ms,
            repr.settle,
        )
    }
}

impl From<SpinSettings> for SpinSettingsRepr {
    fn from(settings: SpinSettings) -> Self {
        Self {
            min_degrees: settings.min_degrees,
            max_degrees: settings.max_degrees,
            duration_ms: settings.duration,
            settle: settings.settle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use strum::IntoEnumIterator;

    #[test]
    fn test_settle_deserialization() {
        let cases = vec![
            ("\"transition\"", Settle::Transition),
            ("\"Transition\"", Settle::Transition),
            ("\"event\"", Settle::Transition),
            ("\"timer\"", Settle::Timer),
            ("\"TIMEOUT\"", Settle::Timer),
        ];

        for (json, expected) in cases {
            let deserialized: Settle = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }

        for settle in Settle::iter() {
            assert_eq!(settle.to_string().parse::<Settle>().unwrap(), settle);
        }
    }

    #[test]
    fn test_settings_deserialization() {
        let settings: SpinSettings = serde_json::from_str(
            r#"{ "min_degrees": 360.0, "max_degrees": 720.0, "duration_ms": 1500, "settle": "timer" }"#,
        )
        .unwrap();
        assert_eq!(settings.min_degrees(), 360.0);
        assert_eq!(settings.max_degrees(), 720.0);
        assert_eq!(settings.duration(), Duration::from_millis(1500));
        assert_eq!(settings.settle(), Settle::Timer);

        let partial: SpinSettings = serde_json::from_str(r#"{ "duration_ms": 3000 }"#).unwrap();
        assert_eq!(partial.min_degrees(), SpinSettings::DEFAULT_MIN_DEGREES);
        assert_eq!(partial.duration(), Duration::from_secs(3));

        assert!(serde_json::from_str::<SpinSettings>(r#"{ "min_degrees": 900.0, "max_degrees": 800.0 }"#).is_err());
        assert!(serde_json::from_str::<SpinSettings>(r#"{ "duration_ms": 0 }"#).is_err());
    }

    #[test]
    fn test_invalid_settings() {
        assert_eq!(
            SpinSettings::new(-1.0, 10.0, Duration::from_secs(1), Settle::Timer),
            Err(SettingsError::InvalidRange { min: -1.0, max: 10.0 })
        );
        assert!(SpinSettings::new(10.0, f64::INFINITY, Duration::from_secs(1), Settle::Timer).is_err());
        assert_eq!(
            SpinSettings::new(10.0, 20.0, Duration::ZERO, Settle::Timer),
            Err(SettingsError::ZeroDuration)
        );
        // a fixed delta is allowed
        assert!(SpinSettings::new(900.0, 900.0, Duration::from_secs(1), Settle::Timer).is_ok());
    }

    #[test]
    fn test_deltas_stay_in_range() {
        let settings = SpinSettings::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let delta = settings.draw_delta(&mut rng);
            assert!((720.0..=1080.0).contains(&delta), "{delta} out of range");
        }
    }
}
