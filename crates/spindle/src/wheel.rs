use crate::FULL_TURN;
use crate::entry::EntryList;
use crate::spin::SpinError;

/// Rotation of the wheel and whether a spin is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelState {
    rotation: f64,
    spinning: bool,
}

impl WheelState {
    /// Cumulative clockwise rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Adds `delta` to the rotation and marks the wheel as spinning.
    /// Returns the rotation before and after.
    pub fn begin_spin(&mut self, delta: f64) -> Result<(f64, f64), SpinError> {
        if self.spinning {
            return Err(SpinError::AlreadySpinning);
        }
        let from = self.rotation;
        self.rotation += delta;
        self.spinning = true;
        Ok((from, self.rotation))
    }

    /// Ends the spin and folds the rotation back into `[0, 360)`.
    pub fn settle(&mut self) -> Result<f64, SpinError> {
        if !self.spinning {
            return Err(SpinError::NotSpinning);
        }
        self.spinning = false;
        self.rotation = normalize(self.rotation);
        Ok(self.rotation)
    }
}

pub fn normalize(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(FULL_TURN);
    assert!(
        (0.0..FULL_TURN).contains(&normalized),
        "rotation {degrees} normalized outside [0, 360): {normalized}"
    );
    normalized
}

/// Wheel-local angle under the pointer once the wheel has turned by
/// `normalized` degrees. The pointer sits at angle 0, so the query angle is
/// turned the opposite way.
pub fn pointer_angle(normalized: f64) -> f64 {
    (FULL_TURN - normalized) % FULL_TURN
}

/// Index of the entry whose slice is under the pointer.
pub fn resolve(entries: &EntryList, normalized: f64) -> Option<usize> {
    let pointer = pointer_angle(normalized);
    entries.slices().position(|slice| slice.contains(pointer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Label;

    fn entries(count: usize) -> EntryList {
        EntryList::from_labels((0..count).map(|i| Label::new(format!("{i}")))).unwrap()
    }

    #[test]
    fn test_pointer_lands_on_opposite_slice() {
        let abc = EntryList::from_labels(["A", "B", "C"].map(Label::new)).unwrap();
        assert_eq!(pointer_angle(30.0), 330.0);
        assert_eq!(resolve(&abc, 30.0), Some(2));
        assert_eq!(resolve(&abc, 0.0), Some(0));
        assert_eq!(resolve(&abc, 120.0), Some(2));
        assert_eq!(resolve(&abc, 240.0), Some(1));
        assert_eq!(resolve(&abc, 239.0), Some(1));
        assert_eq!(resolve(&abc, 241.0), Some(0));
        assert_eq!(resolve(&abc, 359.5), Some(0));
    }

    #[test]
    fn test_every_angle_has_exactly_one_winner() {
        for count in 1..=24 {
            let entries = entries(count);
            let mut angle = 0.0;
            while angle < FULL_TURN {
                let pointer = pointer_angle(angle);
                let hits = entries.slices().filter(|s| s.contains(pointer)).count();
                assert_eq!(hits, 1, "{count} entries, angle {angle}");
                assert!(resolve(&entries, angle).is_some());
                angle += 0.25;
            }
            // exact boundaries
            for k in 0..count {
                let boundary = k as f64 * FULL_TURN / count as f64;
                assert!(resolve(&entries, boundary).is_some(), "{count} entries, boundary {boundary}");
            }
        }
    }

    #[test]
    fn test_empty_wheel_has_no_winner() {
        assert_eq!(resolve(&EntryList::new(), 42.0), None);
    }

    #[test]
    fn test_spin_lifecycle() {
        let mut wheel = WheelState::default();
        assert_eq!(wheel.begin_spin(1000.0), Ok((0.0, 1000.0)));
        assert!(wheel.is_spinning());

        assert_eq!(wheel.begin_spin(5.0), Err(SpinError::AlreadySpinning));
        assert_eq!(wheel.rotation(), 1000.0);

        assert_eq!(wheel.settle(), Ok(280.0));
        assert!(!wheel.is_spinning());
        assert_eq!(wheel.settle(), Err(SpinError::NotSpinning));

        assert_eq!(wheel.begin_spin(800.0), Ok((280.0, 1080.0)));
        assert_eq!(wheel.settle(), Ok(0.0));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(0.0), 0.0);
        assert_eq!(normalize(360.0), 0.0);
        assert_eq!(normalize(725.5), 5.5);
    }
}
