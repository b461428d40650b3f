//! Activity classification.
//!
//! The classifier is a pure threshold function of the current intensity.
//! It keeps no history: no hysteresis, no debounce. Anything time-dependent
//! (last activity, still duration) is tracked by
//! [`MotionTracker`](crate::tracker::MotionTracker).

use core::fmt::{Display, Formatter};

use crate::config::Thresholds;

/// Gravity at rest, in g.
pub const REST_GRAVITY: f32 = 1.0;

/// Activity derived from a single sample.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum ActivityState {
    /// Intensity below the moving threshold
    #[default]
    Still,
    /// Intensity in `[moving, active)`
    Moving,
    /// Intensity at or above the active threshold
    Active,
}

impl ActivityState {
    /// Classify an intensity. Both bounds are inclusive-below, so an
    /// intensity equal to a threshold falls into the higher state.
    pub fn classify(intensity: f32, thresholds: &Thresholds) -> Self {
        if intensity < thresholds.moving {
            Self::Still
        } else if intensity < thresholds.active {
            Self::Moving
        } else {
            Self::Active
        }
    }

    pub fn is_still(self) -> bool {
        self == Self::Still
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Still => "STILL",
            Self::Moving => "MOVING",
            Self::Active => "ACTIVE",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Still => "Still/Resting",
            Self::Moving => "Light movement",
            Self::Active => "Active movement",
        }
    }
}

impl Display for ActivityState {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.pad(self.label())
    }
}

/// Absolute deviation of an acceleration magnitude from rest gravity.
pub fn intensity(magnitude: f32) -> f32 {
    libm::fabsf(magnitude - REST_GRAVITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(intensity: f32) -> ActivityState {
        ActivityState::classify(intensity, &Thresholds::default())
    }

    #[test]
    fn intensity_is_absolute_deviation() {
        assert_eq!(intensity(1.0), 0.0);
        assert_eq!(intensity(1.5), 0.5);
        assert_eq!(intensity(0.25), 0.75);
        assert_eq!(intensity(0.0), 1.0);
    }

    #[test]
    fn boundaries_are_half_open() {
        assert_eq!(classify(0.0), ActivityState::Still);
        assert_eq!(classify(0.149), ActivityState::Still);
        assert_eq!(classify(0.15), ActivityState::Moving);
        assert_eq!(classify(0.499), ActivityState::Moving);
        assert_eq!(classify(0.5), ActivityState::Active);
        assert_eq!(classify(3.0), ActivityState::Active);
    }

    #[test]
    fn custom_thresholds_are_honoured() {
        let thresholds = Thresholds {
            moving: 0.05,
            active: 0.1,
        };
        assert_eq!(ActivityState::classify(0.07, &thresholds), ActivityState::Moving);
        assert_eq!(ActivityState::classify(0.1, &thresholds), ActivityState::Active);
    }

    #[test]
    fn classification_has_no_memory() {
        // Same intensity yields the same state regardless of what came before.
        let after_active = {
            let _ = classify(2.0);
            classify(0.1)
        };
        assert_eq!(after_active, classify(0.1));
    }

    #[test]
    fn display_pads_label() {
        assert_eq!(format!("{:<7}|", ActivityState::Still), "STILL  |");
        assert_eq!(ActivityState::Moving.description(), "Light movement");
    }
}
