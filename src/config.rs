//! Motion Pipeline Configuration
//!
//! Everything that tunes classification and aggregation lives in one value
//! handed to the pipeline at construction, so several sensors can run with
//! different settings and tests need no hardware:
//! - Activity thresholds (intensity in g)
//! - Aggregation window length
//! - The still time after which the wearer is considered asleep
//! - The accelerometer full-scale range used to scale raw samples

use crate::{accel::AccelFullScale, error::ConfigError};

/// Default intensity at or above which a sample counts as movement.
pub const DEFAULT_MOVE_THRESHOLD: f32 = 0.15;
/// Default intensity at or above which a sample counts as vigorous activity.
pub const DEFAULT_ACTIVE_THRESHOLD: f32 = 0.5;
/// Default aggregation window.
pub const DEFAULT_WINDOW_MS: u64 = 10_000;
/// Default still time, in whole minutes, that must be exceeded to report sleep.
pub const DEFAULT_ASLEEP_AFTER_MINUTES: u64 = 1;

/// Milliseconds per still-duration unit.
pub const MS_PER_MINUTE: u64 = 60_000;

/// The two classification thresholds, `moving < active`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Thresholds {
    /// Lower bound (inclusive) of MOVING
    pub moving: f32,
    /// Lower bound (inclusive) of ACTIVE
    pub active: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            moving: DEFAULT_MOVE_THRESHOLD,
            active: DEFAULT_ACTIVE_THRESHOLD,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct MotionConfig {
    pub thresholds: Thresholds,
    /// Length of one aggregation window
    pub window_ms: u64,
    /// Still duration that must be strictly exceeded for "likely asleep"
    pub asleep_after_minutes: u64,
    /// Range the device is configured for; selects the raw-to-g divisor
    pub full_scale: AccelFullScale,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            window_ms: DEFAULT_WINDOW_MS,
            asleep_after_minutes: DEFAULT_ASLEEP_AFTER_MINUTES,
            full_scale: AccelFullScale::G2,
        }
    }
}

impl MotionConfig {
    pub fn with_thresholds(mut self, moving: f32, active: f32) -> Self {
        self.thresholds = Thresholds { moving, active };
        self
    }

    pub fn with_window_ms(mut self, window_ms: u64) -> Self {
        self.window_ms = window_ms;
        self
    }

    pub fn with_asleep_after_minutes(mut self, minutes: u64) -> Self {
        self.asleep_after_minutes = minutes;
        self
    }

    pub fn with_full_scale(mut self, full_scale: AccelFullScale) -> Self {
        self.full_scale = full_scale;
        self
    }

    /// Check the invariants the classifier and aggregator rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Thresholds { moving, active } = self.thresholds;
        if !moving.is_finite() || !active.is_finite() || moving < 0.0 {
            return Err(ConfigError::InvalidThreshold);
        }
        if moving >= active {
            return Err(ConfigError::ThresholdOrder);
        }
        if self.window_ms == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        Ok(())
    }
}
