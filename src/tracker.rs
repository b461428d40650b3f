//! Motion tracking and windowed aggregation.
//!
//! [`MotionTracker`] is the only stateful part of the pipeline. Per sample the
//! caller must invoke, in this order:
//! 1. [`MotionTracker::classify`] - threshold classification, movement counting
//! 2. [`MotionTracker::tick`] - accumulate the sample into the current window
//! 3. [`MotionTracker::window_elapsed`] - and on `true`, [`MotionTracker::summarize`]
//!
//! The tracker is plain data with `&mut self` mutation; share it between
//! contexts only behind a lock that serializes whole poll cycles.

use core::fmt::{Display, Formatter};

use crate::{
    accel::AxisSample,
    config::{MotionConfig, MS_PER_MINUTE},
    error::ConfigError,
    motion::ActivityState,
};

/// Statistics of one elapsed aggregation window.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct WindowSummary {
    /// Non-still samples seen during the window
    pub movements: u32,
    /// Mean intensity over the window's samples
    pub average_intensity: f32,
    /// Whole minutes since the last non-still sample, 0 while moving
    pub still_minutes: u64,
    /// `still_minutes` exceeds the configured sleep threshold
    pub likely_asleep: bool,
    /// Activity of the most recent sample
    pub state: ActivityState,
}

impl Display for WindowSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if self.likely_asleep {
            writeln!(f, "Status: Likely sleeping")?;
            writeln!(f, "Still for: {} minutes", self.still_minutes)?;
        } else {
            writeln!(f, "Status: Awake/Active")?;
            writeln!(f, "Recent movements: {} per window", self.movements)?;
        }
        write!(f, "Current activity: {}", self.state.description())
    }
}

#[derive(Clone, Debug)]
pub struct MotionTracker {
    config: MotionConfig,
    state: ActivityState,
    intensity: f32,
    movements: u32,
    intensity_sum: f32,
    samples: u32,
    last_activity_ms: u64,
    last_sample_ms: u64,
    last_window_reset_ms: u64,
}

impl MotionTracker {
    /// Start a tracking session at `now_ms`. The window timer and the
    /// last-activity timestamp both start there.
    ///
    /// Fails if `config` does not pass [`MotionConfig::validate`].
    pub fn new(config: MotionConfig, now_ms: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::session(config, now_ms))
    }

    fn session(config: MotionConfig, now_ms: u64) -> Self {
        Self {
            config,
            state: ActivityState::Still,
            intensity: 0.0,
            movements: 0,
            intensity_sum: 0.0,
            samples: 0,
            last_activity_ms: now_ms,
            last_sample_ms: now_ms,
            last_window_reset_ms: now_ms,
        }
    }

    /// Discard all session state and start over at `now_ms`.
    pub fn restart(&mut self, now_ms: u64) {
        *self = Self::session(self.config, now_ms);
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Classify `sample` and record it as the latest observation.
    ///
    /// A non-still result counts one movement and moves the last-activity
    /// timestamp to `now_ms`.
    pub fn classify(&mut self, sample: &AxisSample, now_ms: u64) -> ActivityState {
        self.intensity = sample.intensity();
        self.state = ActivityState::classify(self.intensity, &self.config.thresholds);
        self.last_sample_ms = now_ms;

        if !self.state.is_still() {
            self.movements = self.movements.saturating_add(1);
            self.last_activity_ms = now_ms;
        }

        log::trace!(
            "classified intensity {} as {} (movements {})",
            self.intensity,
            self.state,
            self.movements
        );
        self.state
    }

    /// Add `sample` to the current window. Call once per sample, after
    /// [`classify`](Self::classify).
    pub fn tick(&mut self, sample: &AxisSample) {
        self.samples = self.samples.saturating_add(1);
        self.intensity_sum += sample.intensity();
    }

    /// Returns `true` once per elapsed window and restarts the window timer
    /// at `now_ms` when it does. A `true` result must be followed by
    /// [`summarize`](Self::summarize).
    pub fn window_elapsed(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_window_reset_ms) >= self.config.window_ms {
            self.last_window_reset_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Snapshot the current window and reset its counters.
    pub fn summarize(&mut self) -> WindowSummary {
        let average_intensity = if self.samples > 0 {
            self.intensity_sum / self.samples as f32
        } else {
            self.intensity
        };

        let summary = WindowSummary {
            movements: self.movements,
            average_intensity,
            still_minutes: self.still_minutes(),
            likely_asleep: self.likely_asleep(),
            state: self.state,
        };

        self.movements = 0;
        self.intensity_sum = 0.0;
        self.samples = 0;

        log::debug!(
            "window closed: {} movements, average intensity {}, still {} min",
            summary.movements,
            summary.average_intensity,
            summary.still_minutes
        );
        summary
    }

    /// Whole minutes between the last non-still sample and the latest
    /// sample. Always 0 unless the latest sample was still.
    pub fn still_minutes(&self) -> u64 {
        if self.state.is_still() {
            self.last_sample_ms.saturating_sub(self.last_activity_ms) / MS_PER_MINUTE
        } else {
            0
        }
    }

    pub fn likely_asleep(&self) -> bool {
        self.still_minutes() > self.config.asleep_after_minutes
    }

    pub fn state(&self) -> ActivityState {
        self.state
    }

    /// Intensity of the latest classified sample.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Movements counted in the current window.
    pub fn movements(&self) -> u32 {
        self.movements
    }

    /// Samples accumulated in the current window.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn last_activity_ms(&self) -> u64 {
        self.last_activity_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accel::{Accel, AccelFullScale};

    fn sample(x: i16, y: i16, z: i16) -> AxisSample {
        Accel::new(x, y, z).scaled(AccelFullScale::G2)
    }

    fn level() -> AxisSample {
        sample(0, 0, 16384)
    }

    fn vigorous() -> AxisSample {
        sample(32767, 0, 16384)
    }

    fn observe(tracker: &mut MotionTracker, sample: &AxisSample, now_ms: u64) -> ActivityState {
        let state = tracker.classify(sample, now_ms);
        tracker.tick(sample);
        state
    }

    #[test]
    fn end_to_end_classification() {
        let mut tracker = MotionTracker::new(MotionConfig::default(), 0).unwrap();

        assert_eq!(tracker.classify(&level(), 0), ActivityState::Still);
        assert_eq!(tracker.intensity(), 0.0);

        assert_eq!(tracker.classify(&sample(8192, 0, 16384), 10), ActivityState::Still);
        assert!((tracker.intensity() - 0.118).abs() < 1e-3);

        assert_eq!(tracker.classify(&sample(16384, 0, 16384), 20), ActivityState::Moving);
        assert!((tracker.intensity() - 0.414).abs() < 1e-3);

        assert_eq!(tracker.classify(&vigorous(), 30), ActivityState::Active);
        assert!(tracker.intensity() >= 0.5);

        assert_eq!(tracker.movements(), 2);
        assert_eq!(tracker.last_activity_ms(), 30);
    }

    #[test]
    fn still_duration_and_sleep() {
        let mut tracker = MotionTracker::new(MotionConfig::default(), 0).unwrap();
        assert_eq!(observe(&mut tracker, &vigorous(), 0), ActivityState::Active);
        assert_eq!(tracker.still_minutes(), 0);

        for now in [30_000, 60_000, 90_000] {
            observe(&mut tracker, &level(), now);
        }
        assert_eq!(tracker.still_minutes(), 1);
        assert!(!tracker.likely_asleep());

        observe(&mut tracker, &level(), 130_000);
        assert_eq!(tracker.still_minutes(), 2);
        assert!(tracker.likely_asleep());
    }

    #[test]
    fn still_duration_is_zero_while_moving() {
        let mut tracker = MotionTracker::new(MotionConfig::default(), 0).unwrap();
        observe(&mut tracker, &level(), 300_000);
        assert_eq!(tracker.still_minutes(), 5);

        observe(&mut tracker, &sample(16384, 0, 16384), 310_000);
        assert_eq!(tracker.still_minutes(), 0);
        assert!(!tracker.likely_asleep());
    }

    #[test]
    fn sleep_threshold_is_configurable() {
        let config = MotionConfig::default().with_asleep_after_minutes(3);
        let mut tracker = MotionTracker::new(config, 0).unwrap();
        observe(&mut tracker, &level(), 180_000);
        assert_eq!(tracker.still_minutes(), 3);
        assert!(!tracker.likely_asleep());
        observe(&mut tracker, &level(), 240_000);
        assert!(tracker.likely_asleep());
    }

    #[test]
    fn window_elapsed_fires_once_per_window() {
        let config = MotionConfig::default().with_window_ms(1_000);
        let mut tracker = MotionTracker::new(config, 0).unwrap();
        assert!(!tracker.window_elapsed(999));
        assert!(tracker.window_elapsed(1_000));
        assert!(!tracker.window_elapsed(1_000));
        assert!(!tracker.window_elapsed(1_999));
        assert!(tracker.window_elapsed(2_500));
        assert!(!tracker.window_elapsed(3_000));
    }

    #[test]
    fn summarize_averages_and_resets() {
        let mut tracker = MotionTracker::new(MotionConfig::default(), 0).unwrap();
        observe(&mut tracker, &level(), 0);
        observe(&mut tracker, &sample(0, 0, 20480), 100);
        observe(&mut tracker, &vigorous(), 200);

        let summary = tracker.summarize();
        assert_eq!(summary.movements, 2);
        let expected = (0.0 + 0.25 + vigorous().intensity()) / 3.0;
        assert!((summary.average_intensity - expected).abs() < 1e-6);
        assert_eq!(summary.state, ActivityState::Active);
        assert_eq!(summary.still_minutes, 0);

        assert_eq!(tracker.movements(), 0);
        assert_eq!(tracker.samples(), 0);
    }

    #[test]
    fn next_window_is_not_polluted_by_previous() {
        let mut tracker = MotionTracker::new(MotionConfig::default(), 0).unwrap();
        observe(&mut tracker, &vigorous(), 0);
        observe(&mut tracker, &vigorous(), 10);
        tracker.summarize();

        let single = sample(16384, 0, 16384);
        observe(&mut tracker, &single, 20);
        let summary = tracker.summarize();
        assert_eq!(summary.average_intensity, single.intensity());
        assert_eq!(summary.movements, 1);
    }

    #[test]
    fn empty_window_reports_last_intensity() {
        let mut tracker = MotionTracker::new(MotionConfig::default(), 0).unwrap();
        let moving = sample(16384, 0, 16384);
        observe(&mut tracker, &moving, 0);
        tracker.summarize();

        let summary = tracker.summarize();
        assert_eq!(summary.average_intensity, moving.intensity());
        assert_eq!(summary.movements, 0);
    }

    #[test]
    fn restart_clears_session() {
        let mut tracker = MotionTracker::new(MotionConfig::default(), 0).unwrap();
        observe(&mut tracker, &vigorous(), 50);
        tracker.restart(5_000);
        assert_eq!(tracker.movements(), 0);
        assert_eq!(tracker.samples(), 0);
        assert_eq!(tracker.state(), ActivityState::Still);
        assert_eq!(tracker.last_activity_ms(), 5_000);
        assert!(!tracker.window_elapsed(14_999));
        assert!(tracker.window_elapsed(15_000));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let inverted = MotionConfig::default().with_thresholds(0.5, 0.15);
        assert_eq!(
            MotionTracker::new(inverted, 0).err(),
            Some(ConfigError::ThresholdOrder)
        );

        let empty = MotionConfig::default().with_window_ms(0);
        assert_eq!(
            MotionTracker::new(empty, 0).err(),
            Some(ConfigError::EmptyWindow)
        );
    }

    #[test]
    fn summary_text_reflects_sleep() {
        let asleep = WindowSummary {
            movements: 0,
            average_intensity: 0.01,
            still_minutes: 4,
            likely_asleep: true,
            state: ActivityState::Still,
        };
        assert_eq!(
            format!("{}", asleep),
            "Status: Likely sleeping\nStill for: 4 minutes\nCurrent activity: Still/Resting"
        );

        let awake = WindowSummary {
            movements: 12,
            likely_asleep: false,
            still_minutes: 0,
            state: ActivityState::Moving,
            ..asleep
        };
        assert_eq!(
            format!("{}", awake),
            "Status: Awake/Active\nRecent movements: 12 per window\nCurrent activity: Light movement"
        );
    }
}
