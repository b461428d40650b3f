//! Poll-driven motion monitoring session.
//!
//! [`MotionMonitor`] owns the driver and the [`MotionTracker`] and runs one
//! complete cycle per [`poll`](MotionMonitor::poll): acquire, classify, tick,
//! and close the window when it has elapsed. It has no thread or timer of its
//! own; the caller sets the cadence and supplies the millisecond clock.

use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    accel::{AccelFullScale, AxisSample},
    config::MotionConfig,
    error::{ConfigError, Error},
    interface::RegisterInterface,
    motion::ActivityState,
    registers::POWER_ON_SETTLE_MS,
    sensor::Icm20689,
    tracker::{MotionTracker, WindowSummary},
};

/// Instantaneous view of the tracker, for status lines.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct MotionStatus {
    pub state: ActivityState,
    pub intensity: f32,
    pub movements: u32,
    pub still_minutes: u64,
    pub likely_asleep: bool,
}

pub struct MotionMonitor<RI> {
    imu: Icm20689<RI>,
    tracker: MotionTracker,
    sample: Option<AxisSample>,
    summary: Option<WindowSummary>,
}

impl<RI> MotionMonitor<RI>
where
    RI: RegisterInterface,
{
    /// Wrap `interface` for a session tracked with `config`. A config that
    /// fails [`MotionConfig::validate`] is rejected before any bus traffic.
    pub fn new(interface: RI, config: MotionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            imu: Icm20689::new(interface),
            tracker: MotionTracker::new(config, 0)?,
            sample: None,
            summary: None,
        })
    }

    /// Returns the underlying register interface, consuming the monitor.
    pub fn release(self) -> RI {
        self.imu.release()
    }

    /// Power the sensor, bring it up and start a fresh tracking session at
    /// `now_ms`.
    ///
    /// A failed power-enable or bring-up leaves the monitor uninitialized and
    /// every later [`poll`](Self::poll) fails without touching the bus.
    pub fn begin<P>(
        &mut self,
        power_enable: &mut P,
        delay: &mut impl DelayNs,
        now_ms: u64,
    ) -> Result<(), Error<RI::Error>>
    where
        P: OutputPin,
    {
        if power_enable.set_high().is_err() {
            log::warn!("sensor power enable failed");
            return Err(Error::PowerEnable);
        }
        delay.delay_ms(POWER_ON_SETTLE_MS);
        self.start(delay, now_ms)
    }

    /// Bring the sensor up, select the configured accelerometer range and
    /// restart the session, for hosts where the sensor supply is always on.
    pub fn start(&mut self, delay: &mut impl DelayNs, now_ms: u64) -> Result<(), Error<RI::Error>> {
        self.imu.bring_up(delay)?;
        let full_scale = self.tracker.config().full_scale;
        if full_scale != AccelFullScale::G2 {
            if let Err(e) = self.imu.set_accel_full_scale(full_scale, delay) {
                // Samples would be scaled with the wrong divisor.
                self.imu.invalidate();
                return Err(e);
            }
        }
        self.tracker.restart(now_ms);
        self.sample = None;
        self.summary = None;
        Ok(())
    }

    /// Run one acquisition cycle at `now_ms`.
    ///
    /// Returns the window summary when this cycle closed a window. A failed
    /// acquisition is returned as-is and leaves the tracker untouched.
    pub fn poll(&mut self, now_ms: u64) -> Result<Option<WindowSummary>, Error<RI::Error>> {
        let sample = match self.imu.acquire() {
            Ok(sample) => sample,
            Err(e) => {
                log::warn!("IMU read error: {}", e);
                return Err(e);
            }
        };

        self.tracker.classify(&sample, now_ms);
        self.tracker.tick(&sample);
        self.sample = Some(sample);

        if self.tracker.window_elapsed(now_ms) {
            let summary = self.tracker.summarize();
            self.summary = Some(summary);
            return Ok(Some(summary));
        }
        Ok(None)
    }

    pub fn is_initialized(&self) -> bool {
        self.imu.is_initialized()
    }

    /// Latest successfully acquired sample.
    pub fn sample(&self) -> Option<AxisSample> {
        self.sample
    }

    /// Summary of the most recently closed window.
    pub fn window_summary(&self) -> Option<WindowSummary> {
        self.summary
    }

    pub fn state(&self) -> ActivityState {
        self.tracker.state()
    }

    pub fn status(&self) -> MotionStatus {
        MotionStatus {
            state: self.tracker.state(),
            intensity: self.tracker.intensity(),
            movements: self.tracker.movements(),
            still_minutes: self.tracker.still_minutes(),
            likely_asleep: self.tracker.likely_asleep(),
        }
    }

    pub fn tracker(&self) -> &MotionTracker {
        &self.tracker
    }

    pub fn sensor(&mut self) -> &mut Icm20689<RI> {
        &mut self.imu
    }
}
