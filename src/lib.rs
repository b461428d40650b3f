//! ICM-20689 accelerometer driver with activity classification.
//!
//! ```ignore
//! let interface = SpiInterface::new(spi, cs)?;
//! let mut monitor = MotionMonitor::new(interface, MotionConfig::default());
//! monitor.begin(&mut sensor_enable, &mut delay, clock.millis())?;
//!
//! loop {
//!     match monitor.poll(clock.millis()) {
//!         Ok(Some(summary)) => info!("{}", summary),
//!         Ok(None) => {}
//!         Err(e) => warn!("skipped sample: {}", e),
//!     }
//!     delay.delay_ms(200);
//! }
//! ```
#![cfg_attr(not(test), no_std)]

pub mod accel;
pub mod config;
pub mod error;
pub mod interface;
pub mod monitor;
pub mod motion;
pub mod registers;
pub mod sensor;
pub mod tracker;
