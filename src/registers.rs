//! ICM-20689 Register Map
//!
//! Only the registers the motion pipeline touches are exposed:
//! - Identification: WHO_AM_I
//! - Power management: device reset and sleep control
//! - Accelerometer configuration and data output
//!
//! Over SPI the register address occupies the low seven bits of the first
//! byte of a frame; bit 7 marks the direction (set = read, clear = write).

#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Register {
    /// Accelerometer Configuration register (0x1C)
    /// Controls the full-scale range (bits 4:3)
    AccelConfig = 0x1C,

    // Accelerometer Data Registers
    /// High byte of X-axis acceleration, start of the 6-byte output burst
    AccelX_H = 0x3B,
    /// Low byte of X-axis acceleration
    AccelX_L = 0x3C,
    /// High byte of Y-axis acceleration
    AccelY_H = 0x3D,
    /// Low byte of Y-axis acceleration
    AccelY_L = 0x3E,
    /// High byte of Z-axis acceleration
    AccelZ_H = 0x3F,
    /// Low byte of Z-axis acceleration
    AccelZ_L = 0x40,

    /// Power Management 1 register (0x6B)
    /// Controls device reset, sleep and clock source
    PwrMgmt1 = 0x6B,

    /// Identity register (0x75), reads [`WHO_AM_I_VALUE`] on a genuine part
    WhoAmI = 0x75,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Expected content of [`Register::WhoAmI`].
pub const WHO_AM_I_VALUE: u8 = 0x98;

/// Bit 7 of the address byte: set for reads, clear for writes.
pub const SPI_READ_BIT: u8 = 0x80;

/// `DEVICE_RESET` bit of [`Register::PwrMgmt1`], self-clearing.
pub const PWR_MGMT_1_RESET: u8 = 0x80;

/// Length of the accelerometer output burst starting at [`Register::AccelX_H`].
pub const ACCEL_BURST_LEN: usize = 6;

/// Wait after switching the sensor supply on.
pub const POWER_ON_SETTLE_MS: u32 = 100;
/// Wait after writing the reset bit.
pub const RESET_SETTLE_MS: u32 = 100;
/// Wait after clearing the reset bit.
pub const WAKE_SETTLE_MS: u32 = 50;
/// Wait after any register write.
pub const WRITE_SETTLE_US: u32 = 10;
