use embedded_hal::delay::DelayNs;

use crate::{
    accel::{Accel, AccelFullScale, AxisSample},
    error::Error,
    interface::RegisterInterface,
    registers::{
        Register, ACCEL_BURST_LEN, PWR_MGMT_1_RESET, RESET_SETTLE_MS, WAKE_SETTLE_MS,
        WHO_AM_I_VALUE, WRITE_SETTLE_US,
    },
};

/// TDK InvenSense ICM-20689 accelerometer driver
pub struct Icm20689<RI> {
    interface: RI,
    full_scale: AccelFullScale,
    initialized: bool,
}

impl<RI> Icm20689<RI>
where
    RI: RegisterInterface,
{
    /// Wrap a register interface. No bus traffic happens until
    /// [`bring_up`](Self::bring_up).
    pub fn new(interface: RI) -> Self {
        Self {
            interface,
            full_scale: AccelFullScale::G2,
            initialized: false,
        }
    }

    /// Returns the underlying register interface, consuming this driver.
    pub fn release(self) -> RI {
        self.interface
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Gate sampling until the next successful bring-up.
    pub(crate) fn invalidate(&mut self) {
        self.initialized = false;
    }

    pub fn full_scale(&self) -> AccelFullScale {
        self.full_scale
    }

    pub(crate) fn read_register(&mut self, reg: Register) -> Result<u8, Error<RI::Error>> {
        Ok(self.interface.read_register(reg.addr())?)
    }

    pub(crate) fn read_registers(
        &mut self,
        reg: Register,
        buf: &mut [u8],
    ) -> Result<(), Error<RI::Error>> {
        let read = self.interface.read_burst(reg.addr(), buf)?;
        if read < buf.len() {
            return Err(Error::ShortRead {
                expected: buf.len(),
                actual: read,
            });
        }
        Ok(())
    }

    pub(crate) fn write_register(
        &mut self,
        reg: Register,
        value: u8,
        delay: &mut impl DelayNs,
    ) -> Result<(), Error<RI::Error>> {
        self.interface.write_register(reg.addr(), value)?;
        delay.delay_us(WRITE_SETTLE_US);
        Ok(())
    }

    /// Read WHO_AM_I.
    pub fn who_am_i(&mut self) -> Result<u8, Error<RI::Error>> {
        self.read_register(Register::WhoAmI)
    }

    /// Identify the part, then reset it and let it settle.
    ///
    /// Marks the driver initialized on success and uninitialized on any
    /// failure. An identity mismatch aborts before anything is written.
    /// Calling this again simply resets the device again.
    pub fn bring_up(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<RI::Error>> {
        self.initialized = false;

        let id = self.who_am_i()?;
        if id != WHO_AM_I_VALUE {
            log::warn!(
                "WHO_AM_I mismatch: read 0x{:02X}, expected 0x{:02X}",
                id,
                WHO_AM_I_VALUE
            );
            return Err(Error::WrongDevice(id));
        }

        self.reset(delay)?;
        // The reset restores ACCEL_CONFIG to ±2 g.
        self.full_scale = AccelFullScale::G2;
        self.initialized = true;
        log::info!("ICM-20689 up (WHO_AM_I 0x{:02X})", id);
        Ok(())
    }

    /// Pulse DEVICE_RESET and wait for the part to come back.
    pub fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<RI::Error>> {
        self.write_register(Register::PwrMgmt1, PWR_MGMT_1_RESET, delay)?;
        delay.delay_ms(RESET_SETTLE_MS);
        self.write_register(Register::PwrMgmt1, 0x00, delay)?;
        delay.delay_ms(WAKE_SETTLE_MS);
        Ok(())
    }

    /// Select the accelerometer range and use it for subsequent scaling.
    pub fn set_accel_full_scale(
        &mut self,
        scale: AccelFullScale,
        delay: &mut impl DelayNs,
    ) -> Result<(), Error<RI::Error>> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        let value = self.read_register(Register::AccelConfig)?;
        let value = (value & !0b0001_1000) | scale.config_bits();
        self.write_register(Register::AccelConfig, value, delay)?;
        self.full_scale = scale;
        Ok(())
    }

    /// Raw accelerometer output.
    pub fn accel(&mut self) -> Result<Accel, Error<RI::Error>> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        let mut data = [0; ACCEL_BURST_LEN];
        self.read_registers(Register::AccelX_H, &mut data)?;
        Ok(Accel::from_bytes(data))
    }

    /// Accelerometer output scaled to g.
    pub fn acquire(&mut self) -> Result<AxisSample, Error<RI::Error>> {
        Ok(self.accel()?.scaled(self.full_scale))
    }
}
