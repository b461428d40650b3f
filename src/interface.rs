//! Register access over a 4-wire SPI link.
//!
//! Every transaction is one chip-select frame: the address byte (bit 7 set
//! for reads) followed by the payload. Chip-select is driven by the driver
//! rather than an `SpiDevice`, so the bus must be configured for mode 0,
//! MSB first, before it is handed over.
//!
//! The [`RegisterInterface`] trait is the seam the sensor driver is written
//! against; [`SpiInterface`] is the hardware implementation.

use core::fmt::{Debug, Display};

use embedded_hal::{digital::OutputPin, spi::SpiBus};

use crate::{error::InterfaceError, registers::SPI_READ_BIT};

/// Longest burst [`SpiInterface`] will frame in one transaction
/// (accelerometer, temperature and gyroscope outputs).
pub const MAX_BURST_LEN: usize = 14;

/// Single-register and burst access to the sensor's register file.
pub trait RegisterInterface {
    type Error: Debug + Display;

    fn read_register(&mut self, reg: u8) -> Result<u8, Self::Error>;

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Self::Error>;

    /// Read consecutive registers starting at `reg` into `buf`.
    /// Returns the number of bytes actually read.
    fn read_burst(&mut self, reg: u8, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// SPI bus plus a dedicated chip-select line.
pub struct SpiInterface<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> SpiInterface<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Wrap the bus and chip-select pin, parking chip-select high.
    pub fn new(spi: SPI, mut cs: CS) -> Result<Self, InterfaceError<SPI::Error, CS::Error>> {
        cs.set_high().map_err(InterfaceError::ChipSelect)?;
        Ok(Self { spi, cs })
    }

    /// Returns the underlying bus and chip-select pin, consuming the interface.
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    /// Clock `frame` out and the response back in, within one chip-select
    /// assertion. Chip-select is released even when the transfer fails.
    fn transaction(
        &mut self,
        frame: &mut [u8],
    ) -> Result<(), InterfaceError<SPI::Error, CS::Error>> {
        self.cs.set_low().map_err(InterfaceError::ChipSelect)?;
        let transfer = self
            .spi
            .transfer_in_place(frame)
            .and_then(|()| self.spi.flush());
        let deselect = self.cs.set_high();

        transfer.map_err(InterfaceError::Spi)?;
        deselect.map_err(InterfaceError::ChipSelect)
    }
}

impl<SPI, CS> RegisterInterface for SpiInterface<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    type Error = InterfaceError<SPI::Error, CS::Error>;

    fn read_register(&mut self, reg: u8) -> Result<u8, Self::Error> {
        let mut frame = [reg | SPI_READ_BIT, 0x00];
        self.transaction(&mut frame)?;
        Ok(frame[1])
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        let mut frame = [reg & !SPI_READ_BIT, value];
        self.transaction(&mut frame)
    }

    fn read_burst(&mut self, reg: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let len = buf.len();
        if len > MAX_BURST_LEN {
            return Err(InterfaceError::BurstTooLong(len));
        }

        let mut frame = [0u8; MAX_BURST_LEN + 1];
        frame[0] = reg | SPI_READ_BIT;
        self.transaction(&mut frame[..=len])?;
        buf.copy_from_slice(&frame[1..=len]);
        Ok(len)
    }
}
