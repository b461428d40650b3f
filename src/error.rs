//! Error types for ICM-20689 operations.
//!
//! Nothing here is retried by the driver. A failed operation is reported once
//! and the caller decides whether to try the whole poll cycle again.

use core::fmt::{Debug, Display, Formatter};

/// Error for sensor operations, generic over the register interface error.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error<E> {
    /// The register interface failed (bus fault, chip-select fault, disconnect)
    Interface(E),
    /// WHO_AM_I returned something other than the ICM-20689 identity
    WrongDevice(u8),
    /// A burst read returned fewer bytes than requested
    ShortRead { expected: usize, actual: usize },
    /// Sampling was requested before a successful bring-up
    NotInitialized,
    /// The sensor power-enable line could not be driven
    PowerEnable,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Interface(error)
    }
}

impl<E: Debug> Debug for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Self::WrongDevice(id) => f.debug_tuple("WrongDevice").field(id).finish(),
            Self::ShortRead { expected, actual } => f
                .debug_struct("ShortRead")
                .field("expected", expected)
                .field("actual", actual)
                .finish(),
            Self::NotInitialized => f.write_str("NotInitialized"),
            Self::PowerEnable => f.write_str("PowerEnable"),
        }
    }
}

impl<E: Display> Display for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "register interface error: {}", e),
            Self::WrongDevice(id) => write!(f, "unexpected WHO_AM_I 0x{:02X}", id),
            Self::ShortRead { expected, actual } => {
                write!(f, "short burst read: {} of {} bytes", actual, expected)
            }
            Self::NotInitialized => f.write_str("device not initialized"),
            Self::PowerEnable => f.write_str("sensor power enable failed"),
        }
    }
}

/// Error of the SPI register interface.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum InterfaceError<S, P> {
    /// SPI bus transfer or flush failed
    Spi(S),
    /// Driving the chip-select line failed
    ChipSelect(P),
    /// Requested burst does not fit the frame buffer
    BurstTooLong(usize),
}

impl<S: Debug, P: Debug> Debug for InterfaceError<S, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => f.debug_tuple("Spi").field(e).finish(),
            Self::ChipSelect(e) => f.debug_tuple("ChipSelect").field(e).finish(),
            Self::BurstTooLong(len) => f.debug_tuple("BurstTooLong").field(len).finish(),
        }
    }
}

impl<S: Debug, P: Debug> Display for InterfaceError<S, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI transfer failed: {:?}", e),
            Self::ChipSelect(e) => write!(f, "chip-select failed: {:?}", e),
            Self::BurstTooLong(len) => write!(f, "burst of {} bytes exceeds frame buffer", len),
        }
    }
}

/// Rejected [`MotionConfig`](crate::config::MotionConfig).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum ConfigError {
    /// A threshold is NaN, infinite or negative
    InvalidThreshold,
    /// `move_threshold` is not strictly below `active_threshold`
    ThresholdOrder,
    /// The aggregation window is zero
    EmptyWindow,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidThreshold => f.write_str("threshold must be finite and non-negative"),
            Self::ThresholdOrder => f.write_str("move threshold must be below active threshold"),
            Self::EmptyWindow => f.write_str("window duration must be non-zero"),
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::{digital, spi};

    use super::*;

    #[test]
    fn display_reports_identity_byte() {
        let err: Error<u8> = Error::WrongDevice(0x68);
        assert_eq!(format!("{}", err), "unexpected WHO_AM_I 0x68");
    }

    #[test]
    fn interface_errors_convert() {
        let err: Error<u8> = 7u8.into();
        assert!(matches!(err, Error::Interface(7)));
        assert_eq!(format!("{:?}", err), "Interface(7)");
    }

    #[test]
    fn interface_display_names_the_failure() {
        let transfer: InterfaceError<_, ()> = InterfaceError::Spi(spi::ErrorKind::Overrun);
        assert_eq!(format!("{}", transfer), "SPI transfer failed: Overrun");

        let cs: InterfaceError<(), _> = InterfaceError::ChipSelect(digital::ErrorKind::Other);
        assert_eq!(format!("{}", cs), "chip-select failed: Other");

        let err: Error<InterfaceError<(), ()>> = InterfaceError::BurstTooLong(15).into();
        assert_eq!(
            format!("{}", err),
            "register interface error: burst of 15 bytes exceeds frame buffer"
        );
    }

    #[test]
    fn short_read_debug_names_both_lengths() {
        let err: Error<u8> = Error::ShortRead {
            expected: 6,
            actual: 4,
        };
        assert_eq!(
            format!("{:?}", err),
            "ShortRead { expected: 6, actual: 4 }"
        );
        assert_eq!(format!("{}", err), "short burst read: 4 of 6 bytes");
    }
}
