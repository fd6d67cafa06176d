#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod ahrs;
pub mod clock;
pub mod interface;
pub mod registers;
pub mod sensors;
pub mod twos_complement;

// Re-export main types
pub use ahrs::{Ahrs, AhrsConfig, Attitude, Calibration};
pub use clock::{ManualClock, TimeSource};
pub use interface::{ByteRegisters, I2cInterface};
pub use sensors::{
    AccelData, AccelDataG, AccelDataRate, AccelRange, Accelerometer, Adxl345, GyroData,
    GyroDataDps, GyroRange, Gyroscope, L3g4200d,
};
pub use twos_complement::{TwosComplement, Width};

#[cfg(feature = "embassy-time")]
pub use clock::EmbassyClock;

/// ADXL345 I2C address with the ALT ADDRESS pin low
pub const ADXL345_ADDRESS: u8 = 0x53;

/// L3G4200D I2C address with SDO pulled high
pub const L3G4200D_ADDRESS: u8 = 0x69;

/// Expected value of the ADXL345 `DEVID` register
pub const ADXL345_DEVICE_ID: u8 = 0xE5;

/// Expected value of the L3G4200D `WHO_AM_I` register
pub const L3G4200D_DEVICE_ID: u8 = 0xD3;

/// A value outside the domain a register or table can represent
///
/// Always raised before any bus write, so the device is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    /// Decimal outside the range of the target two's-complement width (or not finite)
    Decimal,
    /// Accelerometer range other than ±2, 4, 8 or 16 g
    AccelRange,
    /// Output data rate not supported by the accelerometer
    AccelDataRate,
    /// Gyroscope range other than ±250, 500 or 2000 dps
    GyroRange,
    /// Scaled offset does not fit an 8-bit trim register
    Offset,
}

/// Driver errors
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Value outside the supported domain
    Range(RangeError),
    /// Register holds a bit pattern with no entry in the lookup table
    InvalidRegisterValue(u8),
    /// Capability not implemented by this hardware
    Unsupported,
    /// Invalid configuration parameter
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
