//! Sensor drivers
//!
//! - Accelerometer: ADXL345 (3-axis, ±2..16 g)
//! - Gyroscope: L3G4200D (3-axis, ±250..2000 dps)
//!
//! Both drivers implement the capability traits defined here, which is all
//! the attitude estimator needs from them.

pub mod accelerometer;
pub mod gyroscope;

// Re-export main types
pub use accelerometer::{AccelData, AccelDataG, AccelDataRate, AccelRange, Adxl345};
pub use gyroscope::{GyroData, GyroDataDps, GyroRange, L3g4200d};

use crate::Error;
use crate::interface::ByteRegisters;
use crate::twos_complement::decode_pair;

/// Accelerometer capability used by the attitude estimator
pub trait Accelerometer {
    /// Bus error type
    type BusError;

    /// Put the sensor into measurement mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    fn start(&mut self) -> Result<(), Error<Self::BusError>>;

    /// Read raw counts for the three axes
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    fn read_raw(&mut self) -> Result<AccelData, Error<Self::BusError>>;

    /// Store a zero-reading offset (in raw counts) for the sensor to subtract
    ///
    /// # Errors
    ///
    /// Returns an error if communication fails or the offset cannot be represented.
    fn set_offset(&mut self, x: f32, y: f32, z: f32) -> Result<(), Error<Self::BusError>>;
}

/// Gyroscope capability used by the attitude estimator
pub trait Gyroscope {
    /// Bus error type
    type BusError;

    /// Power the sensor up with all axes enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    fn start(&mut self) -> Result<(), Error<Self::BusError>>;

    /// Read raw counts for the three axes
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    fn read_raw(&mut self) -> Result<GyroData, Error<Self::BusError>>;

    /// Read angular rates in degrees per second
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    fn read_rates(&mut self) -> Result<GyroDataDps, Error<Self::BusError>>;

    /// Store a zero-rate offset (in raw counts)
    ///
    /// Hardware without offset-trim registers returns [`Error::Unsupported`].
    ///
    /// # Errors
    ///
    /// Returns an error if communication fails or the capability is missing.
    fn set_offset(&mut self, x: f32, y: f32, z: f32) -> Result<(), Error<Self::BusError>>;
}

/// Read three little-endian sample pairs, one byte per bus transaction
pub(crate) fn read_axes<B>(bus: &mut B, pairs: [(u8, u8); 3]) -> Result<[i16; 3], B::Error>
where
    B: ByteRegisters,
{
    let mut axes = [0i16; 3];
    for (axis, (low, high)) in axes.iter_mut().zip(pairs) {
        let lsb = bus.read_byte(low)?;
        let msb = bus.read_byte(high)?;
        *axis = decode_pair(lsb, msb);
    }
    Ok(axes)
}
