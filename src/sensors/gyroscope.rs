//! L3G4200D gyroscope driver
//!
//! Provides the full-scale table, raw and scaled rate reads, and power control.

use device_driver::RegisterInterface;

use crate::registers::l3g4200d::{self, L3g4200dRegisters};
use crate::{Error, RangeError};

/// Gyroscope full-scale range
///
/// The discriminant is the `CTRL_REG4` FS field (bits 5:4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    /// ±250°/s range
    Dps250 = 0b00,
    /// ±500°/s range
    Dps500 = 0b01,
    /// ±2000°/s range
    Dps2000 = 0b10,
}

impl GyroRange {
    /// Every supported range
    pub const ALL: [Self; 3] = [Self::Dps250, Self::Dps500, Self::Dps2000];

    /// Register bit pattern (before shifting into place)
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Look up a range by its register bit pattern
    #[must_use]
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|range| range.bits() == bits)
    }

    /// Full-scale value in °/s
    #[must_use]
    pub const fn dps(self) -> u16 {
        match self {
            Self::Dps250 => 250,
            Self::Dps500 => 500,
            Self::Dps2000 => 2000,
        }
    }

    /// Look up a range by its full-scale value in °/s
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::GyroRange`] for anything but 250, 500 or 2000.
    pub fn from_dps(dps: u16) -> Result<Self, RangeError> {
        Self::ALL
            .into_iter()
            .find(|range| range.dps() == dps)
            .ok_or(RangeError::GyroRange)
    }

    /// Scale factor in mdps/LSB
    #[must_use]
    pub const fn scale_factor(self) -> f32 {
        match self {
            Self::Dps250 => 8.75,
            Self::Dps500 => 17.50,
            Self::Dps2000 => 70.0,
        }
    }
}

impl TryFrom<u16> for GyroRange {
    type Error = RangeError;

    fn try_from(dps: u16) -> Result<Self, Self::Error> {
        Self::from_dps(dps)
    }
}

/// Gyroscope data (raw counts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroData {
    /// X-axis rotation (raw)
    pub x: i16,
    /// Y-axis rotation (raw)
    pub y: i16,
    /// Z-axis rotation (raw)
    pub z: i16,
}

impl From<[i16; 3]> for GyroData {
    fn from([x, y, z]: [i16; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Gyroscope data in degrees per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataDps {
    /// X-axis rotation rate in °/s
    pub x: f32,
    /// Y-axis rotation rate in °/s
    pub y: f32,
    /// Z-axis rotation rate in °/s
    pub z: f32,
}

impl GyroDataDps {
    /// Convert raw counts using a range's mdps/LSB scale factor
    #[must_use]
    pub fn from_raw(raw: GyroData, range: GyroRange) -> Self {
        let dps_per_lsb = range.scale_factor() / 1000.0;
        Self {
            x: f32::from(raw.x) * dps_per_lsb,
            y: f32::from(raw.y) * dps_per_lsb,
            z: f32::from(raw.z) * dps_per_lsb,
        }
    }
}

/// L3G4200D driver
pub struct L3g4200d<I> {
    device: L3g4200dRegisters<I>,
}

impl<I> L3g4200d<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a driver on an interface already bound to the device address
    pub fn new(interface: I) -> Self {
        Self {
            device: L3g4200dRegisters::new(interface),
        }
    }

    /// Read the `WHO_AM_I` register
    ///
    /// Should return 0xD3 for a genuine L3G4200D
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn device_id(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.who_am_i().read()?.who_am_i())
    }

    /// Enter normal mode with X, Y and Z enabled (`CTRL_REG1` = 0x0F)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn start(&mut self) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_1().write(|w| {
            w.set_x_enable(true);
            w.set_y_enable(true);
            w.set_z_enable(true);
            w.set_normal_mode(true);
        })?;
        Ok(())
    }

    /// Enter power-down mode (`CTRL_REG1` = 0x00)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn stop(&mut self) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_1().write(|w| {
            w.set_normal_mode(false);
        })?;
        Ok(())
    }

    /// Read raw counts for the three axes
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_raw(&mut self) -> Result<GyroData, Error<I::Error>> {
        let axes = super::read_axes(&mut self.device.interface, l3g4200d::DATA_PAIRS)?;
        Ok(GyroData::from(axes))
    }

    /// Read angular rates in degrees per second
    ///
    /// The range is read from the device before scaling, so a range change
    /// made elsewhere is always honoured.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, or
    /// [`Error::InvalidRegisterValue`] if the FS field holds `0b11`.
    pub fn read(&mut self) -> Result<GyroDataDps, Error<I::Error>> {
        let raw = self.read_raw()?;
        let range = self.data_range()?;
        Ok(GyroDataDps::from_raw(raw, range))
    }

    /// Current full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, or
    /// [`Error::InvalidRegisterValue`] if the FS field holds `0b11`.
    pub fn data_range(&mut self) -> Result<GyroRange, Error<I::Error>> {
        let bits = self.device.ctrl_reg_4().read()?.full_scale();
        GyroRange::from_bits(bits).ok_or(Error::InvalidRegisterValue(bits))
    }

    /// Set the full-scale range
    ///
    /// All other `CTRL_REG4` bits are cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_data_range(&mut self, range: GyroRange) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_4().write(|w| {
            w.set_full_scale(range.bits());
        })?;
        Ok(())
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }
}

impl<I> super::Gyroscope for L3g4200d<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    type BusError = I::Error;

    fn start(&mut self) -> Result<(), Error<I::Error>> {
        L3g4200d::start(self)
    }

    fn read_raw(&mut self) -> Result<GyroData, Error<I::Error>> {
        L3g4200d::read_raw(self)
    }

    fn read_rates(&mut self) -> Result<GyroDataDps, Error<I::Error>> {
        self.read()
    }

    /// The L3G4200D has no offset-trim registers
    fn set_offset(&mut self, _x: f32, _y: f32, _z: f32) -> Result<(), Error<I::Error>> {
        Err(Error::Unsupported)
    }
}
