//! ADXL345 accelerometer driver
//!
//! Provides the range and data-rate tables, raw axis reads, unit scaling and
//! the onboard zero-g offset trim.

use device_driver::RegisterInterface;

use crate::interface::ByteRegisters;
use crate::registers::adxl345::{self, Adxl345Registers};
use crate::twos_complement::TwosComplement;
use crate::{Error, RangeError};

/// Scale factor of the offset-trim registers in mg/LSB
pub const OFFSET_REGISTER_SCALE_FACTOR: f32 = 15.6;

/// Accelerometer full-scale range
///
/// The discriminant is the `DATA_FORMAT` range field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    /// ±2g range (most sensitive, least range)
    G2 = 0b00,
    /// ±4g range
    G4 = 0b01,
    /// ±8g range
    G8 = 0b10,
    /// ±16g range (least sensitive, most range)
    G16 = 0b11,
}

impl AccelRange {
    /// Every supported range
    pub const ALL: [Self; 4] = [Self::G2, Self::G4, Self::G8, Self::G16];

    /// Register bit pattern
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Look up a range by its register bit pattern
    #[must_use]
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|range| range.bits() == bits)
    }

    /// Full-scale value in g
    #[must_use]
    pub const fn g(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Look up a range by its full-scale value in g
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::AccelRange`] for anything but 2, 4, 8 or 16.
    pub fn from_g(g: u8) -> Result<Self, RangeError> {
        Self::ALL
            .into_iter()
            .find(|range| range.g() == g)
            .ok_or(RangeError::AccelRange)
    }

    /// Scale factor in mg/LSB
    #[must_use]
    pub const fn scale_factor(self) -> f32 {
        match self {
            Self::G2 => 3.9,
            Self::G4 => 7.8,
            Self::G8 => 15.6,
            Self::G16 => 31.2,
        }
    }
}

impl TryFrom<u8> for AccelRange {
    type Error = RangeError;

    fn try_from(g: u8) -> Result<Self, Self::Error> {
        Self::from_g(g)
    }
}

/// Accelerometer output data rate
///
/// The discriminant is the `BW_RATE` rate field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelDataRate {
    /// 0.10 Hz
    Hz0_10 = 0b0000,
    /// 0.20 Hz
    Hz0_20 = 0b0001,
    /// 0.39 Hz
    Hz0_39 = 0b0010,
    /// 0.78 Hz
    Hz0_78 = 0b0011,
    /// 1.56 Hz
    Hz1_56 = 0b0100,
    /// 3.13 Hz
    Hz3_13 = 0b0101,
    /// 6.25 Hz
    Hz6_25 = 0b0110,
    /// 12.5 Hz
    Hz12_5 = 0b0111,
    /// 25 Hz
    Hz25 = 0b1000,
    /// 50 Hz
    Hz50 = 0b1001,
    /// 100 Hz (power-on default)
    Hz100 = 0b1010,
    /// 200 Hz
    Hz200 = 0b1011,
    /// 400 Hz
    Hz400 = 0b1100,
    /// 800 Hz
    Hz800 = 0b1101,
    /// 1600 Hz
    Hz1600 = 0b1110,
    /// 3200 Hz
    Hz3200 = 0b1111,
}

impl AccelDataRate {
    /// Every supported rate, slowest first
    pub const ALL: [Self; 16] = [
        Self::Hz0_10,
        Self::Hz0_20,
        Self::Hz0_39,
        Self::Hz0_78,
        Self::Hz1_56,
        Self::Hz3_13,
        Self::Hz6_25,
        Self::Hz12_5,
        Self::Hz25,
        Self::Hz50,
        Self::Hz100,
        Self::Hz200,
        Self::Hz400,
        Self::Hz800,
        Self::Hz1600,
        Self::Hz3200,
    ];

    /// Register bit pattern
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Look up a rate by its register bit pattern
    #[must_use]
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|rate| rate.bits() == bits)
    }

    /// Output data rate in Hz
    #[must_use]
    pub const fn hz(self) -> f32 {
        match self {
            Self::Hz0_10 => 0.10,
            Self::Hz0_20 => 0.20,
            Self::Hz0_39 => 0.39,
            Self::Hz0_78 => 0.78,
            Self::Hz1_56 => 1.56,
            Self::Hz3_13 => 3.13,
            Self::Hz6_25 => 6.25,
            Self::Hz12_5 => 12.5,
            Self::Hz25 => 25.0,
            Self::Hz50 => 50.0,
            Self::Hz100 => 100.0,
            Self::Hz200 => 200.0,
            Self::Hz400 => 400.0,
            Self::Hz800 => 800.0,
            Self::Hz1600 => 1600.0,
            Self::Hz3200 => 3200.0,
        }
    }

    /// Look up a rate by its value in Hz
    ///
    /// Matches to within 0.001 Hz, so `3.13` and `0.1` are accepted as written.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::AccelDataRate`] for a rate not in the table.
    pub fn from_hz(hz: f32) -> Result<Self, RangeError> {
        Self::ALL
            .into_iter()
            .find(|rate| libm::fabsf(rate.hz() - hz) < 1e-3)
            .ok_or(RangeError::AccelDataRate)
    }
}

/// Accelerometer data (raw counts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelData {
    /// X-axis acceleration (raw)
    pub x: i16,
    /// Y-axis acceleration (raw)
    pub y: i16,
    /// Z-axis acceleration (raw)
    pub z: i16,
}

impl From<[i16; 3]> for AccelData {
    fn from([x, y, z]: [i16; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Accelerometer data in physical units (g-force)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataG {
    /// X-axis acceleration in g
    pub x: f32,
    /// Y-axis acceleration in g
    pub y: f32,
    /// Z-axis acceleration in g
    pub z: f32,
}

impl AccelDataG {
    /// Convert raw counts using a range's mg/LSB scale factor
    #[must_use]
    pub fn from_raw(raw: AccelData, range: AccelRange) -> Self {
        let g_per_lsb = range.scale_factor() / 1000.0;
        Self {
            x: f32::from(raw.x) * g_per_lsb,
            y: f32::from(raw.y) * g_per_lsb,
            z: f32::from(raw.z) * g_per_lsb,
        }
    }
}

/// ADXL345 driver
///
/// Holds no configuration of its own: range and rate are read back from the
/// device whenever they are needed.
pub struct Adxl345<I> {
    device: Adxl345Registers<I>,
}

impl<I> Adxl345<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a driver on an interface already bound to the device address
    pub fn new(interface: I) -> Self {
        Self {
            device: Adxl345Registers::new(interface),
        }
    }

    /// Read the `DEVID` register
    ///
    /// Should return 0xE5 for a genuine ADXL345
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn device_id(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.dev_id().read()?.device_id())
    }

    /// Move from standby into measurement mode
    ///
    /// Writes `POWER_CTL` with only the measure bit set.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn start(&mut self) -> Result<(), Error<I::Error>> {
        self.device.power_ctl().write(|w| {
            w.set_measure(true);
        })?;
        Ok(())
    }

    /// Return to standby mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn stop(&mut self) -> Result<(), Error<I::Error>> {
        self.device.power_ctl().write(|w| {
            w.set_measure(false);
        })?;
        Ok(())
    }

    /// Read raw counts for the three axes
    ///
    /// Counts are not converted into g. If an offset was stored this power
    /// cycle the device has already subtracted it.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read(&mut self) -> Result<AccelData, Error<I::Error>> {
        let axes = super::read_axes(&mut self.device.interface, adxl345::DATA_PAIRS)?;
        Ok(AccelData::from(axes))
    }

    /// Read acceleration in g, scaled by the range currently set on the device
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_g(&mut self) -> Result<AccelDataG, Error<I::Error>> {
        let range = self.data_range()?;
        let raw = self.read()?;
        Ok(AccelDataG::from_raw(raw, range))
    }

    /// Current full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn data_range(&mut self) -> Result<AccelRange, Error<I::Error>> {
        let bits = self.device.data_format().read()?.range();
        AccelRange::from_bits(bits).ok_or(Error::InvalidRegisterValue(bits))
    }

    /// Set the full-scale range
    ///
    /// All other `DATA_FORMAT` bits are cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_data_range(&mut self, range: AccelRange) -> Result<(), Error<I::Error>> {
        self.device.data_format().write(|w| {
            w.set_range(range.bits());
        })?;
        Ok(())
    }

    /// Current output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn data_rate(&mut self) -> Result<AccelDataRate, Error<I::Error>> {
        let bits = self.device.bw_rate().read()?.rate();
        AccelDataRate::from_bits(bits).ok_or(Error::InvalidRegisterValue(bits))
    }

    /// Set the output data rate
    ///
    /// All other `BW_RATE` bits are cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_data_rate(&mut self, rate: AccelDataRate) -> Result<(), Error<I::Error>> {
        self.device.bw_rate().write(|w| {
            w.set_rate(rate.bits());
        })?;
        Ok(())
    }

    /// Store the zero-g offset in the onboard trim registers
    ///
    /// Offsets are the readings at rest in raw counts (x and y at 0g, z at
    /// 1g already removed). They are rescaled from the current range to the
    /// 15.6 mg/LSB trim scale and stored negated, since the device adds the
    /// trim to every sample.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::Offset`] if a scaled offset does not fit in a
    /// signed byte (nothing is written in that case), or an error if
    /// communication with the device fails.
    pub fn set_offset(&mut self, x: f32, y: f32, z: f32) -> Result<(), Error<I::Error>> {
        let range = self.data_range()?;
        let ratio = range.scale_factor() / OFFSET_REGISTER_SCALE_FACTOR;

        let mut trims = [0u8; 3];
        for (trim, offset) in trims.iter_mut().zip([x, y, z]) {
            *trim = TwosComplement::from_decimal(-(offset * ratio))
                .and_then(u8::try_from)
                .map_err(|_| Error::Range(RangeError::Offset))?;
        }

        for (register, trim) in adxl345::OFFSET_REGISTERS.into_iter().zip(trims) {
            self.device.interface.write_byte(register, trim)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("ADXL345 offset trim written: {:#04x}", trims);

        Ok(())
    }

    /// Read back the trim registers as signed values (15.6 mg/LSB)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn offset(&mut self) -> Result<[i8; 3], Error<I::Error>> {
        let mut trims = [0i8; 3];
        for (trim, register) in trims.iter_mut().zip(adxl345::OFFSET_REGISTERS) {
            let byte = self.device.interface.read_byte(register)?;
            *trim = i8::from_le_bytes([byte]);
        }
        Ok(trims)
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }
}

impl<I> super::Accelerometer for Adxl345<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    type BusError = I::Error;

    fn start(&mut self) -> Result<(), Error<I::Error>> {
        Adxl345::start(self)
    }

    fn read_raw(&mut self) -> Result<AccelData, Error<I::Error>> {
        self.read()
    }

    fn set_offset(&mut self, x: f32, y: f32, z: f32) -> Result<(), Error<I::Error>> {
        Adxl345::set_offset(self, x, y, z)
    }
}
