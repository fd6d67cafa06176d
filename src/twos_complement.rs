//! Two's-complement codec for sensor registers
//!
//! Both sensors report signed samples as one or two raw bytes. This module
//! turns those bytes into signed integers and turns signed values back into
//! register bytes (for the accelerometer's offset-trim registers).

use crate::RangeError;

/// Bit width of a two's-complement value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Width {
    /// Single register byte
    Bits8 = 8,
    /// Low/high register pair
    Bits16 = 16,
}

impl Width {
    /// Number of bits
    #[must_use]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Smallest representable value at this width
    #[must_use]
    pub const fn min(self) -> i32 {
        -(1 << (self.bits() - 1))
    }

    /// Largest representable value at this width
    #[must_use]
    pub const fn max(self) -> i32 {
        (1 << (self.bits() - 1)) - 1
    }

    const fn modulus(self) -> i32 {
        1 << self.bits()
    }
}

/// A signed register value stored as its raw two's-complement bit pattern
///
/// The raw pattern is always canonical for the width: it lies in
/// `[0, 2^width)` and decodes back to the value it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TwosComplement {
    raw: u16,
    width: Width,
}

impl TwosComplement {
    /// Build an 8-bit value from a single register byte
    #[must_use]
    pub const fn from_lsb(lsb: u8) -> Self {
        Self {
            raw: lsb as u16,
            width: Width::Bits8,
        }
    }

    /// Build a 16-bit value from a low/high register pair
    #[must_use]
    pub const fn from_lsb_msb(lsb: u8, msb: u8) -> Self {
        Self {
            raw: ((msb as u16) << 8) | lsb as u16,
            width: Width::Bits16,
        }
    }

    /// Encode a signed integer, picking the narrowest width that holds it
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::Decimal`] if `value` is outside `[-32768, 32767]`.
    pub const fn from_i32(value: i32) -> Result<Self, RangeError> {
        let width = if value >= Width::Bits8.min() && value <= Width::Bits8.max() {
            Width::Bits8
        } else if value >= Width::Bits16.min() && value <= Width::Bits16.max() {
            Width::Bits16
        } else {
            return Err(RangeError::Decimal);
        };

        let raw = if value < 0 {
            width.modulus() + value
        } else {
            value
        };

        // raw is in [0, 2^16) after the range check above
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let raw = raw as u16;
        Ok(Self { raw, width })
    }

    /// Encode a decimal value
    ///
    /// The value is rounded to the nearest integer, with ties going away from
    /// zero, before encoding.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::Decimal`] if the rounded value is outside
    /// `[-32768, 32767]` or `decimal` is not finite.
    pub fn from_decimal(decimal: f32) -> Result<Self, RangeError> {
        if !decimal.is_finite() {
            return Err(RangeError::Decimal);
        }

        let rounded = libm::roundf(decimal);
        if !(-32768.0..=32767.0).contains(&rounded) {
            return Err(RangeError::Decimal);
        }

        // Bounds checked above, the cast is exact
        #[allow(clippy::cast_possible_truncation)]
        let value = rounded as i32;
        Self::from_i32(value)
    }

    /// Signed value represented by the bit pattern
    #[must_use]
    pub const fn as_dec(self) -> i32 {
        let raw = self.raw as i32;
        let sign_bit = raw >> (self.width.bits() - 1);
        if sign_bit == 1 {
            raw - self.width.modulus()
        } else {
            raw
        }
    }

    /// Raw two's-complement bit pattern
    #[must_use]
    pub const fn as_bin(self) -> u16 {
        self.raw
    }

    /// Width of the value
    #[must_use]
    pub const fn width(self) -> Width {
        self.width
    }

    /// Least significant byte of the pattern
    #[must_use]
    pub const fn lsb(self) -> u8 {
        (self.raw & 0xFF) as u8
    }

    /// Most significant byte, `None` for 8-bit values
    #[must_use]
    pub const fn msb(self) -> Option<u8> {
        match self.width {
            Width::Bits8 => None,
            Width::Bits16 => Some((self.raw >> 8) as u8),
        }
    }

    /// Pattern as little-endian bytes, high byte zero for 8-bit values
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 2] {
        self.raw.to_le_bytes()
    }
}

impl TryFrom<TwosComplement> for u8 {
    type Error = RangeError;

    /// Only 8-bit values fit a single byte
    fn try_from(value: TwosComplement) -> Result<Self, Self::Error> {
        match value.width {
            Width::Bits8 => Ok(value.lsb()),
            Width::Bits16 => Err(RangeError::Decimal),
        }
    }
}

impl From<TwosComplement> for i32 {
    fn from(value: TwosComplement) -> Self {
        value.as_dec()
    }
}

/// Decode a little-endian register pair into a signed sample
///
/// A 16-bit pattern always decodes into `i16` range.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn decode_pair(lsb: u8, msb: u8) -> i16 {
    TwosComplement::from_lsb_msb(lsb, msb).as_dec() as i16
}
