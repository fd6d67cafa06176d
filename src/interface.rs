//! Bus interface for the sensors
//!
//! [`I2cInterface`] adapts an `embedded-hal` I2C bus to the `device-driver`
//! register traits for one chip address. [`ByteRegisters`] is the plain
//! single-byte view of any such interface: one call, one bus transaction, no
//! interpretation of the data.

use device_driver::RegisterInterface;

/// I2C interface bound to one device address
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create an interface for the ADXL345 accelerometer (0x53)
    ///
    /// # Example
    /// ```ignore
    /// let accel = Adxl345::new(I2cInterface::adxl345(i2c));
    /// ```
    pub const fn adxl345(i2c: I2C) -> Self {
        Self::new(i2c, crate::ADXL345_ADDRESS)
    }

    /// Create an interface for the L3G4200D gyroscope (0x69)
    pub const fn l3g4200d(i2c: I2C) -> Self {
        Self::new(i2c, crate::L3G4200D_ADDRESS)
    }

    /// Create an interface with a custom device address
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral (or a shared-bus device handle)
    /// * `address` - The 7-bit I2C device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address this interface talks to
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits;
        // Register address followed by at most 8 data bytes
        let mut buffer = [0u8; 9];
        buffer[0] = address;
        let len = write_data.len().min(8);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}

/// Single-byte register access
///
/// Implemented for every `device-driver` register interface with 8-bit
/// addresses. No retries and no address validation happen here; errors come
/// back exactly as the bus reported them.
pub trait ByteRegisters {
    /// Bus error type
    type Error;

    /// Read one byte from `register`
    ///
    /// # Errors
    ///
    /// Returns the bus error if the transaction fails.
    fn read_byte(&mut self, register: u8) -> Result<u8, Self::Error>;

    /// Write one byte to `register`
    ///
    /// # Errors
    ///
    /// Returns the bus error if the transaction fails.
    fn write_byte(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;
}

impl<T> ByteRegisters for T
where
    T: RegisterInterface<AddressType = u8>,
{
    type Error = T::Error;

    fn read_byte(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut buffer = [0u8; 1];
        self.read_register(register, 8, &mut buffer)?;
        Ok(buffer[0])
    }

    fn write_byte(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.write_register(register, 8, &[value])
    }
}
