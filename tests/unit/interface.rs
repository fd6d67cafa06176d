//! Unit tests for the I2C register interface

use crate::common::mock_i2c::{MockI2c, Transaction};
use embedded_hal::i2c::ErrorKind;
use imu_ahrs::{Adxl345, ByteRegisters, Error, I2cInterface, L3g4200d};

#[test]
fn test_default_addresses() {
    assert_eq!(I2cInterface::adxl345(MockI2c::new()).address(), 0x53);
    assert_eq!(I2cInterface::l3g4200d(MockI2c::new()).address(), 0x69);
    assert_eq!(I2cInterface::new(MockI2c::new(), 0x1D).address(), 0x1D);
}

#[test]
fn test_read_byte_is_write_then_read() {
    let mut i2c = MockI2c::new();
    i2c.set_register(0x53, 0x32, 0xAB);
    let mut interface = I2cInterface::adxl345(i2c);

    assert_eq!(interface.read_byte(0x32).unwrap(), 0xAB);

    let i2c = interface.release();
    assert_eq!(
        i2c.transactions(),
        &[Transaction {
            address: 0x53,
            written: vec![0x32],
            read_len: 1,
        }]
    );
}

#[test]
fn test_write_byte_sends_register_then_value() {
    let mut interface = I2cInterface::l3g4200d(MockI2c::new());

    interface.write_byte(0x20, 0x0F).unwrap();

    let i2c = interface.release();
    assert_eq!(i2c.get_register(0x69, 0x20), 0x0F);
    assert_eq!(
        i2c.transactions(),
        &[Transaction {
            address: 0x69,
            written: vec![0x20, 0x0F],
            read_len: 0,
        }]
    );
}

#[test]
fn test_bus_error_is_returned_unchanged() {
    let mut i2c = MockI2c::new();
    i2c.fail_next();
    let mut interface = I2cInterface::adxl345(i2c);

    assert_eq!(interface.read_byte(0x00), Err(ErrorKind::Bus));
    // Only the failed transaction is affected
    assert_eq!(interface.read_byte(0x00), Ok(0));
}

#[test]
fn test_drivers_over_i2c() {
    let mut i2c = MockI2c::new();
    i2c.set_register(0x53, 0x00, 0xE5);
    i2c.set_register(0x53, 0x32, 0x10);
    i2c.set_register(0x53, 0x33, 0xFF);

    let mut accel = Adxl345::new(I2cInterface::adxl345(i2c));
    assert_eq!(accel.device_id().unwrap(), 0xE5);
    accel.start().unwrap();
    assert_eq!(accel.read().unwrap().x, -240);

    let i2c = accel.release().release();
    assert_eq!(i2c.get_register(0x53, 0x2D), 0x08);
    // DEVID, POWER_CTL, then six sample bytes
    assert_eq!(i2c.transactions().len(), 8);

    let mut gyro = L3g4200d::new(I2cInterface::l3g4200d(i2c));
    gyro.start().unwrap();
    let i2c = gyro.release().release();
    assert_eq!(i2c.get_register(0x69, 0x20), 0x0F);
}

#[test]
fn test_driver_wraps_bus_error() {
    let mut i2c = MockI2c::new();
    i2c.fail_next();
    let mut gyro = L3g4200d::new(I2cInterface::l3g4200d(i2c));

    assert_eq!(gyro.start(), Err(Error::Bus(ErrorKind::Bus)));
}
