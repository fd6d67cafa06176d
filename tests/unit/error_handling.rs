//! Unit tests for error handling and recovery

use core::time::Duration;

use crate::common::fake_sensors::{FakeAccelerometer, FakeGyroscope};
use crate::common::{MockError, assert_float_eq, create_mock_accel, create_mock_gyro};
use imu_ahrs::{AccelRange, Ahrs, AhrsConfig, Error, GyroRange, ManualClock};

#[test]
fn test_read_failure_basic() {
    let (mut accel, interface) = create_mock_accel();

    interface.fail_next_read();

    let result = accel.read();
    assert_eq!(result, Err(Error::Bus(MockError::Communication)));
}

#[test]
fn test_read_failure_recovery() {
    let (mut accel, interface) = create_mock_accel();

    interface.fail_next_read();
    assert!(accel.read().is_err(), "First read should fail");

    interface.set_samples(100, 200, 300);

    // Subsequent read should succeed (error was only for one operation)
    let data = accel.read().unwrap();
    assert_eq!((data.x, data.y, data.z), (100, 200, 300));
}

#[test]
fn test_failed_read_is_not_retried() {
    let (mut gyro, interface) = create_mock_gyro();

    interface.fail_next_read();
    assert!(gyro.read_raw().is_err());

    assert!(interface.operations().is_empty(), "No retry expected");
}

#[test]
fn test_write_failure_basic() {
    let (mut gyro, interface) = create_mock_gyro();

    interface.fail_next_write();

    let result = gyro.set_data_range(GyroRange::Dps2000);
    assert_eq!(result, Err(Error::Bus(MockError::Communication)));
    assert_eq!(interface.get_register(0x23), 0x00);
}

#[test]
fn test_range_read_failure_blocks_offset_write() {
    let (mut accel, interface) = create_mock_accel();

    interface.fail_next_read();

    assert!(accel.set_offset(4.0, 4.0, 4.0).is_err());
    assert!(interface.writes().is_empty());
}

#[test]
fn test_offset_write_failure() {
    let (mut accel, interface) = create_mock_accel();
    accel.set_data_range(AccelRange::G2).unwrap();

    interface.fail_next_write();

    let result = accel.set_offset(4.0, 0.0, 0.0);
    assert_eq!(result, Err(Error::Bus(MockError::Communication)));
}

#[test]
fn test_gyro_failure_leaves_estimate_untouched() {
    let accel = FakeAccelerometer::new(vec![[0, 0, 256]]);
    let gyro = FakeGyroscope::with_rates(vec![[100.0, 0.0, 0.0]]);
    let clock = ManualClock::with_step(Duration::from_millis(10));
    let config = AhrsConfig {
        filter_constant: 1.0,
    };
    let mut ahrs = Ahrs::with_config(accel, gyro, clock, config).unwrap();

    ahrs.calculate().unwrap();
    let before = ahrs.attitude();

    ahrs.gyroscope_mut().fail_next_read = true;
    assert_eq!(
        ahrs.calculate(),
        Err(Error::Bus(MockError::Communication))
    );
    assert_eq!(ahrs.attitude(), before);
    assert!(ahrs.is_tracking());

    // The failed cycle consumed no timestamp, so dt is one step
    let attitude = ahrs.calculate().unwrap();
    assert_float_eq(attitude.pitch, 1.0, 1e-4);
}

#[test]
fn test_accel_failure_leaves_estimate_untouched() {
    let accel = FakeAccelerometer::new(vec![[0, 256, 256]]);
    let clock = ManualClock::with_step(Duration::from_millis(10));
    let mut ahrs = Ahrs::new(accel, FakeGyroscope::still(), clock);

    ahrs.accelerometer_mut().fail_next_read = true;
    assert!(ahrs.calculate().is_err());
    assert!(!ahrs.is_tracking(), "A failed first cycle must not seed");

    let attitude = ahrs.calculate().unwrap();
    assert_float_eq(attitude.roll, 45.0, 1e-3);

    let (_, _, clock) = ahrs.release();
    assert_eq!(clock.peek(), Duration::from_millis(10));
}
