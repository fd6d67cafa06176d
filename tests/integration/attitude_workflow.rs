//! Integration tests for the full sensor-to-attitude path

use core::time::Duration;

use crate::common::mock_interface::MockInterface;
use crate::common::{assert_float_eq, create_mock_accel, create_mock_gyro};
use imu_ahrs::{
    AccelDataRate, AccelRange, Adxl345, Ahrs, AhrsConfig, GyroRange, L3g4200d, ManualClock,
};

type MockAhrs = Ahrs<Adxl345<MockInterface>, L3g4200d<MockInterface>, ManualClock>;

fn start_ahrs() -> (MockAhrs, MockInterface, MockInterface) {
    let (accel, accel_bus) = create_mock_accel();
    let (gyro, gyro_bus) = create_mock_gyro();
    let clock = ManualClock::with_step(Duration::from_millis(10));
    let ahrs = Ahrs::start(accel, gyro, clock, AhrsConfig::default()).unwrap();
    (ahrs, accel_bus, gyro_bus)
}

#[test]
fn test_complete_initialization_workflow() {
    let (mut accel, accel_bus) = create_mock_accel();
    let (mut gyro, gyro_bus) = create_mock_gyro();

    assert_eq!(accel.device_id().unwrap(), imu_ahrs::ADXL345_DEVICE_ID);
    assert_eq!(gyro.device_id().unwrap(), imu_ahrs::L3G4200D_DEVICE_ID);

    accel.set_data_range(AccelRange::G2).unwrap();
    accel.set_data_rate(AccelDataRate::Hz100).unwrap();
    gyro.set_data_range(GyroRange::Dps2000).unwrap();

    let clock = ManualClock::with_step(Duration::from_millis(10));
    let _ahrs = Ahrs::start(accel, gyro, clock, AhrsConfig::default()).unwrap();

    assert_eq!(accel_bus.get_register(0x31), 0x00);
    assert_eq!(accel_bus.get_register(0x2C), 0x0A);
    assert_eq!(accel_bus.get_register(0x2D), 0x08);
    assert_eq!(gyro_bus.get_register(0x23), 0x20);
    assert_eq!(gyro_bus.get_register(0x20), 0x0F);
}

#[test]
fn test_seed_then_blend() {
    let (mut ahrs, accel_bus, gyro_bus) = start_ahrs();
    accel_bus.set_samples(1, 2, 254);
    gyro_bus.set_samples(0, 0, 0);

    let seeded = ahrs.calculate().unwrap();
    assert_float_eq(seeded.pitch, -0.225_572_77, 1e-4);
    assert_float_eq(seeded.roll, 0.451_135_05, 1e-4);
    assert_float_eq(seeded.heading, 360.0, f32::EPSILON);

    // 1000 counts at 2000 dps is 70 dps
    ahrs.gyroscope_mut()
        .set_data_range(GyroRange::Dps2000)
        .unwrap();
    gyro_bus.set_samples(1000, 0, 0);

    let attitude = ahrs.calculate().unwrap();
    assert_float_eq(attitude.pitch, 0.473_728, 1e-4);
    assert_float_eq(attitude.roll, 0.451_135_05, 1e-4);
}

#[test]
fn test_each_cycle_reads_both_sensors() {
    let (mut ahrs, accel_bus, gyro_bus) = start_ahrs();
    accel_bus.clear_operations();
    gyro_bus.clear_operations();

    ahrs.calculate().unwrap();

    assert_eq!(accel_bus.reads(), vec![0x32, 0x33, 0x34, 0x35, 0x36, 0x37]);
    // Six sample bytes, then CTRL_REG4 for the live range
    assert_eq!(
        gyro_bus.reads(),
        vec![0x28, 0x29, 0x2A, 0x2B, 0x2C, 0x2D, 0x23]
    );
}

#[test]
fn test_level_and_still_stays_level() {
    let (mut ahrs, accel_bus, gyro_bus) = start_ahrs();
    accel_bus.set_samples(0, 0, 256);
    gyro_bus.set_samples(0, 0, 0);

    for _ in 0..50 {
        let attitude = ahrs.calculate().unwrap();
        assert_float_eq(attitude.pitch, 0.0, 1e-4);
        assert_float_eq(attitude.roll, 0.0, 1e-4);
    }
}

#[test]
fn test_calibration_writes_accel_trim() {
    let (mut ahrs, accel_bus, gyro_bus) = start_ahrs();
    accel_bus.set_sample_sequence(vec![[2, -4, 260], [2, -4, 260]]);
    gyro_bus.set_samples(3, -1, 2);

    let calibration = ahrs.calibrate(8).unwrap();

    assert_float_eq(calibration.accel_offset[2], 4.0, 1e-4);
    assert_float_eq(calibration.gyro_offset[0], 3.0, 1e-4);
    assert!(!calibration.gyro_offset_applied);

    // At ±2g: 2 -> -0.5 -> -1, -4 -> 1, 4 -> -1
    assert_eq!(accel_bus.get_register(0x1E), 0xFF);
    assert_eq!(accel_bus.get_register(0x1F), 0x01);
    assert_eq!(accel_bus.get_register(0x20), 0xFF);
    assert_eq!(ahrs.accelerometer_mut().offset().unwrap(), [-1, 1, -1]);
}

#[test]
fn test_release_returns_drivers() {
    let (ahrs, accel_bus, _gyro_bus) = start_ahrs();

    let (mut accel, mut gyro, clock) = ahrs.release();
    accel.stop().unwrap();
    gyro.stop().unwrap();

    assert_eq!(accel_bus.get_register(0x2D), 0x00);
    assert_eq!(clock.peek(), Duration::ZERO);
}
