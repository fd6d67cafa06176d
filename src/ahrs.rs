//! Attitude and heading reference system
//!
//! Fuses accelerometer tilt with integrated gyro rates through a
//! complementary filter. High filter constants trust the gyro over short
//! periods; the accelerometer pulls the estimate back over long periods.
//!
//! # Example
//!
//! ```ignore
//! use imu_ahrs::{Adxl345, Ahrs, AhrsConfig, I2cInterface, L3g4200d};
//!
//! let accel = Adxl345::new(I2cInterface::adxl345(accel_bus));
//! let gyro = L3g4200d::new(I2cInterface::l3g4200d(gyro_bus));
//! let mut ahrs = Ahrs::start(accel, gyro, clock, AhrsConfig::default())?;
//!
//! loop {
//!     let attitude = ahrs.calculate()?;
//!     // feed attitude.pitch / attitude.roll to the stabilisation loop
//! }
//! ```

use core::time::Duration;

use crate::Error;
use crate::clock::TimeSource;
use crate::sensors::{AccelData, Accelerometer, Gyroscope};

/// Default complementary filter constant
pub const DEFAULT_FILTER_CONSTANT: f32 = 0.97;

/// Heading reported until compass fusion exists
pub const HEADING_PLACEHOLDER: f32 = 360.0;

/// Raw accelerometer reading of 1g at ±2g (3.9 mg/LSB)
const ONE_G_RAW_COUNTS: f32 = 256.0;

/// Estimator configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AhrsConfig {
    /// Complementary filter constant `k` in `[0, 1]`
    ///
    /// Higher values weight the integrated gyro, lower values the
    /// accelerometer tilt.
    pub filter_constant: f32,
}

impl Default for AhrsConfig {
    fn default() -> Self {
        Self {
            filter_constant: DEFAULT_FILTER_CONSTANT,
        }
    }
}

impl AhrsConfig {
    /// Check that the filter constant lies in `[0, 1]`
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.filter_constant)
    }
}

/// Orientation estimate in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attitude {
    /// Pitch in degrees
    pub pitch: f32,
    /// Roll in degrees
    pub roll: f32,
    /// Heading in degrees (always [`HEADING_PLACEHOLDER`])
    pub heading: f32,
}

/// Outcome of [`Ahrs::calibrate`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    /// Offsets handed to the accelerometer (raw counts, z with 1g removed)
    pub accel_offset: [f32; 3],
    /// Averaged gyroscope readings at rest (raw counts)
    pub gyro_offset: [f32; 3],
    /// Whether the gyroscope accepted its offsets
    pub gyro_offset_applied: bool,
}

/// Tilt implied by the gravity vector, as `(pitch, roll)` in degrees
///
/// The axis convention follows how the accelerometer is mounted on the frame.
#[must_use]
pub fn accel_tilt(accel: AccelData) -> (f32, f32) {
    let x = f32::from(accel.x);
    let y = f32::from(accel.y);
    let z = f32::from(accel.z);

    let pitch = libm::atan2f(-x, z);
    let roll = libm::atan2f(y, libm::sqrtf(x * x + z * z));
    (pitch.to_degrees(), roll.to_degrees())
}

/// Complementary-filter attitude estimator
///
/// Starts uninitialized. The first [`calculate`](Self::calculate) seeds the
/// estimate from the accelerometer and records a timestamp; every later call
/// integrates the gyro over the time since the previous one.
///
/// Calls must be serialized by the owner; the estimator holds no lock.
pub struct Ahrs<A, G, C> {
    accel: A,
    gyro: G,
    clock: C,
    filter_constant: f32,
    last_read_time: Option<Duration>,
    pitch: f32,
    roll: f32,
}

impl<A, G, C, E> Ahrs<A, G, C>
where
    A: Accelerometer<BusError = E>,
    G: Gyroscope<BusError = E>,
    C: TimeSource,
{
    /// Create an estimator with the default filter constant
    ///
    /// The sensors must already be started.
    pub fn new(accel: A, gyro: G, clock: C) -> Self {
        Self {
            accel,
            gyro,
            clock,
            filter_constant: DEFAULT_FILTER_CONSTANT,
            last_read_time: None,
            pitch: 0.0,
            roll: 0.0,
        }
    }

    /// Create an estimator with an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the filter constant is outside `[0, 1]`.
    pub fn with_config(accel: A, gyro: G, clock: C, config: AhrsConfig) -> Result<Self, Error<E>> {
        if !config.is_valid() {
            return Err(Error::InvalidConfig);
        }

        let mut ahrs = Self::new(accel, gyro, clock);
        ahrs.filter_constant = config.filter_constant;
        Ok(ahrs)
    }

    /// Start both sensors and create an estimator
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid (checked before any
    /// bus access) or if starting either sensor fails.
    pub fn start(mut accel: A, mut gyro: G, clock: C, config: AhrsConfig) -> Result<Self, Error<E>> {
        if !config.is_valid() {
            return Err(Error::InvalidConfig);
        }

        accel.start()?;
        gyro.start()?;

        #[cfg(feature = "defmt")]
        defmt::info!("AHRS started, k={}", config.filter_constant);

        Self::with_config(accel, gyro, clock, config)
    }

    /// Read both sensors and update the estimate
    ///
    /// Both sensors are read and the timestamp taken before any state
    /// changes, so a failed bus transaction leaves the estimator untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if reading either sensor fails.
    pub fn calculate(&mut self) -> Result<Attitude, Error<E>> {
        let (accel_pitch, accel_roll) = accel_tilt(self.accel.read_raw()?);
        let rates = self.gyro.read_rates()?;
        let now = self.clock.now();

        match self.last_read_time {
            None => {
                self.pitch = accel_pitch;
                self.roll = accel_roll;

                #[cfg(feature = "defmt")]
                defmt::debug!("AHRS seeded: pitch={} roll={}", self.pitch, self.roll);
            }
            Some(last) => {
                let dt = now.saturating_sub(last).as_secs_f32();
                let k = self.filter_constant;

                // Both axes blend towards the accelerometer roll
                self.pitch = k * (self.pitch + rates.x * dt) + (1.0 - k) * accel_roll;
                self.roll = k * (self.roll + rates.y * dt) + (1.0 - k) * accel_roll;
            }
        }

        self.last_read_time = Some(now);
        Ok(self.attitude())
    }

    /// Average sensor readings at rest and write them back as offsets
    ///
    /// The device must be level and still. The accelerometer z average has
    /// 1g (256 counts at ±2g) removed before it is stored. If the gyroscope
    /// cannot store offsets, the averages are still returned with
    /// [`Calibration::gyro_offset_applied`] cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for zero samples, or an error if a
    /// read or the accelerometer offset write fails.
    #[allow(clippy::cast_precision_loss)]
    pub fn calibrate(&mut self, samples: u16) -> Result<Calibration, Error<E>> {
        if samples == 0 {
            return Err(Error::InvalidConfig);
        }

        let mut gyro_sum = [0i64; 3];
        let mut accel_sum = [0i64; 3];
        for _ in 0..samples {
            let gyro = self.gyro.read_raw()?;
            let accel = self.accel.read_raw()?;
            for (sum, value) in gyro_sum.iter_mut().zip([gyro.x, gyro.y, gyro.z]) {
                *sum += i64::from(value);
            }
            for (sum, value) in accel_sum.iter_mut().zip([accel.x, accel.y, accel.z]) {
                *sum += i64::from(value);
            }
        }

        let n = f32::from(samples);
        let gyro_offset = gyro_sum.map(|sum| sum as f32 / n);
        let mut accel_offset = accel_sum.map(|sum| sum as f32 / n);
        accel_offset[2] -= ONE_G_RAW_COUNTS;

        let [ax, ay, az] = accel_offset;
        self.accel.set_offset(ax, ay, az)?;

        let [gx, gy, gz] = gyro_offset;
        let gyro_offset_applied = match self.gyro.set_offset(gx, gy, gz) {
            Ok(()) => true,
            Err(Error::Unsupported) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Gyroscope offset write-back not supported, offsets not applied");
                false
            }
            Err(e) => return Err(e),
        };

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Calibrated over {} samples: accel={} gyro={}",
            samples,
            accel_offset,
            gyro_offset
        );

        Ok(Calibration {
            accel_offset,
            gyro_offset,
            gyro_offset_applied,
        })
    }
}

impl<A, G, C> Ahrs<A, G, C> {
    /// Most recent estimate, without touching the bus
    #[must_use]
    pub const fn attitude(&self) -> Attitude {
        Attitude {
            pitch: self.pitch,
            roll: self.roll,
            heading: HEADING_PLACEHOLDER,
        }
    }

    /// Forget the previous timestamp so the next cycle re-seeds
    pub fn reset(&mut self) {
        self.last_read_time = None;
        self.pitch = 0.0;
        self.roll = 0.0;
    }

    /// Whether a previous timestamp exists for gyro integration
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.last_read_time.is_some()
    }

    /// Filter constant in use
    #[must_use]
    pub const fn filter_constant(&self) -> f32 {
        self.filter_constant
    }

    /// Mutable access to the accelerometer
    pub fn accelerometer_mut(&mut self) -> &mut A {
        &mut self.accel
    }

    /// Mutable access to the gyroscope
    pub fn gyroscope_mut(&mut self) -> &mut G {
        &mut self.gyro
    }

    /// Consume the estimator and return its collaborators
    pub fn release(self) -> (A, G, C) {
        (self.accel, self.gyro, self.clock)
    }
}
