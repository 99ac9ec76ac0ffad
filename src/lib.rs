//! Compensation math for the Bosch BME280 temperature, pressure and humidity
//! sensor.
//!
//! Raw calibration and sample bytes come from a [`Transport`]; a [`Bme280`]
//! session turns them into calibrated readings.
//!
//! ```
//! use bme280_compensation::{CalibrationTable, PressureUnit, RawSample, Units};
//!
//! # let trim = [
//! #     0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, 0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, 0x27, 0x0B,
//! #     0x8C, 0x00, 0xF9, 0xFF, 0x8C, 0x3C, 0xF8, 0xC6, 0x70, 0x17, 0x4B, 0x6D, 0x01, 0x00,
//! #     0x13, 0x28, 0x03, 0x1E,
//! # ];
//! let calibration = CalibrationTable::from_bytes(&trim)?;
//! let sample = RawSample::from_bytes(&[0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00, 0x75, 0x61])?;
//!
//! let (celsius, fine) = calibration.compensate_temperature(sample.temperature, Units::Metric);
//! let hpa = calibration.compensate_pressure(sample.pressure, fine, PressureUnit::Hectopascal)?;
//! let humidity = calibration.compensate_humidity(sample.humidity, fine);
//!
//! assert_eq!(format!("{celsius:.2} {hpa:.2} {humidity:.1}"), "25.08 1006.53 56.1");
//! # Ok::<(), bme280_compensation::Error>(())
//! ```

pub mod bme280;

pub use crate::bme280::*;
