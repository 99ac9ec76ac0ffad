#![deny(unsafe_code)]

pub mod calibration;
pub mod config;
pub mod derived;
pub mod error;
pub mod i2c;
pub mod measurement;
pub mod register;

use log::{debug, info, warn};

pub use calibration::{CalibrationTable, CALIBRATION_LEN};
pub use config::{Config, DeviceAddr, Filter, Mode, Oversampling, StandbyTime};
pub use derived::STANDARD_SEA_LEVEL_PRESSURE;
pub use error::{Error, ErrorKind};
pub use i2c::I2cTransport;
pub use measurement::{
    FineTemperature, Measurement, PressureUnit, RawSample, Units, SAMPLE_LEN,
};

/// Moves raw bytes between the device and a session.
///
/// Fetches are best effort: a short block is reported by the session as an
/// incomplete transfer rather than by the transport.
pub trait Transport {
    /// Writes the acquisition settings. Called once, before the calibration
    /// block is fetched.
    fn push_configuration(&mut self, config: &Config) -> Result<(), Error>;

    /// Up to [`CALIBRATION_LEN`] trim bytes.
    fn fetch_calibration(&mut self) -> Result<Vec<u8>, Error>;

    /// Up to [`SAMPLE_LEN`] sample bytes.
    fn fetch_sample(&mut self) -> Result<Vec<u8>, Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn push_configuration(&mut self, config: &Config) -> Result<(), Error> {
        (**self).push_configuration(config)
    }

    fn fetch_calibration(&mut self) -> Result<Vec<u8>, Error> {
        (**self).fetch_calibration()
    }

    fn fetch_sample(&mut self) -> Result<Vec<u8>, Error> {
        (**self).fetch_sample()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Ready,
}

/// One BME280 device: its transport and, once started, its calibration.
///
/// Every read polls a fresh sample and runs temperature compensation first,
/// feeding its fine temperature into pressure and humidity. A failed poll
/// yields NaN and leaves the session usable.
pub struct Bme280<T> {
    transport: T,
    config: Option<Config>,
    calibration: Option<CalibrationTable>,
}

impl<T: Transport> Bme280<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            config: None,
            calibration: None,
        }
    }

    /// Pushes `config` to the device and loads its calibration. A failed
    /// configuration write is only logged; a failed calibration load leaves the
    /// session uninitialized.
    pub fn begin(&mut self, config: Config) -> Result<(), Error> {
        self.calibration = None;
        self.config = None;

        if let Err(err) = self.transport.push_configuration(&config) {
            warn!("bme280 configuration not applied: {}", err);
        }
        let raw = self.transport.fetch_calibration()?;
        let calibration = CalibrationTable::from_bytes(&raw)?;

        info!("bme280 at {:#04x} ready", config.address.address());

        self.config = Some(config);
        self.calibration = Some(calibration);

        Ok(())
    }

    pub fn state(&self) -> SessionState {
        match self.calibration {
            Some(_) => SessionState::Ready,
            None => SessionState::Uninitialized,
        }
    }

    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    pub fn calibration(&self) -> Option<&CalibrationTable> {
        self.calibration.as_ref()
    }

    pub fn release(self) -> T {
        self.transport
    }

    pub fn read_temperature(&mut self, units: Units) -> f64 {
        match self.poll() {
            Ok((calibration, sample)) => {
                let (temperature, _) =
                    calibration.compensate_temperature(sample.temperature, units);
                temperature
            }
            Err(err) => unavailable(err),
        }
    }

    pub fn read_pressure(&mut self, unit: PressureUnit) -> f64 {
        match self.poll() {
            Ok((calibration, sample)) => {
                let (_, fine) =
                    calibration.compensate_temperature(sample.temperature, Units::Metric);
                calibration
                    .compensate_pressure(sample.pressure, fine, unit)
                    .unwrap_or_else(unavailable)
            }
            Err(err) => unavailable(err),
        }
    }

    pub fn read_humidity(&mut self) -> f64 {
        match self.poll() {
            Ok((calibration, sample)) => {
                let (_, fine) =
                    calibration.compensate_temperature(sample.temperature, Units::Metric);
                calibration.compensate_humidity(sample.humidity, fine)
            }
            Err(err) => unavailable(err),
        }
    }

    /// Reads all three channels from a single sample.
    pub fn read_all(&mut self, units: Units, pressure_unit: PressureUnit) -> Measurement {
        let (calibration, sample) = match self.poll() {
            Ok(polled) => polled,
            Err(err) => {
                unavailable(err);
                return Measurement::unavailable(units, pressure_unit);
            }
        };

        let (temperature, fine) = calibration.compensate_temperature(sample.temperature, units);
        let pressure = calibration
            .compensate_pressure(sample.pressure, fine, pressure_unit)
            .unwrap_or_else(unavailable);
        let humidity = calibration.compensate_humidity(sample.humidity, fine);

        let measurement = Measurement {
            pressure,
            temperature,
            humidity,
            units,
            pressure_unit,
        };
        debug!("{}", measurement);

        measurement
    }

    /// Altitude from a fresh pressure reading in Pascals.
    pub fn altitude(&mut self, units: Units, sea_level_pressure: f64) -> f64 {
        let measurement = self.read_all(units, PressureUnit::Pascal);
        derived::altitude(measurement.pressure, sea_level_pressure, units)
    }

    pub fn dew_point(&mut self, units: Units) -> f64 {
        let measurement = self.read_all(units, PressureUnit::Pascal);
        derived::dew_point(measurement.temperature, measurement.humidity, units)
    }

    fn poll(&mut self) -> Result<(&CalibrationTable, RawSample), Error> {
        let calibration = self.calibration.as_ref().ok_or(ErrorKind::NotInitialized)?;
        let raw = self.transport.fetch_sample()?;
        let sample = RawSample::from_bytes(&raw)?;

        debug!("raw sample: {:?}", sample);

        Ok((calibration, sample))
    }
}

fn unavailable(err: Error) -> f64 {
    warn!("bme280 reading unavailable: {}", err);
    f64::NAN
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl Transport for Silent {
        fn push_configuration(&mut self, _config: &Config) -> Result<(), Error> {
            Ok(())
        }

        fn fetch_calibration(&mut self) -> Result<Vec<u8>, Error> {
            Ok(Vec::new())
        }

        fn fetch_sample(&mut self) -> Result<Vec<u8>, Error> {
            Ok(vec![0; SAMPLE_LEN])
        }
    }

    #[test]
    fn uninitialized_session_reads_nan() {
        let mut sensor = Bme280::new(Silent);
        assert_eq!(sensor.state(), SessionState::Uninitialized);
        assert!(sensor.read_temperature(Units::Metric).is_nan());
        assert!(sensor.read_pressure(PressureUnit::Pascal).is_nan());
        assert!(sensor.read_humidity().is_nan());
        assert!(!sensor.read_all(Units::Metric, PressureUnit::Bar).is_complete());
    }

    #[test]
    fn empty_calibration_keeps_session_uninitialized() {
        let mut sensor = Bme280::new(Silent);
        let err = sensor.begin(Config::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompleteCalibration);
        assert_eq!(sensor.state(), SessionState::Uninitialized);
        assert!(sensor.config().is_none());
    }
}
