#![allow(dead_code)]

use std::collections::VecDeque;

use bme280_compensation::{Config, Error, ErrorKind, Transport};

/// Trim block of the datasheet worked example (T1..P9) with the humidity trim
/// of a typical part (H1=75, H2=365, H3=0, H4=312, H5=50, H6=30).
pub const DATASHEET_CALIBRATION: [u8; 32] = [
    0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, // T1..T3
    0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, 0x27, 0x0B, 0x8C, 0x00, 0xF9, 0xFF, 0x8C, 0x3C, 0xF8,
    0xC6, 0x70, 0x17, // P1..P9
    0x4B, // H1
    0x6D, 0x01, 0x00, 0x13, 0x28, 0x03, 0x1E, // H2..H6
];

/// adc_P = 415148, adc_T = 519888, adc_H = 30049
pub const DATASHEET_SAMPLE: [u8; 8] = [0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00, 0x75, 0x61];

pub const DATASHEET_FINE_TEMPERATURE: i32 = 128422;
pub const DATASHEET_CELSIUS: f64 = 25.08;
pub const DATASHEET_PASCALS: f64 = 25767233.0 / 256.0;
pub const DATASHEET_HUMIDITY: f64 = 57435.0 / 1024.0;

/// In-memory transport replaying queued responses.
#[derive(Default)]
pub struct ScriptedTransport {
    pub pushed: Vec<Config>,
    pub calibrations: VecDeque<Vec<u8>>,
    pub reject_configuration: bool,
    pub samples: VecDeque<Result<Vec<u8>, ErrorKind>>,
    pub sample_fetches: usize,
}

impl ScriptedTransport {
    pub fn with_calibration(calibration: &[u8]) -> Self {
        Self {
            calibrations: VecDeque::from([calibration.to_vec()]),
            ..Self::default()
        }
    }

    pub fn queue_calibration(&mut self, calibration: &[u8]) -> &mut Self {
        self.calibrations.push_back(calibration.to_vec());
        self
    }

    pub fn queue_sample(&mut self, sample: &[u8]) -> &mut Self {
        self.samples.push_back(Ok(sample.to_vec()));
        self
    }

    pub fn queue_failure(&mut self, kind: ErrorKind) -> &mut Self {
        self.samples.push_back(Err(kind));
        self
    }
}

impl Transport for ScriptedTransport {
    fn push_configuration(&mut self, config: &Config) -> Result<(), Error> {
        self.pushed.push(*config);
        if self.reject_configuration {
            return Err(Error::new(ErrorKind::Bus, "configuration write not acknowledged"));
        }
        Ok(())
    }

    fn fetch_calibration(&mut self) -> Result<Vec<u8>, Error> {
        self.calibrations
            .pop_front()
            .ok_or_else(|| Error::new(ErrorKind::Bus, "no calibration scripted"))
    }

    fn fetch_sample(&mut self) -> Result<Vec<u8>, Error> {
        self.sample_fetches += 1;
        match self.samples.pop_front() {
            Some(Ok(bytes)) => Ok(bytes),
            Some(Err(kind)) => Err(kind.into()),
            None => Ok(Vec::new()),
        }
    }
}
