use std::fmt;

use super::error::{Error, ErrorKind};

/// Length of the press/temp/hum register burst.
pub const SAMPLE_LEN: usize = 8;

/// Uncompensated ADC words of one measurement cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    /// 20 bit
    pub pressure: u32,
    /// 20 bit
    pub temperature: u32,
    pub humidity: u16,
}

impl RawSample {
    /// Unpacks `press_msb, press_lsb, press_xlsb, temp_msb, temp_lsb, temp_xlsb,
    /// hum_msb, hum_lsb`. The low nibble of each xlsb byte is discarded.
    pub fn from_bytes(input: &[u8]) -> Result<RawSample, Error> {
        let input: &[u8; SAMPLE_LEN] = input
            .try_into()
            .map_err(|_| Error::from(ErrorKind::IncompleteSample))?;

        Ok(RawSample {
            pressure: adc20(input[0], input[1], input[2]),
            temperature: adc20(input[3], input[4], input[5]),
            humidity: u16::from_be_bytes([input[6], input[7]]),
        })
    }
}

fn adc20(msb: u8, lsb: u8, xlsb: u8) -> u32 {
    (msb as u32) << 12 | (lsb as u32) << 4 | (xlsb as u32) >> 4
}

/// Intermediate temperature term shared by the pressure and humidity formulas.
///
/// Only [`CalibrationTable::compensate_temperature`] creates one, so a value
/// always belongs to the sample it was computed from.
///
/// [`CalibrationTable::compensate_temperature`]: super::calibration::CalibrationTable::compensate_temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FineTemperature(pub(crate) i32);

impl FineTemperature {
    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Unit system used for temperature, altitude and dew point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    /// °C, metres
    #[default]
    Metric,
    /// °F, feet
    Imperial,
}

impl Units {
    pub fn is_metric(&self) -> bool {
        matches!(self, Units::Metric)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressureUnit {
    #[default]
    Pascal = 0,
    Hectopascal = 1,
    InchMercury = 2,
    Atmosphere = 3,
    Bar = 4,
    Torr = 5,
    NewtonPerSquareMetre = 6,
    Psi = 7,
}

impl PressureUnit {
    /// Pascals per one of this unit.
    pub fn pascals(&self) -> f64 {
        use PressureUnit::*;
        match *self {
            Pascal | NewtonPerSquareMetre => 1.0,
            Hectopascal => 100.0,
            InchMercury => 3386.3752577878,
            Atmosphere => 101324.99766353,
            Bar => 100_000.0,
            Torr => 133.32236534674,
            Psi => 6894.744825494,
        }
    }

    pub fn convert(&self, pascals: f64) -> f64 {
        match *self {
            PressureUnit::Pascal | PressureUnit::NewtonPerSquareMetre => pascals,
            unit => pascals / unit.pascals(),
        }
    }

    pub fn symbol(&self) -> &'static str {
        use PressureUnit::*;
        match *self {
            Pascal => "Pa",
            Hectopascal => "hPa",
            InchMercury => "inHg",
            Atmosphere => "atm",
            Bar => "bar",
            Torr => "Torr",
            NewtonPerSquareMetre => "N/m²",
            Psi => "psi",
        }
    }
}

/// Unknown selectors read as Pascals.
impl From<u8> for PressureUnit {
    fn from(value: u8) -> Self {
        use PressureUnit::*;
        match value {
            1 => Hectopascal,
            2 => InchMercury,
            3 => Atmosphere,
            4 => Bar,
            5 => Torr,
            6 => NewtonPerSquareMetre,
            7 => Psi,
            _ => Pascal,
        }
    }
}

/// One compensated reading. A field is NaN when it could not be produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub pressure: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub units: Units,
    pub pressure_unit: PressureUnit,
}

impl Measurement {
    pub fn unavailable(units: Units, pressure_unit: PressureUnit) -> Measurement {
        Measurement {
            pressure: f64::NAN,
            temperature: f64::NAN,
            humidity: f64::NAN,
            units,
            pressure_unit,
        }
    }

    pub fn is_complete(&self) -> bool {
        !(self.pressure.is_nan() || self.temperature.is_nan() || self.humidity.is_nan())
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let degrees = if self.units.is_metric() { "°C" } else { "°F" };
        write!(
            f,
            "temperature: {:.2}{}, pressure: {:.2} {}, humidity: {:.2}%",
            self.temperature,
            degrees,
            self.pressure,
            self.pressure_unit.symbol(),
            self.humidity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_packed_adc_words() {
        let sample =
            RawSample::from_bytes(&[0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00, 0x75, 0x61]).unwrap();
        assert_eq!(sample.pressure, 415148);
        assert_eq!(sample.temperature, 519888);
        assert_eq!(sample.humidity, 30049);
    }

    #[test]
    fn xlsb_low_nibble_is_dropped() {
        let sample =
            RawSample::from_bytes(&[0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x0F, 0xFF, 0xFF]).unwrap();
        assert_eq!(sample.pressure, 0xF_FFFF);
        assert_eq!(sample.temperature, 0);
        assert_eq!(sample.humidity, 0xFFFF);
    }

    #[test]
    fn short_sample_is_rejected() {
        for len in 0..SAMPLE_LEN {
            let err = RawSample::from_bytes(&vec![0x80; len]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::IncompleteSample);
        }
        let err = RawSample::from_bytes(&[0; SAMPLE_LEN + 1]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompleteSample);
    }

    #[test]
    fn unknown_pressure_selector_is_pascal() {
        assert_eq!(PressureUnit::from(1), PressureUnit::Hectopascal);
        assert_eq!(PressureUnit::from(7), PressureUnit::Psi);
        assert_eq!(PressureUnit::from(8), PressureUnit::Pascal);
        assert_eq!(PressureUnit::from(0xFF), PressureUnit::Pascal);
    }

    #[test]
    fn display_uses_selected_units() {
        let measurement = Measurement {
            pressure: 1006.5325,
            temperature: 25.08,
            humidity: 56.0888,
            units: Units::Metric,
            pressure_unit: PressureUnit::Hectopascal,
        };
        assert_eq!(
            measurement.to_string(),
            "temperature: 25.08°C, pressure: 1006.53 hPa, humidity: 56.09%"
        );
    }

    #[test]
    fn unavailable_reading_is_all_nan() {
        let measurement = Measurement::unavailable(Units::Imperial, PressureUnit::Bar);
        assert!(measurement.pressure.is_nan());
        assert!(measurement.temperature.is_nan());
        assert!(measurement.humidity.is_nan());
        assert!(!measurement.is_complete());
    }
}
