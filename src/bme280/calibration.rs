use std::num::Wrapping;

use log::debug;

use super::error::{Error, ErrorKind};
use super::measurement::{FineTemperature, PressureUnit, Units};

/// Length of the concatenated trim blocks: 6 temperature, 18 pressure,
/// 1 + 7 humidity bytes.
pub const CALIBRATION_LEN: usize = 32;

macro_rules! concat_bytes {
    (@le $x:ty, $msb:expr, $lsb:expr) => {
        ($msb as $x) << 8 | ($lsb as $x)
    };
    ($x:ty, $v:expr, $i:expr) => {
        concat_bytes!(@le $x, $v[$i + 1], $v[$i])
    };
}

/// Where a coefficient lives in the trim block and how its bits are laid out.
#[derive(Debug, Clone, Copy)]
enum Field {
    U16(usize),
    I16(usize),
    U8(usize),
    I8(usize),
    /// Signed msb byte at `.0`, value in the low nibble of the shared byte `.1`.
    LowNibble(usize, usize),
    /// Signed msb byte at `.0`, value in the high nibble of the shared byte `.1`.
    HighNibble(usize, usize),
}

impl Field {
    fn read(self, raw: &[u8; CALIBRATION_LEN]) -> i32 {
        match self {
            Field::U16(i) => concat_bytes!(u16, raw, i) as i32,
            Field::I16(i) => concat_bytes!(i16, raw, i) as i32,
            Field::U8(i) => raw[i] as i32,
            Field::I8(i) => raw[i] as i8 as i32,
            Field::LowNibble(msb, shared) => {
                (raw[msb] as i8 as i32) << 4 | (raw[shared] & 0x0F) as i32
            }
            Field::HighNibble(msb, shared) => {
                (raw[msb] as i8 as i32) << 4 | (raw[shared] >> 4) as i32
            }
        }
    }
}

const DIG_T1: Field = Field::U16(0);
const DIG_T2: Field = Field::I16(2);
const DIG_T3: Field = Field::I16(4);

const DIG_P1: Field = Field::U16(6);
const DIG_P2: Field = Field::I16(8);
const DIG_P3: Field = Field::I16(10);
const DIG_P4: Field = Field::I16(12);
const DIG_P5: Field = Field::I16(14);
const DIG_P6: Field = Field::I16(16);
const DIG_P7: Field = Field::I16(18);
const DIG_P8: Field = Field::I16(20);
const DIG_P9: Field = Field::I16(22);

// H1/H3 are unsigned and the H4/H5 msb is sign extended, as in the Bosch API.
// Drivers that read H1/H3 as int8 and shift the msb unsigned differ only for bytes >= 0x80.
const DIG_H1: Field = Field::U8(24);
const DIG_H2: Field = Field::I16(25);
const DIG_H3: Field = Field::U8(27);
const DIG_H4: Field = Field::LowNibble(28, 29);
const DIG_H5: Field = Field::HighNibble(30, 29);
const DIG_H6: Field = Field::I8(31);

/// Factory trim values of one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationTable {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,

    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,

    pub dig_h1: u8,
    pub dig_h2: i16,
    pub dig_h3: u8,
    pub dig_h4: i16,
    pub dig_h5: i16,
    pub dig_h6: i8,
}

impl CalibrationTable {
    /// Decodes the trim block. Any bit pattern is accepted; only the length is
    /// checked.
    pub fn from_bytes(input: &[u8]) -> Result<CalibrationTable, Error> {
        let raw: &[u8; CALIBRATION_LEN] = input
            .try_into()
            .map_err(|_| Error::from(ErrorKind::IncompleteCalibration))?;

        let cal = CalibrationTable {
            dig_t1: DIG_T1.read(raw) as u16,
            dig_t2: DIG_T2.read(raw) as i16,
            dig_t3: DIG_T3.read(raw) as i16,

            dig_p1: DIG_P1.read(raw) as u16,
            dig_p2: DIG_P2.read(raw) as i16,
            dig_p3: DIG_P3.read(raw) as i16,
            dig_p4: DIG_P4.read(raw) as i16,
            dig_p5: DIG_P5.read(raw) as i16,
            dig_p6: DIG_P6.read(raw) as i16,
            dig_p7: DIG_P7.read(raw) as i16,
            dig_p8: DIG_P8.read(raw) as i16,
            dig_p9: DIG_P9.read(raw) as i16,

            dig_h1: DIG_H1.read(raw) as u8,
            dig_h2: DIG_H2.read(raw) as i16,
            dig_h3: DIG_H3.read(raw) as u8,
            dig_h4: DIG_H4.read(raw) as i16,
            dig_h5: DIG_H5.read(raw) as i16,
            dig_h6: DIG_H6.read(raw) as i8,
        };

        debug!("decoded calibration: {:?}", cal);

        Ok(cal)
    }

    /// Returns the temperature in `units` and the fine temperature needed by
    /// the pressure and humidity formulas of the same sample.
    pub fn compensate_temperature(
        &self,
        raw_temperature: u32,
        units: Units,
    ) -> (f64, FineTemperature) {
        let adc = Wrapping(raw_temperature as i32);
        let t1 = Wrapping(self.dig_t1 as i32);
        let t2 = Wrapping(self.dig_t2 as i32);
        let t3 = Wrapping(self.dig_t3 as i32);

        let var1 = (((adc >> 3) - (t1 << 1)) * t2) >> 11;
        let var2 = (((((adc >> 4) - t1) * ((adc >> 4) - t1)) >> 12) * t3) >> 14;
        let t_fine = var1 + var2;

        // hundredths of a degree Celsius
        let centi_celsius = (t_fine * Wrapping(5) + Wrapping(128)) >> 8;
        let celsius = centi_celsius.0 as f64 / 100.0;

        let temperature = match units {
            Units::Metric => celsius,
            Units::Imperial => celsius * 9.0 / 5.0 + 32.0,
        };

        (temperature, FineTemperature(t_fine.0))
    }

    /// Pressure in Pascals as the Q24.8 integer produced by the 64-bit formula.
    pub fn compensate_pressure_q24_8(
        &self,
        raw_pressure: u32,
        fine: FineTemperature,
    ) -> Result<u32, Error> {
        let p1 = Wrapping(self.dig_p1 as i64);
        let p2 = Wrapping(self.dig_p2 as i64);
        let p3 = Wrapping(self.dig_p3 as i64);
        let p4 = Wrapping(self.dig_p4 as i64);
        let p5 = Wrapping(self.dig_p5 as i64);
        let p6 = Wrapping(self.dig_p6 as i64);
        let p7 = Wrapping(self.dig_p7 as i64);
        let p8 = Wrapping(self.dig_p8 as i64);
        let p9 = Wrapping(self.dig_p9 as i64);

        let mut var1 = Wrapping(fine.0 as i64) - Wrapping(128000);
        let mut var2 = var1 * var1 * p6;
        var2 += (var1 * p5) << 17;
        var2 += p4 << 35;
        var1 = ((var1 * var1 * p3) >> 8) + ((var1 * p2) << 12);
        var1 = ((Wrapping(1i64 << 47) + var1) * p1) >> 33;

        if var1.0 == 0 {
            return Err(ErrorKind::DivisionByZero.into());
        }

        let mut pressure = Wrapping(1_048_576i64) - Wrapping(raw_pressure as i64);
        pressure = (((pressure << 31) - var2) * Wrapping(3125)) / var1;
        var1 = (p9 * (pressure >> 13) * (pressure >> 13)) >> 25;
        var2 = (p8 * pressure) >> 19;
        pressure = ((pressure + var1 + var2) >> 8) + (p7 << 4);

        Ok(pressure.0 as u32)
    }

    pub fn compensate_pressure(
        &self,
        raw_pressure: u32,
        fine: FineTemperature,
        unit: PressureUnit,
    ) -> Result<f64, Error> {
        let pascals = self.compensate_pressure_q24_8(raw_pressure, fine)? as f64 / 256.0;
        Ok(unit.convert(pascals))
    }

    /// Relative humidity in percent, always within `0.0..=100.0`.
    pub fn compensate_humidity(&self, raw_humidity: u16, fine: FineTemperature) -> f64 {
        let adc = Wrapping(raw_humidity as i32);
        let h1 = Wrapping(self.dig_h1 as i32);
        let h2 = Wrapping(self.dig_h2 as i32);
        let h3 = Wrapping(self.dig_h3 as i32);
        let h4 = Wrapping(self.dig_h4 as i32);
        let h5 = Wrapping(self.dig_h5 as i32);
        let h6 = Wrapping(self.dig_h6 as i32);

        let var1 = Wrapping(fine.0) - Wrapping(76800);
        let scaled = (((adc << 14) - (h4 << 20) - (h5 * var1)) + Wrapping(16384)) >> 15;
        let sensitivity = (((((var1 * h6) >> 10) * (((var1 * h3) >> 11) + Wrapping(32768))) >> 10)
            + Wrapping(2_097_152))
            * h2
            + Wrapping(8192);
        let mut var1 = scaled * (sensitivity >> 14);
        var1 -= ((((var1 >> 15) * (var1 >> 15)) >> 7) * h1) >> 4;

        let clamped = var1.0.clamp(0, 419_430_400);

        (clamped >> 12) as f64 / 1024.0
    }
}
