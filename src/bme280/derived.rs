//! Quantities computed from already compensated readings.

use super::measurement::Units;

/// Mean sea-level pressure in Pascals.
pub const STANDARD_SEA_LEVEL_PRESSURE: f64 = 101_325.0;

const PASCALS_PER_INCH_MERCURY: f64 = 3386.3752577878;
const METRES_PER_FOOT: f64 = 0.3048;

const MAGNUS_B: f64 = 17.625;
const MAGNUS_C: f64 = 243.04;

/// Altitude from the NOAA pressure approximation.
///
/// Only the metric branch applies the foot to metre factor; the imperial
/// branch returns `1000 * Δp / 3386.375…` as is.
pub fn altitude(pressure: f64, sea_level_pressure: f64, units: Units) -> f64 {
    if pressure.is_nan() || sea_level_pressure.is_nan() {
        return f64::NAN;
    }

    let altitude = 1000.0 * (sea_level_pressure - pressure) / PASCALS_PER_INCH_MERCURY;

    match units {
        Units::Metric => altitude * METRES_PER_FOOT,
        Units::Imperial => altitude,
    }
}

/// Dew point (Magnus form). `temperature` is in °C for metric units and °F
/// otherwise; the result uses the same scale.
pub fn dew_point(temperature: f64, humidity: f64, units: Units) -> f64 {
    if temperature.is_nan() || humidity.is_nan() {
        return f64::NAN;
    }

    match units {
        Units::Metric => magnus(temperature, humidity),
        Units::Imperial => {
            let celsius = (temperature - 32.0) * 5.0 / 9.0;
            magnus(celsius, humidity) * 9.0 / 5.0 + 32.0
        }
    }
}

fn magnus(celsius: f64, humidity: f64) -> f64 {
    let gamma = (humidity / 100.0).ln() + (MAGNUS_B * celsius) / (MAGNUS_C + celsius);
    MAGNUS_C * gamma / (MAGNUS_B - gamma)
}
