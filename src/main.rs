use anyhow::Result;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use esp_idf_svc::hal::{
    delay::FreeRtos,
    i2c::{I2cConfig, I2cDriver},
    peripherals::Peripherals,
    prelude::*,
};
use log::{info, warn};

use bme280_compensation::{
    derived, register::CHIP_ID, Bme280, Config, DeviceAddr, I2cTransport, PressureUnit, Units,
    STANDARD_SEA_LEVEL_PRESSURE,
};

fn main() -> Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    let peripherals = Peripherals::take()?;

    let sda = peripherals.pins.gpio21;
    let scl = peripherals.pins.gpio22;

    let i2c_config = I2cConfig::new()
        .baudrate(400.kHz().into())
        .timeout(Duration::from_micros(200).into());
    let i2c = I2cDriver::new(peripherals.i2c0, sda, scl, &i2c_config)?;

    let config = Config {
        address: DeviceAddr::Secondary,
        ..Config::default()
    };

    let mut transport = I2cTransport::new(i2c, config.address);
    let chip_id = transport.read_chip_id()?;
    if chip_id != CHIP_ID {
        warn!("unexpected chip id {:#04x}", chip_id);
    }

    let mut sensor = Bme280::new(transport);
    sensor.begin(config)?;

    info!("Sensor init");

    loop {
        let measurement = sensor.read_all(Units::Metric, PressureUnit::Hectopascal);
        let altitude = derived::altitude(
            measurement.pressure * 100.0,
            STANDARD_SEA_LEVEL_PRESSURE,
            Units::Metric,
        );
        let dew_point =
            derived::dew_point(measurement.temperature, measurement.humidity, Units::Metric);

        info!("{}, altitude: {:.1} m, dew point: {:.2}°C", measurement, altitude, dew_point);

        FreeRtos.delay_ms(500u32);
    }
}
