use embedded_hal::i2c;

use super::calibration::CALIBRATION_LEN;
use super::config::{Config, DeviceAddr};
use super::error::Error;
use super::measurement::SAMPLE_LEN;
use super::register::Register;
use super::Transport;

/// [`Transport`] over any `embedded_hal` I²C bus.
pub struct I2cTransport<I2C> {
    // The concrete I²C device implementation.
    i2c: I2C,

    // Device address
    address: DeviceAddr,
}

impl<I2C: i2c::I2c> I2cTransport<I2C> {
    pub fn new(i2c: I2C, address: DeviceAddr) -> Self {
        Self { i2c, address }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn read_chip_id(&mut self) -> Result<u8, Error> {
        let mut buffer = [0; 1];

        self.read_register(Register::Id, &mut buffer)?;

        Ok(buffer[0])
    }

    fn read_register(&mut self, register: Register, buffer: &mut [u8]) -> Result<(), Error> {
        self.i2c
            .write_read(self.address.address(), &[register.address()], buffer)
            .map_err(Error::bus)
    }

    fn write_register(&mut self, register: Register, value: u8) -> Result<(), Error> {
        self.i2c
            .write(self.address.address(), &[register.address(), value])
            .map_err(Error::bus)
    }
}

impl<I2C: i2c::I2c> Transport for I2cTransport<I2C> {
    /// Also switches the transport to `config.address`.
    fn push_configuration(&mut self, config: &Config) -> Result<(), Error> {
        self.address = config.address;

        // ctrl_hum only takes effect after the following ctrl_meas write.
        self.write_register(Register::CtrlHum, config.ctrl_hum())?;
        self.write_register(Register::CtrlMeas, config.ctrl_meas())?;
        self.write_register(Register::Config, config.config())
    }

    fn fetch_calibration(&mut self) -> Result<Vec<u8>, Error> {
        let mut buffer = vec![0; CALIBRATION_LEN];

        self.read_register(Register::TemperatureDig, &mut buffer[..6])?;
        self.read_register(Register::PressureDig, &mut buffer[6..24])?;
        self.read_register(Register::HumidityDig1, &mut buffer[24..25])?;
        self.read_register(Register::HumidityDig2, &mut buffer[25..])?;

        Ok(buffer)
    }

    fn fetch_sample(&mut self) -> Result<Vec<u8>, Error> {
        let mut buffer = vec![0; SAMPLE_LEN];

        self.read_register(Register::Pressure, &mut buffer)?;

        Ok(buffer)
    }
}
