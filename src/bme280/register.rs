#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Register {
    Id = 0xD0,

    /// dig_T1..dig_T3
    TemperatureDig = 0x88,
    /// dig_P1..dig_P9
    PressureDig = 0x8E,
    /// dig_H1
    HumidityDig1 = 0xA1,
    /// dig_H2..dig_H6
    HumidityDig2 = 0xE1,

    CtrlHum = 0xF2,
    CtrlMeas = 0xF4,
    Config = 0xF5,

    /// Start of the press/temp/hum burst.
    Pressure = 0xF7,
}

impl Register {
    pub fn address(&self) -> u8 {
        *self as u8
    }
}

/// Value of the `Id` register on a BME280.
pub const CHIP_ID: u8 = 0x60;
