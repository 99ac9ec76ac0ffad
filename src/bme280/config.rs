//! Acquisition settings pushed to the device when a session begins.
//!
//! The compensation math never looks at these values; they only travel to the
//! transport, which writes the encoded register bytes.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceAddr {
    /// 0x76
    #[default]
    Primary = 0b111_0110,
    /// 0x77
    Secondary = 0b111_0111,
}

impl DeviceAddr {
    pub fn address(&self) -> u8 {
        *self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Oversampling {
    Skipped = 0,
    #[default]
    X1 = 1,
    X2 = 2,
    X4 = 3,
    X8 = 4,
    X16 = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Sleep = 0,
    Forced = 1,
    #[default]
    Normal = 3,
}

/// Inactive duration between measurements in normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StandbyTime {
    Ms0_5 = 0,
    Ms62_5 = 1,
    Ms125 = 2,
    Ms250 = 3,
    Ms500 = 4,
    #[default]
    Ms1000 = 5,
    Ms10 = 6,
    Ms20 = 7,
}

/// IIR filter coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    Off = 0,
    X2 = 1,
    X4 = 2,
    X8 = 3,
    X16 = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub temperature_oversampling: Oversampling,
    pub pressure_oversampling: Oversampling,
    pub humidity_oversampling: Oversampling,
    pub mode: Mode,
    pub standby_time: StandbyTime,
    pub filter: Filter,
    pub spi3w_enable: bool,
    pub address: DeviceAddr,
}

impl Config {
    /// `ctrl_hum[2:0]`
    pub fn ctrl_hum(&self) -> u8 {
        self.humidity_oversampling as u8
    }

    /// `ctrl_meas[7:5]` osrs_t, `ctrl_meas[4:2]` osrs_p, `ctrl_meas[1:0]` mode
    pub fn ctrl_meas(&self) -> u8 {
        (self.temperature_oversampling as u8) << 5
            | (self.pressure_oversampling as u8) << 2
            | self.mode as u8
    }

    /// `config[7:5]` t_sb, `config[4:2]` filter, `config[0]` spi3w_en
    pub fn config(&self) -> u8 {
        (self.standby_time as u8) << 5 | (self.filter as u8) << 2 | u8::from(self.spi3w_enable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_register_defaults() {
        let config = Config::default();
        assert_eq!(config.ctrl_hum(), 0x01);
        assert_eq!(config.ctrl_meas(), 0b001_001_11);
        assert_eq!(config.config(), 0b101_000_0_0);
        assert_eq!(config.address.address(), 0x76);
    }

    #[test]
    fn register_fields_are_packed_in_place() {
        let config = Config {
            temperature_oversampling: Oversampling::X2,
            pressure_oversampling: Oversampling::X16,
            humidity_oversampling: Oversampling::X8,
            mode: Mode::Forced,
            standby_time: StandbyTime::Ms20,
            filter: Filter::X16,
            spi3w_enable: true,
            address: DeviceAddr::Secondary,
        };
        assert_eq!(config.ctrl_hum(), 0x04);
        assert_eq!(config.ctrl_meas(), 0b010_101_01);
        assert_eq!(config.config(), 0b111_100_0_1);
        assert_eq!(config.address.address(), 0x77);
    }
}
