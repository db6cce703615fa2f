pub(crate) mod sim5320;
pub(crate) mod sim7000;
pub(crate) mod sim7500;
pub(crate) mod sim800;

use embassy_time::Duration;

/// SIMCom chipset the engine is talking to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Chipset {
    Sim800L,
    Sim800H,
    Sim808V1,
    Sim808V2,
    Sim5320A,
    Sim5320E,
    Sim7000,
    Sim7070,
    Sim7500,
    Sim7600,
    Generic,
}

impl Chipset {
    /// Identify the chipset from `ATI` (or `AT+GMM`) output.
    ///
    /// `ATI` cannot tell a SIM800L from a SIM800H; both report `SIM800 R13`
    /// and are resolved to [`Chipset::Sim800L`] here.
    pub fn from_identification(text: &str) -> Option<Self> {
        const IDS: &[(&str, Chipset)] = &[
            ("SIM808 R14", Chipset::Sim808V2),
            ("SIM808 R13", Chipset::Sim808V1),
            ("SIM800H", Chipset::Sim800H),
            ("SIM800 R13", Chipset::Sim800L),
            ("SIMCOM_SIM5320A", Chipset::Sim5320A),
            ("SIMCOM_SIM5320E", Chipset::Sim5320E),
            ("SIM7000", Chipset::Sim7000),
            ("SIM7070", Chipset::Sim7070),
            ("SIM7500", Chipset::Sim7500),
            ("SIM7600", Chipset::Sim7600),
        ];

        IDS.iter()
            .find(|(id, _)| text.contains(id))
            .map(|&(_, chipset)| chipset)
    }

    pub fn profile(self) -> Profile {
        let family = match self {
            Self::Sim800L | Self::Sim800H | Self::Sim808V1 | Self::Sim808V2 => sim800::PROFILE,
            Self::Sim5320A | Self::Sim5320E => sim5320::PROFILE,
            Self::Sim7000 | Self::Sim7070 => sim7000::PROFILE,
            Self::Sim7500 | Self::Sim7600 => sim7500::PROFILE,
            Self::Generic => GENERIC,
        };
        Profile {
            chipset: self,
            ..family
        }
    }

    pub fn is_3g(self) -> bool {
        matches!(self, Self::Sim5320A | Self::Sim5320E)
    }

    pub fn is_lte(self) -> bool {
        matches!(
            self,
            Self::Sim7000 | Self::Sim7070 | Self::Sim7500 | Self::Sim7600
        )
    }

    /// LTE CAT-M / NB-IoT module.
    pub fn is_iot(self) -> bool {
        matches!(self, Self::Sim7000 | Self::Sim7070)
    }
}

/// Chipset dependent command variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Profile {
    pub chipset: Chipset,
    /// Final success result code
    pub ok_reply: &'static str,
    pub hang_up: &'static str,
    pub pick_up: &'static str,
    pub power_down: &'static str,
    /// Line confirming the power down command
    pub power_down_reply: &'static str,
    pub power_down_timeout: Duration,
    /// Prefix of the baud rate command, the rate is appended
    pub baud_rate: &'static str,
    pub quirks: Quirks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quirks {
    /// `+CBC` reports the battery voltage in volts rather than millivolts
    pub battery_in_volts: bool,
    /// Field of `+CBC` holding the voltage
    pub battery_voltage_index: usize,
}

pub(crate) const GENERIC: Profile = Profile {
    chipset: Chipset::Generic,
    ok_reply: "OK",
    hang_up: "ATH",
    pick_up: "ATA",
    power_down: "AT+CPOWD=1",
    power_down_reply: "NORMAL POWER DOWN",
    power_down_timeout: Duration::from_secs(10),
    baud_rate: "AT+IPR=",
    quirks: Quirks {
        battery_in_volts: false,
        battery_voltage_index: 2,
    },
};
