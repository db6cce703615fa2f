//! ### 7 - Network service

mod impl_;
pub mod responses;
pub mod types;

use core::fmt::Write as _;

use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};
use heapless::String;
use responses::*;
use types::*;

use crate::client::Modem;
use crate::command::Command;
use crate::error::Error;
use crate::modules::Chipset;
use crate::parse::Field;

/// 7.2 Signal quality +CSQ
///
/// `+CSQ: <rssi>,<ber>`, 99 in either field when not known or not
/// detectable.
pub const GET_SIGNAL_QUALITY: Command<'static> = Command::new("AT+CSQ");
pub const RSSI: Field<'static> = Field::new("+CSQ:");
pub const BER: Field<'static> = RSSI.index(1);

/// 7.3 Operator selection +COPS
///
/// `+COPS: <mode>[,<format>,<oper>[,<AcT>]]`
pub const GET_OPERATOR_SELECTION: Command<'static> = Command::new("AT+COPS?");
pub const OPERATOR: Field<'static> = Field::new("+COPS:").quoted().index(2);

/// 7.4 Network registration +CREG
///
/// `+CREG: <n>,<stat>[,<lac>,<ci>]`
pub const GET_NETWORK_REGISTRATION: Command<'static> = Command::new("AT+CREG?");
pub const REGISTRATION_STAT: Field<'static> = Field::new("+CREG:").index(1);

/// 7.5 Preferred mode selection +CNMP
pub const fn set_preferred_mode(mode: PreferredMode) -> Command<'static> {
    Command::int("AT+CNMP=", mode as i32)
}

/// 7.6 Preferred selection between CAT-M and NB-IoT +CMNB
pub const fn set_preferred_lte_mode(mode: LteMode) -> Command<'static> {
    Command::int("AT+CMNB=", mode as i32)
}

/// 7.7 Configure CAT-M or NB-IoT band +CBANDCFG
///
/// `AT+CBANDCFG="<mode>",<band>[,<band>...]`
pub const OPERATING_BAND: &str = "AT+CBANDCFG=";

/// 7.8 Power saving mode setting +CPSMS
///
/// `AT+CPSMS=<mode>[,,,<T3412>,<T3324>]`, both timers as 8 digit bit strings.
pub const fn set_psm(enable: bool) -> Command<'static> {
    Command::int("AT+CPSMS=", enable as i32)
}
pub const PSM: &str = "AT+CPSMS=";

/// 7.9 eDRX setting +CEDRXS
///
/// `AT+CEDRXS=<mode>,<AcT>,<value>`, the value as a 4 digit bit string.
pub const EDRX: &str = "AT+CEDRXS=";

impl<'a, T, D, const N: usize> Modem<'a, T, D, N>
where
    T: Read + Write + ReadReady,
    D: DelayNs,
{
    /// Raw `<rssi>` of +CSQ, 0..=31 or 99.
    pub fn rssi(&mut self) -> Result<u8, Error> {
        let timeout = self.config.default_timeout;
        self.send_parse_reply(&GET_SIGNAL_QUALITY, &RSSI, timeout)
    }

    pub fn signal_quality(&mut self) -> Result<SignalQuality, Error> {
        let timeout = self.config.default_timeout;
        self.send_query(&GET_SIGNAL_QUALITY, RSSI.prefix, timeout)?;

        let rssi = self.parse_reply(&RSSI);
        let ber = self.parse_reply(&BER);
        self.drain_final()?;

        Ok(SignalQuality {
            rssi: rssi?,
            ber: ber?,
        })
    }

    pub fn network_status(&mut self) -> Result<NetworkRegistrationStat, Error> {
        let timeout = self.config.default_timeout;
        self.send_parse_reply(&GET_NETWORK_REGISTRATION, &REGISTRATION_STAT, timeout)
    }

    /// Name of the operator the modem is registered with.
    pub fn operator(&mut self) -> Result<String<32>, Error> {
        let timeout = self.config.default_timeout;
        self.send_parse_reply(&GET_OPERATOR_SELECTION, &OPERATOR, timeout)
    }

    pub fn set_preferred_mode(&mut self, mode: PreferredMode) -> Result<(), Error> {
        let chipset = self.config.profile.chipset;
        let needs_lte = matches!(mode, PreferredMode::Lte | PreferredMode::GsmAndLte);
        if needs_lte && !chipset.is_lte() && chipset != Chipset::Generic {
            return Err(Error::Unsupported);
        }
        self.send_check_ok(&set_preferred_mode(mode))
    }

    pub fn set_preferred_lte_mode(&mut self, mode: LteMode) -> Result<(), Error> {
        self.require_iot()?;
        self.send_check_ok(&set_preferred_lte_mode(mode))
    }

    /// Restrict `mode` to a single LTE `band`, e.g. CAT-M on band 20.
    pub fn set_operating_band(&mut self, mode: LteMode, band: u8) -> Result<(), Error> {
        self.require_iot()?;
        let name = mode.band_mode().ok_or(Error::InvalidArgument)?;

        let mut args: String<16> = String::new();
        write!(args, "\"{}\",{}", name, band).map_err(|_| Error::CommandOverflow)?;
        self.send_check_ok(&Command::str(OPERATING_BAND, &args))
    }

    /// Switch power saving mode with the timers last configured.
    pub fn set_psm(&mut self, enable: bool) -> Result<(), Error> {
        self.require_lte()?;
        self.send_check_ok(&set_psm(enable))
    }

    /// Enable power saving mode requesting the periodic TAU (T3412) and
    /// active time (T3324), e.g. `"00100001"` and `"00100011"`.
    pub fn set_psm_timers(&mut self, tau: &str, active_time: &str) -> Result<(), Error> {
        self.require_lte()?;
        if !is_bit_string(tau, 8) || !is_bit_string(active_time, 8) {
            return Err(Error::InvalidArgument);
        }

        let mut args: String<32> = String::new();
        write!(args, "1,,,\"{}\",\"{}\"", tau, active_time)
            .map_err(|_| Error::CommandOverflow)?;
        self.send_check_ok(&Command::str(PSM, &args))
    }

    /// Configure extended discontinuous reception, `value` a 4 digit bit
    /// string such as `"0101"`.
    pub fn set_edrx(&mut self, mode: EdrxMode, access: EdrxAccess, value: &str) -> Result<(), Error> {
        self.require_lte()?;
        if !is_bit_string(value, 4) {
            return Err(Error::InvalidArgument);
        }

        let mut args: String<16> = String::new();
        write!(args, "{},{},\"{}\"", mode as u8, access as u8, value)
            .map_err(|_| Error::CommandOverflow)?;
        self.send_check_ok(&Command::str(EDRX, &args))
    }

    fn require_lte(&self) -> Result<(), Error> {
        match self.config.profile.chipset {
            Chipset::Generic => Ok(()),
            chipset if chipset.is_lte() => Ok(()),
            _ => Err(Error::Unsupported),
        }
    }

    fn require_iot(&self) -> Result<(), Error> {
        match self.config.profile.chipset {
            Chipset::Generic => Ok(()),
            chipset if chipset.is_iot() => Ok(()),
            _ => Err(Error::Unsupported),
        }
    }
}
