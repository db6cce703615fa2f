//! Argument and parameter types used by Network service Commands and Responses

use crate::error::ParseError;
use crate::parse::FromField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetworkRegistrationStat {
    /// • 0: not registered, the MT is not currently searching a new operator to register to
    NotRegistered = 0,
    /// • 1: registered, home network
    Registered = 1,
    /// • 2: not registered, but the MT is currently searching a new operator to register to
    NotRegisteredSearching = 2,
    /// • 3: registration denied
    RegistrationDenied = 3,
    /// • 4: unknown
    Unknown = 4,
    /// • 5: registered, roaming
    RegisteredRoaming = 5,
}

impl From<u8> for NetworkRegistrationStat {
    fn from(stat: u8) -> Self {
        match stat {
            0 => Self::NotRegistered,
            1 => Self::Registered,
            2 => Self::NotRegisteredSearching,
            3 => Self::RegistrationDenied,
            5 => Self::RegisteredRoaming,
            _ => Self::Unknown,
        }
    }
}

impl FromField for NetworkRegistrationStat {
    fn from_field(raw: &str) -> Result<Self, ParseError> {
        u8::from_field(raw).map(Self::from)
    }
}

/// Radio technology preference of `+CNMP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PreferredMode {
    /// • 2: automatic
    Automatic = 2,
    /// • 13: GSM only
    Gsm = 13,
    /// • 38: LTE only
    Lte = 38,
    /// • 51: GSM and LTE only
    GsmAndLte = 51,
}

/// LTE category selected with `+CMNB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LteMode {
    /// • 1: CAT-M
    CatM = 1,
    /// • 2: NB-IoT
    NbIot = 2,
    /// • 3: CAT-M and NB-IoT
    CatMAndNbIot = 3,
}

impl LteMode {
    /// Network mode name used by `+CBANDCFG`.
    pub fn band_mode(self) -> Option<&'static str> {
        match self {
            Self::CatM => Some("CAT-M"),
            Self::NbIot => Some("NB-IOT"),
            Self::CatMAndNbIot => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdrxMode {
    /// • 0: disable
    Disable = 0,
    /// • 1: enable
    Enable = 1,
    /// • 2: enable and report changes with `+CEDRXP`
    EnableWithReport = 2,
    /// • 3: disable and discard all parameters
    Reset = 3,
}

/// Access technology an eDRX setting applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdrxAccess {
    /// • 4: E-UTRAN, LTE CAT-M
    CatM = 4,
    /// • 5: E-UTRAN, NB-IoT
    NbIot = 5,
}

/// `raw` is a 3GPP bit string of `len` binary digits, e.g. `"00100001"`.
pub(crate) fn is_bit_string(raw: &str, len: usize) -> bool {
    raw.len() == len && raw.bytes().all(|b| b == b'0' || b == b'1')
}
