//! Argument and parameter types used by Security Commands and Responses

use crate::error::ParseError;
use crate::parse::FromField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinStatus {
    /// • READY: MT is not pending for any password
    Ready,
    /// • SIM PIN: MT is waiting SIM PIN to be given
    SimPin,
    /// • SIM PUK: MT is waiting SIM PUK to be given
    SimPuk,
    /// • PH-SIM PIN: MT is waiting phone-to-SIM card password to be given
    PhSimPin,
    /// • PH-SIM PUK: MT is waiting phone-to-SIM card unblocking password to be given
    PhSimPuk,
    /// • SIM PIN2: MT is waiting SIM PIN2 to be given
    SimPin2,
    /// • SIM PUK2: MT is waiting SIM PUK2 to be given
    SimPuk2,
}

impl FromField for PinStatus {
    fn from_field(raw: &str) -> Result<Self, ParseError> {
        match raw.trim() {
            "READY" => Ok(Self::Ready),
            "SIM PIN" => Ok(Self::SimPin),
            "SIM PUK" => Ok(Self::SimPuk),
            "PH-SIM PIN" | "PH_SIM PIN" => Ok(Self::PhSimPin),
            "PH-SIM PUK" | "PH_SIM PUK" => Ok(Self::PhSimPuk),
            "SIM PIN2" => Ok(Self::SimPin2),
            "SIM PUK2" => Ok(Self::SimPuk2),
            _ => Err(ParseError::Malformed),
        }
    }
}
