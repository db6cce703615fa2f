//! Argument and parameter types used by Packet Switched Data Services Commands and Responses

use crate::error::ParseError;
use crate::parse::FromField;

/// 10.1 GPRS attach state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GprsAttachedState {
    /// • 0: detached
    Detached = 0,
    /// • 1: attached
    Attached = 1,
}

impl FromField for GprsAttachedState {
    fn from_field(raw: &str) -> Result<Self, ParseError> {
        match u8::from_field(raw)? {
            0 => Ok(Self::Detached),
            1 => Ok(Self::Attached),
            _ => Err(ParseError::Malformed),
        }
    }
}
