//! Argument and parameter types used by Call control Commands and Responses

use crate::error::ParseError;
use crate::parse::FromField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CallStatus {
    /// • 0: ready (MT allows commands from TA/TE)
    Ready,
    /// • 2: unknown (MT is not guaranteed to respond to instructions)
    Unknown,
    /// • 3: ringing (MT is ready for commands from TA/TE, but the ringer is active)
    Ringing,
    /// • 4: call in progress (MT is ready for commands from TA/TE, a call is in progress)
    InProgress,
}

impl From<u8> for CallStatus {
    fn from(pas: u8) -> Self {
        match pas {
            0 => Self::Ready,
            3 => Self::Ringing,
            4 => Self::InProgress,
            _ => Self::Unknown,
        }
    }
}

impl FromField for CallStatus {
    fn from_field(raw: &str) -> Result<Self, ParseError> {
        u8::from_field(raw).map(Self::from)
    }
}
