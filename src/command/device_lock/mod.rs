//! ### 9 - Security

pub mod types;

use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};
use types::*;

use crate::client::Modem;
use crate::command::Command;
use crate::error::Error;
use crate::parse::Field;

/// 9.1 Enter PIN +CPIN
///
/// `+CPIN: <code>`
pub const GET_PIN_STATUS: Command<'static> = Command::new("AT+CPIN?");
pub const PIN_STATUS: Field<'static> = Field::new("+CPIN:");

/// Unlock with `AT+CPIN=<pin>`
pub const fn enter_pin(pin: &str) -> Command<'_> {
    Command::str("AT+CPIN=", pin)
}

impl<'a, T, D, const N: usize> Modem<'a, T, D, N>
where
    T: Read + Write + ReadReady,
    D: DelayNs,
{
    pub fn pin_status(&mut self) -> Result<PinStatus, Error> {
        let timeout = self.config.default_timeout;
        self.send_parse_reply(&GET_PIN_STATUS, &PIN_STATUS, timeout)
    }

    /// Enter `pin`. A wrong PIN surfaces as [`Error::Modem`].
    pub fn unlock_sim(&mut self, pin: &str) -> Result<(), Error> {
        self.send_check_ok(&enter_pin(pin))
    }
}
