//! ### 10 - Packet Switched Data Services

pub mod types;

use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};
use types::*;

use crate::client::Modem;
use crate::command::Command;
use crate::error::Error;
use crate::parse::Field;
use crate::reply::Reply;

/// 10.1 PS attach or detach +CGATT
///
/// `+CGATT: <state>`
pub const GET_GPRS_ATTACHED: Command<'static> = Command::new("AT+CGATT?");
pub const GPRS_ATTACHED: Field<'static> = Field::new("+CGATT:");

pub const fn set_gprs_attached(state: GprsAttachedState) -> Command<'static> {
    Command::int("AT+CGATT=", state as i32)
}

impl<'a, T, D, const N: usize> Modem<'a, T, D, N>
where
    T: Read + Write + ReadReady,
    D: DelayNs,
{
    pub fn gprs_state(&mut self) -> Result<GprsAttachedState, Error> {
        let timeout = self.config.default_timeout;
        self.send_parse_reply(&GET_GPRS_ATTACHED, &GPRS_ATTACHED, timeout)
    }

    /// Attach to or detach from the packet domain.
    pub fn set_gprs_attached(&mut self, state: GprsAttachedState) -> Result<(), Error> {
        // The network may take seconds to accept the attach
        let timeout = self.config.default_timeout * 20;
        let ok = self.config.profile.ok_reply;
        self.send_check_reply(&set_gprs_attached(state), Reply::Exact(ok), timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::IncomingCall;
    use crate::test_helpers::{self, MockSerial};

    #[test]
    fn attach_state() {
        let serial = MockSerial::new();
        serial.respond("AT+CGATT?", "AT+CGATT?\r\n+CGATT: 1\r\n\r\nOK\r\n");
        serial.respond("AT+CGATT?", "+CGATT: 0\r\n\r\nOK\r\n");
        serial.respond("AT+CGATT?", "+CGATT: 7\r\n\r\nOK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(serial, &ring);

        assert_eq!(modem.gprs_state(), Ok(GprsAttachedState::Attached));
        assert_eq!(modem.gprs_state(), Ok(GprsAttachedState::Detached));
        assert_eq!(modem.gprs_state(), Err(Error::Malformed));
    }

    #[test]
    fn attach() {
        let serial = MockSerial::new();
        serial.respond("AT+CGATT=1", "OK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(serial.clone(), &ring);

        modem.set_gprs_attached(GprsAttachedState::Attached).unwrap();
        assert_eq!(serial.commands(), ["AT+CGATT=1"]);
    }

    #[test]
    fn not_attached_answer_is_error() {
        let serial = MockSerial::new();
        serial.respond("AT+CGATT?", "+CME ERROR: 30\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(serial, &ring);

        assert_eq!(
            modem.gprs_state(),
            Err(Error::Modem(crate::error::ModemError::Cme(30)))
        );
    }
}
