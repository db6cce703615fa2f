//! ### 6 - Call control

pub mod types;

use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};
use heapless::String;
use types::*;

use crate::client::Modem;
use crate::command::{Command, MAX_COMMAND_LEN};
use crate::error::Error;
use crate::parse::Field;
use crate::reply::Reply;

/// 6.1 Phone activity status +CPAS
///
/// `+CPAS: <pas>`
pub const GET_ACTIVITY_STATUS: Command<'static> = Command::new("AT+CPAS");
pub const ACTIVITY_STATUS: Field<'static> = Field::new("+CPAS:");

/// 6.2 Calling line identification presentation +CLIP
///
/// Unsolicited `+CLIP: <number>,<type>,...` after each `RING` when enabled.
pub const fn set_caller_id_notification(enable: bool) -> Command<'static> {
    Command::int("AT+CLIP=", enable as i32)
}
pub const CALLER_NUMBER: Field<'static> = Field::new("+CLIP:").quoted();

/// Longest dialable number accepted by [`Modem::call_phone`].
pub const MAX_NUMBER_LEN: usize = 32;

impl<'a, T, D, const N: usize> Modem<'a, T, D, N>
where
    T: Read + Write + ReadReady,
    D: DelayNs,
{
    /// Dial a voice call, `ATD<number>;`.
    pub fn call_phone(&mut self, number: &str) -> Result<(), Error> {
        if number.is_empty() {
            return Err(Error::InvalidArgument);
        }
        if number.len() > MAX_NUMBER_LEN {
            return Err(Error::CommandOverflow);
        }
        let mut target: String<{ MAX_NUMBER_LEN + 1 }> = String::new();
        target.push_str(number).map_err(|_| Error::CommandOverflow)?;
        target.push(';').map_err(|_| Error::CommandOverflow)?;

        info!("calling {}", number);
        self.send_check_ok(&Command::str("ATD", &target))
    }

    pub fn hang_up(&mut self) -> Result<(), Error> {
        let hang_up = self.config.profile.hang_up;
        self.send_check_ok(&Command::new(hang_up))
    }

    pub fn pick_up(&mut self) -> Result<(), Error> {
        let pick_up = self.config.profile.pick_up;
        self.send_check_ok(&Command::new(pick_up))
    }

    pub fn call_status(&mut self) -> Result<CallStatus, Error> {
        let timeout = self.config.default_timeout;
        self.send_parse_reply(&GET_ACTIVITY_STATUS, &ACTIVITY_STATUS, timeout)
    }

    pub fn caller_id_notification(&mut self, enable: bool) -> Result<(), Error> {
        self.send_check_ok(&set_caller_id_notification(enable))
    }

    /// Number of the pending incoming call, from its `+CLIP:` line.
    ///
    /// Consumes the incoming call flag. With no call pending, or once the
    /// `+CLIP:` line failed to arrive, returns [`Error::NotFound`].
    pub fn incoming_call_number(&mut self) -> Result<String<MAX_NUMBER_LEN>, Error> {
        if !self.incoming_call().take() {
            return Err(Error::NotFound);
        }

        let timeout = self.config.default_timeout;
        match self.expect(Reply::Contains(CALLER_NUMBER.prefix), timeout) {
            Ok(()) => {}
            Err(Error::Timeout) => return Err(Error::NotFound),
            Err(e) => return Err(e),
        }
        Ok(self.parse_reply(&CALLER_NUMBER)?)
    }
}

// `ATD` prefix plus the number and its `;`
const _: () = assert!(MAX_NUMBER_LEN + 4 <= MAX_COMMAND_LEN);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::modules::Chipset;
    use crate::ring::IncomingCall;
    use crate::test_helpers::{self, MockSerial};

    #[test]
    fn dial() {
        let serial = MockSerial::new();
        serial.respond("ATD+31600000000;", "ATD+31600000000;\r\nOK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(serial.clone(), &ring);

        modem.call_phone("+31600000000").unwrap();
        assert_eq!(serial.commands(), ["ATD+31600000000;"]);
    }

    #[test]
    fn dial_rejects_bad_numbers() {
        let serial = MockSerial::new();
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(serial.clone(), &ring);

        assert_eq!(modem.call_phone(""), Err(Error::InvalidArgument));
        let long = "1".repeat(MAX_NUMBER_LEN + 1);
        assert_eq!(modem.call_phone(&long), Err(Error::CommandOverflow));
        assert!(serial.commands().is_empty());
    }

    #[test]
    fn hang_up_and_pick_up_follow_profile() {
        let serial = MockSerial::new();
        serial.respond("ATH0", "OK\r\n");
        serial.respond("AT+CHUP", "OK\r\n");
        serial.respond("ATA", "OK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem_with(serial.clone(), &ring, Config::new(Chipset::Sim800H));

        modem.hang_up().unwrap();
        modem.set_profile(Chipset::Sim7070.profile());
        modem.hang_up().unwrap();
        modem.pick_up().unwrap();
        assert_eq!(serial.commands(), ["ATH0", "AT+CHUP", "ATA"]);
    }

    #[test]
    fn status() {
        let serial = MockSerial::new();
        serial.respond("AT+CPAS", "+CPAS: 3\r\n\r\nOK\r\n");
        serial.respond("AT+CPAS", "+CPAS: 0\r\n\r\nOK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(serial, &ring);

        assert_eq!(modem.call_status(), Ok(CallStatus::Ringing));
        assert_eq!(modem.call_status(), Ok(CallStatus::Ready));
    }

    #[test]
    fn caller_id() {
        let serial = MockSerial::new();
        serial.respond("AT+CLIP=1", "OK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(serial.clone(), &ring);

        modem.caller_id_notification(true).unwrap();

        assert_eq!(modem.incoming_call_number(), Err(Error::NotFound));

        serial.inject("\r\nRING\r\n\r\n+CLIP: \"+31612345678\",145,\"\",0,\"\",0\r\n");
        ring.signal();
        assert_eq!(modem.incoming_call_number().unwrap(), "+31612345678");
        assert!(!ring.is_pending());
    }

    #[test]
    fn ring_without_clip() {
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(MockSerial::new(), &ring);

        ring.signal();
        assert_eq!(modem.incoming_call_number(), Err(Error::NotFound));
        assert!(!ring.is_pending());
    }
}
