//! AT command rendering and the send + expect transactions built on it.
//!
//! Topic modules below follow the grouping of the SIMCom AT command manuals.
//! Each is a thin encoder: a handful of [`Command`]s and [`Field`]s plus the
//! typed responses decoded from them.

pub mod call_control;
pub mod control;
pub mod device_lock;
pub mod general;
pub mod mobile_control;
pub mod network_service;
pub mod psn;

use core::fmt::{self, Write as _};

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};
use heapless::String;

use crate::client::Modem;
use crate::error::{io, Error};
use crate::parse::{FromField, Field};
use crate::reply::Reply;

/// Longest command line, terminator excluded, that can be rendered.
pub const MAX_COMMAND_LEN: usize = 256;

/// Carriage return closing every command line.
pub const TERMINATOR: &[u8] = b"\r";

/// Attention command, `OK` when the modem is listening
pub const AT: Command<'static> = Command::new("AT");

/// Parameter appended to a command prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Suffix<'a> {
    None,
    /// Decimal integer, `AT+CFUN=1`
    Int(i32),
    /// Raw text, `AT+CPIN=1234`
    Str(&'a str),
    /// Text wrapped in `"`, `AT+CMGS="+31600000000"`
    Quoted(&'a str),
    /// Two integers separated by a comma, `AT+CNMI=2,1`
    Pair(i32, i32),
}

/// An outgoing command line: a prefix followed by an optional [`Suffix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command<'a> {
    pub prefix: &'a str,
    pub suffix: Suffix<'a>,
}

impl<'a> Command<'a> {
    pub const fn new(prefix: &'a str) -> Self {
        Self {
            prefix,
            suffix: Suffix::None,
        }
    }

    pub const fn with_suffix(prefix: &'a str, suffix: Suffix<'a>) -> Self {
        Self { prefix, suffix }
    }

    pub const fn int(prefix: &'a str, value: i32) -> Self {
        Self::with_suffix(prefix, Suffix::Int(value))
    }

    pub const fn str(prefix: &'a str, value: &'a str) -> Self {
        Self::with_suffix(prefix, Suffix::Str(value))
    }

    pub const fn quoted(prefix: &'a str, value: &'a str) -> Self {
        Self::with_suffix(prefix, Suffix::Quoted(value))
    }

    pub const fn pair(prefix: &'a str, first: i32, second: i32) -> Self {
        Self::with_suffix(prefix, Suffix::Pair(first, second))
    }

    /// Render into a bounded buffer.
    pub fn render<const N: usize>(&self) -> Result<String<N>, Error> {
        let mut buf = String::new();
        write!(buf, "{}", self).map_err(|_| Error::CommandOverflow)?;
        Ok(buf)
    }
}

impl<'a> From<&'a str> for Command<'a> {
    fn from(prefix: &'a str) -> Self {
        Self::new(prefix)
    }
}

impl fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix)?;
        match self.suffix {
            Suffix::None => Ok(()),
            Suffix::Int(v) => write!(f, "{}", v),
            Suffix::Str(s) => f.write_str(s),
            Suffix::Quoted(s) => write!(f, "\"{}\"", s),
            Suffix::Pair(a, b) => write!(f, "{},{}", a, b),
        }
    }
}

impl<'a, T, D, const N: usize> Modem<'a, T, D, N>
where
    T: Read + Write + ReadReady,
    D: DelayNs,
{
    /// Discard stale input, then write `cmd` and the line terminator.
    pub fn send_command(&mut self, cmd: &Command<'_>) -> Result<(), Error> {
        self.flush_input()?;

        let line = cmd.render::<MAX_COMMAND_LEN>()?;
        trace!("TX: {}", line.as_str());

        self.serial.write_all(line.as_bytes()).map_err(io)?;
        self.serial.write_all(TERMINATOR).map_err(io)?;
        self.serial.flush().map_err(io)?;

        self.last_command = line;
        Ok(())
    }

    /// Write raw payload bytes, e.g. message text after a `> ` prompt.
    pub fn write_data(&mut self, data: &[u8]) -> Result<(), Error> {
        self.serial.write_all(data).map_err(io)?;
        self.serial.flush().map_err(io)
    }

    /// Send `cmd` and wait for a line matching `reply`.
    pub fn send_check_reply<'r>(
        &mut self,
        cmd: &Command<'_>,
        reply: impl Into<Reply<'r>>,
        timeout: Duration,
    ) -> Result<(), Error> {
        self.send_command(cmd)?;
        self.expect(reply, timeout)
    }

    /// Send `cmd` and wait for the profile's OK reply within the default timeout.
    pub fn send_check_ok(&mut self, cmd: &Command<'_>) -> Result<(), Error> {
        let ok = self.config.profile.ok_reply;
        let timeout = self.config.default_timeout;
        self.send_check_reply(cmd, Reply::Exact(ok), timeout)
    }

    /// Send `cmd` and return the first line that is neither blank nor the echo.
    ///
    /// A line that overflowed the buffer or holds invalid UTF-8 is refused.
    pub fn send_read_reply(
        &mut self,
        cmd: &Command<'_>,
        timeout: Duration,
    ) -> Result<&str, Error> {
        self.send_command(cmd)?;
        self.next_reply(timeout)?;

        let line = self.last_line();
        if line.malformed {
            Err(Error::Malformed)
        } else if line.truncated {
            Err(Error::Overflow)
        } else {
            Ok(self.reply())
        }
    }

    /// Send a query and wait for the line carrying its information `prefix`.
    ///
    /// The prefix may appear anywhere in the line, so a reply glued to
    /// leading noise still matches.
    pub(crate) fn send_query(
        &mut self,
        cmd: &Command<'_>,
        prefix: &str,
        timeout: Duration,
    ) -> Result<(), Error> {
        self.send_check_reply(cmd, Reply::Contains(prefix), timeout)
    }

    /// Send `cmd`, wait for a line carrying `field`'s prefix and decode it.
    ///
    /// The trailing final `OK` is drained afterwards; its absence does not
    /// fail the query.
    pub fn send_parse_reply<V: FromField>(
        &mut self,
        cmd: &Command<'_>,
        field: &Field<'_>,
        timeout: Duration,
    ) -> Result<V, Error> {
        self.send_query(cmd, field.prefix, timeout)?;
        let value = self.parse_reply(field);
        self.drain_final()?;
        Ok(value?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(cmd: Command<'_>) -> String<64> {
        cmd.render().unwrap()
    }

    #[test]
    fn render_suffix_shapes() {
        assert_eq!(rendered(AT), "AT");
        assert_eq!(rendered(Command::int("AT+CFUN=", 1)), "AT+CFUN=1");
        assert_eq!(rendered(Command::int("AT+CFUN=", -4)), "AT+CFUN=-4");
        assert_eq!(rendered(Command::str("AT+CPIN=", "1234")), "AT+CPIN=1234");
        assert_eq!(
            rendered(Command::quoted("AT+CMGS=", "+31600000000")),
            "AT+CMGS=\"+31600000000\""
        );
        assert_eq!(rendered(Command::pair("AT+CNMI=", 2, 1)), "AT+CNMI=2,1");
    }

    #[test]
    fn render_from_str() {
        let cmd: Command<'_> = "ATE0".into();
        assert_eq!(cmd.suffix, Suffix::None);
        assert_eq!(rendered(cmd), "ATE0");
    }

    #[test]
    fn render_overflow() {
        let cmd = Command::quoted("AT+HTTPPARA=\"URL\",", "http://example.com/");
        assert_eq!(cmd.render::<16>(), Err(Error::CommandOverflow));
    }
}
