//! Recognising the expected reply among echo, padding and unsolicited lines.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};

use crate::client::Modem;
use crate::deadline::Deadline;
use crate::error::{Error, ModemError};

/// The line a transaction waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply<'a> {
    /// The whole line equals the literal, e.g. `OK`
    Exact(&'a str),
    /// The line starts with the literal, e.g. `+CSQ:`
    Prefix(&'a str),
    /// The literal appears anywhere in the line
    Contains(&'a str),
}

impl<'a> Reply<'a> {
    pub fn matches(&self, line: &str) -> bool {
        match *self {
            Self::Exact(s) => line == s,
            Self::Prefix(s) => line.starts_with(s),
            Self::Contains(s) => line.contains(s),
        }
    }

    pub fn token(&self) -> &'a str {
        match *self {
            Self::Exact(s) | Self::Prefix(s) | Self::Contains(s) => s,
        }
    }
}

impl<'a> From<&'a str> for Reply<'a> {
    fn from(s: &'a str) -> Self {
        Self::Exact(s)
    }
}

impl<'a, T, D, const N: usize> Modem<'a, T, D, N>
where
    T: Read + Write + ReadReady,
    D: DelayNs,
{
    /// Read lines until one matches `reply` or `timeout` passes.
    ///
    /// Blank lines, the echo of the last command and any other non-matching
    /// line are skipped. All of them draw on the same deadline. A line still
    /// open when the deadline passes is never matched.
    pub fn expect<'r>(&mut self, reply: impl Into<Reply<'r>>, timeout: Duration) -> Result<(), Error> {
        let reply = reply.into();
        let deadline = Deadline::after(timeout);

        loop {
            let line = self.read_line(deadline.remaining(), false)?;
            if line.terminated && !line.is_empty() {
                let text = self.reply();
                if self.is_noise(text) {
                    trace!("echo {}", text);
                } else if reply.matches(text) {
                    return Ok(());
                } else {
                    if self.config.fail_fast {
                        if let Ok(e) = text.parse::<ModemError>() {
                            debug!("{} while waiting for {}", text, reply.token());
                            return Err(e.into());
                        }
                    }
                    trace!("skipping {}", text);
                }
            }

            if deadline.expired() {
                debug!("timeout waiting for {}", reply.token());
                return Err(Error::Timeout);
            }
        }
    }

    /// Wait for the next line that is neither blank nor the command echo.
    pub(crate) fn next_reply(&mut self, timeout: Duration) -> Result<(), Error> {
        let deadline = Deadline::after(timeout);
        loop {
            let line = self.read_line(deadline.remaining(), false)?;
            if line.terminated && !line.is_empty() && !self.is_noise(self.reply()) {
                return Ok(());
            }
            if deadline.expired() {
                return Err(Error::Timeout);
            }
        }
    }

    /// Consume the final `OK` that closes a query, tolerating its absence.
    pub(crate) fn drain_final(&mut self) -> Result<(), Error> {
        let ok = self.config.profile.ok_reply;
        match self.expect(Reply::Exact(ok), self.config.default_timeout) {
            Ok(()) | Err(Error::Timeout) | Err(Error::Modem(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn is_noise(&self, text: &str) -> bool {
        text.trim().is_empty() || text == self.last_command.as_str()
    }
}
