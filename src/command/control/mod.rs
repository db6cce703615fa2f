//! ### 3 - V.25TER and start up control

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};

use crate::client::Modem;
use crate::command::general::{GET_MODEL_ID, IDENTIFICATION};
use crate::command::{Command, AT};
use crate::deadline::Deadline;
use crate::error::Error;
use crate::modules::Chipset;
use crate::reply::Reply;

/// 3.1 Set command echo mode E
pub const fn set_echo(enable: bool) -> Command<'static> {
    if enable {
        Command::new("ATE1")
    } else {
        Command::new("ATE0")
    }
}

/// Pause between `AT` attempts while the module boots.
const HANDSHAKE_INTERVAL: Duration = Duration::from_millis(500);

impl<'a, T, D, const N: usize> Modem<'a, T, D, N>
where
    T: Read + Write + ReadReady,
    D: DelayNs,
{
    /// Bring up a freshly powered modem.
    ///
    /// Probes with `AT` until the module answers or `boot_timeout` passes,
    /// turns echo off, then identifies the chipset and switches to its
    /// profile. An unrecognised chipset keeps the generic profile.
    pub fn begin(&mut self) -> Result<Chipset, Error> {
        info!("waiting for modem");
        let deadline = Deadline::after(self.config.boot_timeout);
        loop {
            match self.send_check_ok(&AT) {
                Ok(()) => break,
                Err(Error::Timeout | Error::Modem(_)) if !deadline.expired() => {
                    self.pause_for(HANDSHAKE_INTERVAL);
                }
                Err(e) => {
                    error!("modem did not answer");
                    return Err(e);
                }
            }
        }

        // Settle autobauding, the first answers can be garbled
        for _ in 0..3 {
            self.send_check_ok(&AT).ok();
        }

        self.set_echo(false)?;

        let chipset = self.identify()?;
        info!("found {:?}", chipset);
        self.set_profile(chipset.profile());
        Ok(chipset)
    }

    pub fn set_echo(&mut self, enable: bool) -> Result<(), Error> {
        // The modem may still echo this very command
        self.send_check_ok(&set_echo(enable))
    }

    /// Switch the UART to `baud` with the profile's baud rate command.
    pub fn set_baud_rate(&mut self, baud: u32) -> Result<(), Error> {
        let baud = i32::try_from(baud).map_err(|_| Error::InvalidArgument)?;
        let prefix = self.config.profile.baud_rate;
        self.send_check_ok(&Command::int(prefix, baud))
    }

    /// `AT` answered with `OK`.
    pub fn is_alive(&mut self) -> bool {
        self.send_check_ok(&AT).is_ok()
    }

    fn identify(&mut self) -> Result<Chipset, Error> {
        let timeout = self.config.default_timeout;
        self.send_command(&IDENTIFICATION)?;
        // ATI text and its final OK arrive as one block
        self.read_line(timeout, true)?;

        let identified = Chipset::from_identification(self.reply());
        match identified {
            Some(Chipset::Sim800L) => {
                // ATI cannot tell the SIM800 variants apart
                let model = self.send_read_reply(&GET_MODEL_ID, timeout)?;
                let chipset = if Reply::Contains("SIM800H").matches(model) {
                    Chipset::Sim800H
                } else {
                    Chipset::Sim800L
                };
                self.drain_final()?;
                Ok(chipset)
            }
            Some(chipset) => Ok(chipset),
            None => {
                warn!(
                    "Attempting to run {} using generic parameters! This may or may not work.",
                    self.reply()
                );
                Ok(Chipset::Generic)
            }
        }
    }
}
