//! ### 4 - General Commands

pub mod responses;

use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};
use heapless::String;
use responses::*;

use crate::client::Modem;
use crate::command::Command;
use crate::error::Error;
use crate::parse::strip_quotes;

/// 4.1 Display product identification information I
///
/// Multiline text, e.g. `SIM800 R13.08` or `Model: SIMCOM_SIM5320A`.
pub const IDENTIFICATION: Command<'static> = Command::new("ATI");

/// 4.2 Request model identification +GMM
pub const GET_MODEL_ID: Command<'static> = Command::new("AT+GMM");

/// 4.3 Request product serial number identification +GSN
///
/// Replies with the bare 15 digit IMEI, no prefix.
pub const GET_IMEI: Command<'static> = Command::new("AT+GSN");

/// 4.4 Show ICCID +CCID
///
/// Depending on the chipset the ICCID comes bare, quoted or behind a
/// `+CCID:` / `+ICCID:` prefix.
pub const GET_CCID: Command<'static> = Command::new("AT+CCID");

impl<'a, T, D, const N: usize> Modem<'a, T, D, N>
where
    T: Read + Write + ReadReady,
    D: DelayNs,
{
    pub fn imei(&mut self) -> Result<Imei, Error> {
        let timeout = self.config.default_timeout;
        let imei = Imei::try_from(self.send_read_reply(&GET_IMEI, timeout)?);
        self.drain_final()?;
        imei
    }

    pub fn sim_ccid(&mut self) -> Result<Ccid, Error> {
        let timeout = self.config.default_timeout;
        let ccid = Ccid::try_from(self.send_read_reply(&GET_CCID, timeout)?);
        self.drain_final()?;
        ccid
    }

    /// Model identification, `AT+GMM`.
    pub fn model_id(&mut self) -> Result<String<32>, Error> {
        let timeout = self.config.default_timeout;
        let text = self.send_read_reply(&GET_MODEL_ID, timeout)?;
        let mut model = String::new();
        let copied = model.push_str(strip_quotes(text));
        self.drain_final()?;
        copied.map_err(|_| Error::Overflow)?;
        Ok(model)
    }
}
