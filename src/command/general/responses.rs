//! Responses for General Commands
use heapless::String;

use crate::error::Error;
use crate::parse::{quoted_field, strip_quotes, Field};

/// 4.3 International Mobile Equipment Identity
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Imei(String<15>);

impl Imei {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Imei {
    type Error = Error;

    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let digits = line.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Malformed);
        }
        let mut imei = String::new();
        imei.push_str(digits).map_err(|_| Error::Overflow)?;
        Ok(Self(imei))
    }
}

/// 4.4 Integrated Circuit Card ID of the SIM
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ccid(String<22>);

impl Ccid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Ccid {
    type Error = Error;

    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let raw = ["+CCID:", "+ICCID:"]
            .iter()
            .find_map(|prefix| quoted_field(line, &Field::new(prefix).quoted()).ok())
            .unwrap_or_else(|| strip_quotes(line));

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(Error::Malformed);
        }
        let mut ccid = String::new();
        ccid.push_str(raw).map_err(|_| Error::Overflow)?;
        Ok(Self(ccid))
    }
}
