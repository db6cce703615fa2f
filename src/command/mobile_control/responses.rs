//! Responses for Mobile equipment control and status Commands

use super::types::BatteryChargeStatus;
use crate::error::ParseError;
use crate::parse::FromField;

/// 5.2 Battery charge +CBC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryCharge {
    pub status: BatteryChargeStatus,
    pub percent: u16,
    pub millivolts: u16,
}

/// 5.4 Real time clock +CCLK
///
/// Reported as `"yy/MM/dd,hh:mm:ss±zz"`, the zone in quarters of an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Offset from UTC in quarters of an hour
    pub zone: i8,
}

impl DateTime {
    pub fn utc_offset_minutes(&self) -> i16 {
        i16::from(self.zone) * 15
    }
}

fn component(part: Option<&str>, range: core::ops::RangeInclusive<u8>) -> Result<u8, ParseError> {
    let value = u8::from_field(part.ok_or(ParseError::Malformed)?)?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ParseError::Malformed)
    }
}

impl FromField for DateTime {
    fn from_field(raw: &str) -> Result<Self, ParseError> {
        let (date, time) = raw.trim().split_once(',').ok_or(ParseError::Malformed)?;

        let mut date = date.split('/');
        let year = component(date.next(), 0..=99)?;
        let month = component(date.next(), 1..=12)?;
        let day = component(date.next(), 1..=31)?;

        let sign = time
            .find(|c: char| c == '+' || c == '-')
            .ok_or(ParseError::Malformed)?;
        let (clock, zone) = time.split_at(sign);
        let zone = i8::from_field(zone)?;
        if !(-48..=56).contains(&zone) {
            return Err(ParseError::Malformed);
        }

        let mut clock = clock.split(':');
        let hour = component(clock.next(), 0..=23)?;
        let minute = component(clock.next(), 0..=59)?;
        let second = component(clock.next(), 0..=59)?;

        if date.next().is_some() || clock.next().is_some() {
            return Err(ParseError::Malformed);
        }

        Ok(Self {
            year: 2000 + u16::from(year),
            month,
            day,
            hour,
            minute,
            second,
            zone,
        })
    }
}
