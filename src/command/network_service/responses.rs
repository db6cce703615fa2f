//! Responses for Network service Commands

/// 7.2 Signal quality +CSQ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalQuality {
    /// • 0: -113 dBm or less
    /// • 1: -111 dBm
    /// • 2..30: -109 to -53 dBm
    /// • 31: -51 dBm or greater
    /// • 99: not known or not detectable
    pub rssi: u8,
    /// Channel bit error rate class, 0..=7 or 99
    pub ber: u8,
}

impl SignalQuality {
    /// Received signal strength in dBm, `None` when not detectable.
    pub fn dbm(&self) -> Option<i16> {
        match self.rssi {
            0..=31 => Some(-113 + 2 * i16::from(self.rssi)),
            _ => None,
        }
    }
}
