//! Argument and parameter types used by Mobile equipment control and status Commands and Responses

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Functionality {
    /// • 0: minimum functionality
    Minimum = 0,
    /// • 1: full functionality
    Full = 1,
    /// • 4: disable phone both transmit and receive RF circuits
    DisableRf = 4,
}

/// Network status the `+SLEDS` blink timer applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetLightState {
    /// • 1: not registered
    Searching = 1,
    /// • 2: registered
    Registered = 2,
    /// • 3: PPP communication established
    Ppp = 3,
}

/// Blink pattern of the network status LED, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetLightTimer {
    pub state: NetLightState,
    /// 0 or 40..=65535
    pub on_ms: u16,
    /// 0 or 40..=65535
    pub off_ms: u16,
}

impl NetLightTimer {
    pub(crate) fn is_valid(&self) -> bool {
        let period = |ms: u16| ms == 0 || ms >= 40;
        period(self.on_ms) && period(self.off_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryChargeStatus {
    /// • 0: not charging
    NotCharging,
    /// • 1: charging
    Charging,
    /// • 2: charging has finished
    Finished,
    Unknown,
}

impl From<u8> for BatteryChargeStatus {
    fn from(bcs: u8) -> Self {
        match bcs {
            0 => Self::NotCharging,
            1 => Self::Charging,
            2 => Self::Finished,
            _ => Self::Unknown,
        }
    }
}
