//! SIM7500 and SIM7600 (LTE CAT-1/CAT-4).

use embassy_time::Duration;

use super::{Chipset, Profile, Quirks};

pub(crate) const PROFILE: Profile = Profile {
    chipset: Chipset::Sim7500,
    ok_reply: "OK",
    hang_up: "AT+CHUP",
    pick_up: "ATA",
    power_down: "AT+CPOF",
    power_down_reply: "OK",
    power_down_timeout: Duration::from_secs(10),
    baud_rate: "AT+IPREX=",
    // `+CBC: 3.912V`
    quirks: Quirks {
        battery_in_volts: true,
        battery_voltage_index: 0,
    },
};
