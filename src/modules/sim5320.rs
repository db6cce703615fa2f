//! SIM5320A/E (3G).

use embassy_time::Duration;

use super::{Chipset, Profile, Quirks};

pub(crate) const PROFILE: Profile = Profile {
    chipset: Chipset::Sim5320A,
    ok_reply: "OK",
    hang_up: "ATH",
    pick_up: "ATA",
    // CPOF answers with a plain OK
    power_down: "AT+CPOF",
    power_down_reply: "OK",
    power_down_timeout: Duration::from_secs(10),
    baud_rate: "AT+IPR=",
    quirks: Quirks {
        battery_in_volts: true,
        battery_voltage_index: 2,
    },
};
