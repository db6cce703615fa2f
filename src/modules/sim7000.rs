//! SIM7000 and SIM7070 (LTE CAT-M / NB-IoT).

use embassy_time::Duration;

use super::{Chipset, Profile, Quirks};

pub(crate) const PROFILE: Profile = Profile {
    chipset: Chipset::Sim7000,
    ok_reply: "OK",
    hang_up: "AT+CHUP",
    pick_up: "ATA",
    power_down: "AT+CPOWD=1",
    power_down_reply: "NORMAL POWER DOWN",
    power_down_timeout: Duration::from_secs(10),
    baud_rate: "AT+IPR=",
    quirks: Quirks {
        battery_in_volts: false,
        battery_voltage_index: 2,
    },
};
