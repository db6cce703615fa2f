//! ### 5 - Mobile equipment control and status

pub mod responses;
pub mod types;

use core::fmt::Write as _;

use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};
use heapless::String;
use responses::*;
use types::*;

use crate::client::Modem;
use crate::command::Command;
use crate::error::Error;
use crate::parse::Field;
use crate::reply::Reply;

/// 5.1 Set phone functionality +CFUN
pub const fn set_functionality(fun: Functionality) -> Command<'static> {
    Command::int("AT+CFUN=", fun as i32)
}

/// `AT+CFUN=1,1` full functionality with a module reset
pub const RESET: Command<'static> = Command::pair("AT+CFUN=", 1, 1);

/// 5.2 Battery charge +CBC
///
/// `+CBC: <bcs>,<bcl>,<voltage>`; SIM7500/SIM7600 answer `+CBC: <volts>V`.
pub const GET_BATTERY_CHARGE: Command<'static> = Command::new("AT+CBC");
pub const BATTERY: Field<'static> = Field::new("+CBC:");
pub const BATTERY_PERCENT: Field<'static> = BATTERY.index(1);

/// 5.3 Read ADC +CADC
///
/// `+CADC: <status>,<value>`, a status of 1 marks a valid reading in mV.
pub const GET_ADC: Command<'static> = Command::new("AT+CADC?");
pub const ADC_STATUS: Field<'static> = Field::new("+CADC:");
pub const ADC_VALUE: Field<'static> = ADC_STATUS.index(1);

/// 5.4 Real time clock +CCLK
pub const GET_CLOCK: Command<'static> = Command::new("AT+CCLK?");
pub const CLOCK: Field<'static> = Field::new("+CCLK:").quoted();

/// Length of `yy/MM/dd,hh:mm:ss±zz`
pub const CLOCK_LEN: usize = 20;

/// 5.5 Get local timestamp +CLTS
///
/// The RTC follows the network time once enabled, effective after a restart.
pub const fn set_network_time_sync(enable: bool) -> Command<'static> {
    Command::int("AT+CLTS=", enable as i32)
}

/// Store the active profile &W
pub const SAVE_PROFILE: Command<'static> = Command::new("AT&W");

/// 5.6 Configure slow clock +CSCLK
///
/// With slow clock enabled the module sleeps while DTR is high.
pub const fn set_sleep_mode(enable: bool) -> Command<'static> {
    Command::int("AT+CSCLK=", enable as i32)
}

/// 5.7 Network status LED +CNETLIGHT
pub const fn set_net_light(enable: bool) -> Command<'static> {
    Command::int("AT+CNETLIGHT=", enable as i32)
}

/// 5.8 Network status LED timer +SLEDS
///
/// `AT+SLEDS=<mode>,<timer_on>,<timer_off>`
pub const NET_LIGHT_TIMER: &str = "AT+SLEDS=";

impl<'a, T, D, const N: usize> Modem<'a, T, D, N>
where
    T: Read + Write + ReadReady,
    D: DelayNs,
{
    pub fn set_functionality(&mut self, fun: Functionality) -> Result<(), Error> {
        // Radio state changes take longer than a plain query
        let timeout = self.config.default_timeout * 20;
        let ok = self.config.profile.ok_reply;
        self.send_check_reply(&set_functionality(fun), Reply::Exact(ok), timeout)
    }

    /// Battery voltage in millivolts.
    pub fn battery_voltage(&mut self) -> Result<u16, Error> {
        let timeout = self.config.default_timeout;
        let quirks = self.config.profile.quirks;
        let field = BATTERY.index(quirks.battery_voltage_index);

        if !quirks.battery_in_volts {
            return self.send_parse_reply(&GET_BATTERY_CHARGE, &field, timeout);
        }

        self.send_query(&GET_BATTERY_CHARGE, BATTERY.prefix, timeout)?;
        let millivolts = self
            .reply_field(&field)
            .map_err(Error::from)
            .and_then(volts_to_millivolts);
        self.drain_final()?;
        millivolts
    }

    /// Battery charge level in percent.
    pub fn battery_percent(&mut self) -> Result<u16, Error> {
        let timeout = self.config.default_timeout;
        self.send_parse_reply(&GET_BATTERY_CHARGE, &BATTERY_PERCENT, timeout)
    }

    pub fn battery_charge(&mut self) -> Result<BatteryCharge, Error> {
        let timeout = self.config.default_timeout;
        self.send_query(&GET_BATTERY_CHARGE, BATTERY.prefix, timeout)?;
        let status = self.parse_reply::<u8>(&BATTERY);
        let percent = self.parse_reply(&BATTERY_PERCENT);
        let millivolts = self.parse_reply(&BATTERY.index(2));
        self.drain_final()?;

        Ok(BatteryCharge {
            status: BatteryChargeStatus::from(status?),
            percent: percent?,
            millivolts: millivolts?,
        })
    }

    /// ADC input voltage in millivolts.
    pub fn adc_voltage(&mut self) -> Result<u16, Error> {
        let timeout = self.config.default_timeout;
        self.send_query(&GET_ADC, ADC_STATUS.prefix, timeout)?;
        let status = self.parse_reply::<u8>(&ADC_STATUS);
        let value = self.parse_reply::<u16>(&ADC_VALUE);
        self.drain_final()?;

        match status? {
            1 => Ok(value?),
            _ => Err(Error::NotFound),
        }
    }

    /// Switch the module off with the profile's power down command.
    pub fn power_down(&mut self) -> Result<(), Error> {
        let profile = self.config.profile;
        info!("powering down");
        self.send_check_reply(
            &Command::new(profile.power_down),
            Reply::Exact(profile.power_down_reply),
            profile.power_down_timeout,
        )
    }

    pub fn reset(&mut self) -> Result<(), Error> {
        let timeout = self.config.default_timeout * 20;
        let ok = self.config.profile.ok_reply;
        self.send_check_reply(&RESET, Reply::Exact(ok), timeout)
    }

    /// Let the module sleep while DTR is high.
    pub fn set_sleep_mode(&mut self, enable: bool) -> Result<(), Error> {
        self.send_check_ok(&set_sleep_mode(enable))
    }

    /// Switch the network status LED, optionally reprogramming its blink
    /// pattern for one network state.
    pub fn set_net_light(&mut self, enable: bool, timer: Option<NetLightTimer>) -> Result<(), Error> {
        let timer = match timer {
            Some(timer) if !timer.is_valid() => return Err(Error::InvalidArgument),
            Some(timer) if enable => Some(timer),
            _ => None,
        };

        self.send_check_ok(&set_net_light(enable))?;

        if let Some(timer) = timer {
            let mut args: String<20> = String::new();
            write!(args, "{},{},{}", timer.state as u8, timer.on_ms, timer.off_ms)
                .map_err(|_| Error::CommandOverflow)?;
            self.send_check_ok(&Command::str(NET_LIGHT_TIMER, &args))?;
        }
        Ok(())
    }

    /// Follow the network time and persist the setting.
    pub fn set_network_time_sync(&mut self, enable: bool) -> Result<(), Error> {
        self.send_check_ok(&set_network_time_sync(enable))?;
        self.send_check_ok(&SAVE_PROFILE)
    }

    /// The RTC as reported, `yy/MM/dd,hh:mm:ss±zz`.
    pub fn time(&mut self) -> Result<String<CLOCK_LEN>, Error> {
        let timeout = self.config.default_timeout;
        self.send_parse_reply(&GET_CLOCK, &CLOCK, timeout)
    }

    pub fn clock(&mut self) -> Result<DateTime, Error> {
        let timeout = self.config.default_timeout;
        self.send_parse_reply(&GET_CLOCK, &CLOCK, timeout)
    }
}

fn volts_to_millivolts(raw: &str) -> Result<u16, Error> {
    let volts: f32 = raw
        .trim()
        .trim_end_matches('V')
        .parse()
        .map_err(|_| Error::Malformed)?;
    if !(0.0..=65.0).contains(&volts) {
        return Err(Error::Malformed);
    }
    Ok((volts * 1000.0 + 0.5) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::modules::Chipset;
    use crate::ring::IncomingCall;
    use crate::test_helpers::{self, MockSerial};

    #[test]
    fn battery_millivolts() {
        let serial = MockSerial::new();
        serial.respond("AT+CBC", "AT+CBC\r\n+CBC: 0,82,4075\r\n\r\nOK\r\n");
        serial.respond("AT+CBC", "+CBC: 0,82,4075\r\n\r\nOK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem_with(serial, &ring, Config::new(Chipset::Sim7000));

        assert_eq!(modem.battery_voltage(), Ok(4075));
        assert_eq!(modem.battery_percent(), Ok(82));
    }

    #[test]
    fn battery_volts_on_3g() {
        let serial = MockSerial::new();
        serial.respond("AT+CBC", "+CBC: 0,75,3.912\r\n\r\nOK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem_with(serial, &ring, Config::new(Chipset::Sim5320A));

        assert_eq!(modem.battery_voltage(), Ok(3912));
    }

    #[test]
    fn battery_volts_with_unit() {
        let serial = MockSerial::new();
        serial.respond("AT+CBC", "+CBC: 4.056V\r\n\r\nOK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem_with(serial, &ring, Config::new(Chipset::Sim7600));

        assert_eq!(modem.battery_voltage(), Ok(4056));
    }

    #[test]
    fn battery_charge() {
        let serial = MockSerial::new();
        serial.respond("AT+CBC", "+CBC: 1,64,3890\r\n\r\nOK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(serial, &ring);

        assert_eq!(
            modem.battery_charge(),
            Ok(BatteryCharge {
                status: BatteryChargeStatus::Charging,
                percent: 64,
                millivolts: 3890,
            })
        );
    }

    #[test]
    fn adc() {
        let serial = MockSerial::new();
        serial.respond("AT+CADC?", "+CADC: 1,1024\r\n\r\nOK\r\n");
        serial.respond("AT+CADC?", "+CADC: 0,0\r\n\r\nOK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(serial, &ring);

        assert_eq!(modem.adc_voltage(), Ok(1024));
        assert_eq!(modem.adc_voltage(), Err(Error::NotFound));
    }

    #[test]
    fn functionality() {
        let serial = MockSerial::new();
        serial.respond("AT+CFUN=4", "OK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(serial.clone(), &ring);

        modem.set_functionality(Functionality::DisableRf).unwrap();
        assert_eq!(serial.commands(), ["AT+CFUN=4"]);
    }

    #[test]
    fn power_down_per_profile() {
        let serial = MockSerial::new();
        serial.respond("AT+CPOWD=1", "\r\nNORMAL POWER DOWN\r\n");
        serial.respond("AT+CPOF", "\r\nOK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem_with(serial.clone(), &ring, Config::new(Chipset::Sim800L));

        modem.power_down().unwrap();
        modem.set_profile(Chipset::Sim5320E.profile());
        modem.power_down().unwrap();
        assert_eq!(serial.commands(), ["AT+CPOWD=1", "AT+CPOF"]);
    }

    #[test]
    fn sleep_mode() {
        let serial = MockSerial::new();
        serial.respond("AT+CSCLK=1", "AT+CSCLK=1\r\nOK\r\n");
        serial.respond("AT+CSCLK=0", "ERROR\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(serial.clone(), &ring);

        modem.set_sleep_mode(true).unwrap();
        assert_eq!(
            modem.set_sleep_mode(false),
            Err(Error::Modem(crate::error::ModemError::Generic))
        );
        assert_eq!(serial.commands(), ["AT+CSCLK=1", "AT+CSCLK=0"]);
    }

    #[test]
    fn net_light_with_timer() {
        let serial = MockSerial::new();
        serial.respond("AT+CNETLIGHT=1", "OK\r\n");
        serial.respond("AT+SLEDS=2,64,3000", "OK\r\n");
        serial.respond("AT+CNETLIGHT=0", "OK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(serial.clone(), &ring);

        let timer = NetLightTimer {
            state: NetLightState::Registered,
            on_ms: 64,
            off_ms: 3000,
        };
        modem.set_net_light(true, Some(timer)).unwrap();
        // switching off ignores the timer
        modem.set_net_light(false, Some(timer)).unwrap();
        assert_eq!(
            serial.commands(),
            ["AT+CNETLIGHT=1", "AT+SLEDS=2,64,3000", "AT+CNETLIGHT=0"]
        );
    }

    #[test]
    fn net_light_rejects_short_period() {
        let serial = MockSerial::new();
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(serial.clone(), &ring);

        let timer = NetLightTimer {
            state: NetLightState::Searching,
            on_ms: 10,
            off_ms: 800,
        };
        assert_eq!(modem.set_net_light(true, Some(timer)), Err(Error::InvalidArgument));
        assert!(serial.commands().is_empty());
    }

    #[test]
    fn clock() {
        let serial = MockSerial::new();
        serial.respond("AT+CCLK?", "+CCLK: \"24/03/17,12:05:09+04\"\r\n\r\nOK\r\n");
        serial.respond("AT+CCLK?", "+CCLK: \"24/03/17,12:05:09+04\"\r\n\r\nOK\r\n");
        serial.respond("AT+CCLK?", "+CCLK: \"80/00/00,00:00:00+00\"\r\n\r\nOK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(serial, &ring);

        assert_eq!(modem.time().unwrap(), "24/03/17,12:05:09+04");
        let time = modem.clock().unwrap();
        assert_eq!((time.year, time.month, time.day), (2024, 3, 17));
        assert_eq!((time.hour, time.minute, time.second), (12, 5, 9));
        assert_eq!(modem.clock(), Err(Error::Malformed));
    }

    #[test]
    fn network_time_sync_is_saved() {
        let serial = MockSerial::new();
        serial.respond("AT+CLTS=1", "OK\r\n");
        serial.respond("AT&W", "OK\r\n");
        let ring = IncomingCall::new();
        let mut modem = test_helpers::modem(serial.clone(), &ring);

        modem.set_network_time_sync(true).unwrap();
        assert_eq!(serial.commands(), ["AT+CLTS=1", "AT&W"]);
    }

    #[test]
    fn volts_conversion() {
        assert_eq!(volts_to_millivolts("3.7"), Ok(3700));
        assert_eq!(volts_to_millivolts(" 4.2V"), Ok(4200));
        assert_eq!(volts_to_millivolts("abc"), Err(Error::Malformed));
        assert_eq!(volts_to_millivolts("-1.0"), Err(Error::Malformed));
    }
}
