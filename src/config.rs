use embassy_time::Duration;

use crate::modules::{Chipset, Profile};

/// Timing and behaviour of a [`Modem`](crate::Modem).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub(crate) profile: Profile,
    pub(crate) default_timeout: Duration,
    pub(crate) poll_interval: Duration,
    pub(crate) multiline_idle: Duration,
    pub(crate) flush_quiet: Duration,
    pub(crate) flush_limit: Duration,
    pub(crate) boot_timeout: Duration,
    pub(crate) fail_fast: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: Chipset::Generic.profile(),
            default_timeout: Duration::from_millis(500),
            poll_interval: Duration::from_millis(1),
            multiline_idle: Duration::from_millis(100),
            flush_quiet: Duration::from_millis(40),
            flush_limit: Duration::from_secs(1),
            boot_timeout: Duration::from_secs(7),
            fail_fast: true,
        }
    }
}

impl Config {
    #[must_use]
    pub fn new(chipset: Chipset) -> Self {
        Self {
            profile: chipset.profile(),
            ..Self::default()
        }
    }

    pub fn profile(self, profile: Profile) -> Self {
        Self { profile, ..self }
    }

    /// Timeout of plain `OK` transactions.
    pub fn with_default_timeout(self, default_timeout: Duration) -> Self {
        Self {
            default_timeout,
            ..self
        }
    }

    /// Pause between availability checks while waiting for input.
    pub fn with_poll_interval(self, poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            ..self
        }
    }

    /// Silence that ends a multiline read.
    pub fn with_multiline_idle(self, multiline_idle: Duration) -> Self {
        Self {
            multiline_idle,
            ..self
        }
    }

    /// Silence that ends the input flush preceding every command.
    pub fn with_flush_quiet(self, flush_quiet: Duration) -> Self {
        Self {
            flush_quiet,
            ..self
        }
    }

    pub fn with_flush_limit(self, flush_limit: Duration) -> Self {
        Self {
            flush_limit,
            ..self
        }
    }

    /// How long [`begin`](crate::Modem::begin) keeps probing with `AT`.
    pub fn with_boot_timeout(self, boot_timeout: Duration) -> Self {
        Self {
            boot_timeout,
            ..self
        }
    }

    /// Stop waiting as soon as the modem reports `ERROR`, `+CME ERROR` or
    /// `+CMS ERROR`.
    pub fn fail_fast(self, fail_fast: bool) -> Self {
        Self { fail_fast, ..self }
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    pub fn boot_timeout(&self) -> Duration {
        self.boot_timeout
    }
}
