use embassy_time::{Duration, Instant};

/// Absolute point in time after which a blocking operation gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline(Instant);

impl Deadline {
    /// Deadline `timeout` from now, saturating at [`Instant::MAX`].
    pub fn after(timeout: Duration) -> Self {
        Self(Instant::now().checked_add(timeout).unwrap_or(Instant::MAX))
    }

    pub fn at(instant: Instant) -> Self {
        Self(instant)
    }

    pub fn instant(&self) -> Instant {
        self.0
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.0
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self) -> Duration {
        self.0
            .checked_duration_since(Instant::now())
            .unwrap_or(Duration::from_ticks(0))
    }
}
