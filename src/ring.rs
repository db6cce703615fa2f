use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Incoming call indicator raised by the modem's RI line.
///
/// Lives outside the [`Modem`](crate::Modem) so an interrupt handler can reach
/// it, typically as a `static`. The handler only ever calls [`signal`];
/// feature code consumes the flag with [`take`].
///
/// [`signal`]: IncomingCall::signal
/// [`take`]: IncomingCall::take
pub struct IncomingCall {
    pending: Mutex<CriticalSectionRawMutex, Cell<bool>>,
}

impl Default for IncomingCall {
    fn default() -> Self {
        Self::new()
    }
}

impl IncomingCall {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(false)),
        }
    }

    /// Interrupt entry point. Must not be followed by any modem I/O from the
    /// handler.
    pub fn signal(&self) {
        self.pending.lock(|p| p.set(true));
    }

    /// Consume the flag, returning whether a call was pending.
    pub fn take(&self) -> bool {
        self.pending.lock(|p| p.replace(false))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.lock(|p| p.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_consumes() {
        let ring = IncomingCall::new();
        assert!(!ring.take());

        ring.signal();
        assert!(ring.is_pending());
        assert!(ring.take());
        assert!(!ring.is_pending());
        assert!(!ring.take());
    }

    #[test]
    fn signal_is_idempotent() {
        let ring = IncomingCall::new();
        ring.signal();
        ring.signal();
        assert!(ring.take());
        assert!(!ring.take());
    }

    #[test]
    fn signal_from_another_context() {
        static RING: IncomingCall = IncomingCall::new();

        std::thread::spawn(|| RING.signal()).join().unwrap();
        assert!(RING.take());
    }
}
