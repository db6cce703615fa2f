use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};
use heapless::{String, Vec};

use crate::command::MAX_COMMAND_LEN;
use crate::config::Config;
use crate::deadline::Deadline;
use crate::error::{io, Error};
use crate::modules::Profile;
use crate::ring::IncomingCall;

/// Data prompt the modem prints before accepting payload bytes.
const PROMPT: &[u8] = b"> ";

/// Outcome of a single [`Modem::read_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Line {
    /// Bytes held in the line buffer
    pub len: usize,
    /// The line did not fit and its tail was discarded
    pub truncated: bool,
    /// Ended by `\n`, the data prompt or the multiline idle gap rather than
    /// by the deadline
    pub terminated: bool,
    /// Holds bytes that are not valid UTF-8
    pub malformed: bool,
}

impl Line {
    const EMPTY: Self = Self {
        len: 0,
        truncated: false,
        terminated: false,
        malformed: false,
    };

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A whole line that can be decoded as sent.
    pub fn is_intact(&self) -> bool {
        self.terminated && !self.truncated && !self.malformed
    }
}

/// AT protocol engine bound to one serial transport.
///
/// `N` is the capacity of the line buffer. Every operation takes `&mut self`
/// and fully resolves before returning, so at most one command is ever
/// outstanding.
pub struct Modem<'a, T, D, const N: usize = 255> {
    pub(crate) serial: T,
    delay: D,
    ring: &'a IncomingCall,
    pub(crate) config: Config,
    line: Vec<u8, N>,
    last_line: Line,
    pub(crate) last_command: String<MAX_COMMAND_LEN>,
}

impl<'a, T, D, const N: usize> Modem<'a, T, D, N>
where
    T: Read + Write + ReadReady,
    D: DelayNs,
{
    pub fn new(serial: T, delay: D, ring: &'a IncomingCall, config: Config) -> Self {
        Self {
            serial,
            delay,
            ring,
            config,
            line: Vec::new(),
            last_line: Line::EMPTY,
            last_command: String::new(),
        }
    }

    /// Give back the transport and delay.
    pub fn release(self) -> (T, D) {
        (self.serial, self.delay)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn profile(&self) -> &Profile {
        &self.config.profile
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.config.profile = profile;
    }

    pub fn incoming_call(&self) -> &'a IncomingCall {
        self.ring
    }

    /// How the most recently read line ended.
    pub fn last_line(&self) -> Line {
        self.last_line
    }

    /// The most recently read line as text.
    ///
    /// Bytes that are not valid UTF-8 cut the text short at the first
    /// offending byte; [`Line::malformed`] is set for such a line and field
    /// extraction refuses it.
    pub fn reply(&self) -> &str {
        match core::str::from_utf8(&self.line) {
            Ok(s) => s,
            Err(e) => core::str::from_utf8(&self.line[..e.valid_up_to()]).unwrap_or(""),
        }
    }

    /// Discard buffered input until the line has been quiet for
    /// `flush_quiet`, or `flush_limit` has passed. Returns the number of
    /// bytes dropped.
    pub fn flush_input(&mut self) -> Result<usize, Error> {
        let limit = Deadline::after(self.config.flush_limit);
        let mut quiet = Deadline::after(self.config.flush_quiet);
        let mut scratch = [0u8; 32];
        let mut dropped = 0;

        loop {
            if self.serial.read_ready().map_err(io)? {
                let n = self.serial.read(&mut scratch).map_err(io)?;
                if n > 0 {
                    dropped += n;
                    quiet = Deadline::after(self.config.flush_quiet);
                }
            } else if quiet.expired() {
                break;
            } else {
                self.pause();
            }

            if limit.expired() {
                warn!("input still busy after flush limit");
                break;
            }
        }

        if dropped > 0 {
            debug!("flushed {} stale bytes", dropped);
        }
        Ok(dropped)
    }

    /// Read one line into the line buffer.
    ///
    /// In single line mode the line ends at `\n`. In multiline mode it ends
    /// when no byte has arrived for `multiline_idle` after the first payload
    /// byte, keeping interior `\n`. Either way the call returns once
    /// `timeout` passes, with whatever was captured and
    /// [`Line::terminated`] clear.
    pub fn read_line(&mut self, timeout: Duration, multiline: bool) -> Result<Line, Error> {
        let deadline = Deadline::after(timeout);
        let mut idle: Option<Deadline> = None;
        let mut truncated = false;
        let mut terminated = false;
        self.line.clear();

        loop {
            if let Some(byte) = self.read_byte()? {
                match byte {
                    b'\r' => {}
                    b'\n' if self.line.is_empty() => {}
                    b'\n' if !multiline => {
                        terminated = true;
                        break;
                    }
                    b => {
                        if self.line.push(b).is_err() {
                            truncated = true;
                        }
                    }
                }

                if multiline {
                    if !self.line.is_empty() {
                        idle = Some(Deadline::after(self.config.multiline_idle));
                    }
                } else if self.line.as_slice() == PROMPT {
                    terminated = true;
                    break;
                }

                if deadline.expired() {
                    break;
                }
                continue;
            }

            if idle.map_or(false, |gap| gap.expired()) {
                terminated = true;
                break;
            }
            if deadline.expired() {
                break;
            }
            self.pause();
        }

        if multiline {
            while self.line.last() == Some(&b'\n') {
                self.line.pop();
            }
        }

        if truncated {
            debug!("line truncated at {} bytes", N);
        }
        if !self.line.is_empty() {
            trace!("RX: {}", self.reply());
        }

        self.last_line = Line {
            len: self.line.len(),
            truncated,
            terminated,
            malformed: core::str::from_utf8(&self.line).is_err(),
        };
        Ok(self.last_line)
    }

    /// Read raw bytes into `buf` until it is full or `timeout` passes.
    pub fn read_raw(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize, Error> {
        let deadline = Deadline::after(timeout);
        let mut filled = 0;

        while filled < buf.len() {
            if self.serial.read_ready().map_err(io)? {
                let n = self.serial.read(&mut buf[filled..]).map_err(io)?;
                if n > 0 {
                    filled += n;
                    if deadline.expired() {
                        break;
                    }
                    continue;
                }
            }

            if deadline.expired() {
                break;
            }
            self.pause();
        }

        Ok(filled)
    }

    pub(crate) fn pause_for(&mut self, duration: Duration) {
        let us = u32::try_from(duration.as_micros()).unwrap_or(u32::MAX);
        self.delay.delay_us(us);
    }

    fn pause(&mut self) {
        self.pause_for(self.config.poll_interval);
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Error> {
        if !self.serial.read_ready().map_err(io)? {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        match self.serial.read(&mut byte).map_err(io)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}
