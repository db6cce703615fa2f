//! Scripted serial transport and delay for host tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::sync::Once;
use std::time::{Duration, Instant};
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write};

use crate::client::Modem;
use crate::config::Config;
use crate::ring::IncomingCall;

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
            .is_test(true)
            .init();
    });
}

/// Engine over `serial` with the default configuration.
pub fn modem(serial: MockSerial, ring: &IncomingCall) -> Modem<'_, MockSerial, StdDelay> {
    Modem::new(serial, StdDelay, ring, Config::default())
}

pub fn modem_with(
    serial: MockSerial,
    ring: &IncomingCall,
    config: Config,
) -> Modem<'_, MockSerial, StdDelay> {
    Modem::new(serial, StdDelay, ring, config)
}

pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns as u64));
    }
}

struct Responder {
    command: String,
    after: Duration,
    reply: Vec<u8>,
}

#[derive(Default)]
struct Inner {
    /// Pending input, each byte tagged with the moment it becomes readable
    rx: VecDeque<(Instant, u8)>,
    responders: VecDeque<Responder>,
    partial: Vec<u8>,
    written: Vec<u8>,
    commands: Vec<String>,
    flood: Option<u8>,
    broken: Option<ErrorKind>,
}

impl Inner {
    fn schedule(&mut self, at: Instant, bytes: &[u8]) {
        self.rx.extend(bytes.iter().map(|&b| (at, b)));
    }

    fn available(&self) -> usize {
        let now = Instant::now();
        self.rx.iter().take_while(|(at, _)| *at <= now).count()
    }

    fn command_written(&mut self, command: String) {
        if let Some(i) = self.responders.iter().position(|r| r.command == command) {
            if let Some(responder) = self.responders.remove(i) {
                let at = Instant::now() + responder.after;
                self.schedule(at, &responder.reply);
            }
        }
        self.commands.push(command);
    }
}

/// Cloneable handle to a scripted modem; clones share the same state so a
/// test can keep one while the engine owns the other.
#[derive(Clone, Default)]
pub struct MockSerial {
    inner: Rc<RefCell<Inner>>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `text` readable right away.
    pub fn inject(&self, text: &str) {
        self.inject_bytes(text.as_bytes());
    }

    pub fn inject_bytes(&self, bytes: &[u8]) {
        self.inner.borrow_mut().schedule(Instant::now(), bytes);
    }

    /// Make `text` readable once `after` has passed.
    pub fn inject_after(&self, after: Duration, text: &str) {
        self.inner
            .borrow_mut()
            .schedule(Instant::now() + after, text.as_bytes());
    }

    /// Answer the next write of `command` with `reply`.
    pub fn respond(&self, command: &str, reply: &str) {
        self.respond_after(command, Duration::ZERO, reply);
    }

    pub fn respond_after(&self, command: &str, after: Duration, reply: &str) {
        self.push_responder(command, after, reply.as_bytes());
    }

    pub fn respond_bytes(&self, command: &str, reply: &[u8]) {
        self.push_responder(command, Duration::ZERO, reply);
    }

    fn push_responder(&self, command: &str, after: Duration, reply: &[u8]) {
        self.inner.borrow_mut().responders.push_back(Responder {
            command: command.into(),
            after,
            reply: reply.to_vec(),
        });
    }

    /// Never run dry: once scripted input is exhausted, keep yielding `byte`.
    pub fn flood(&self, byte: u8) {
        self.inner.borrow_mut().flood = Some(byte);
    }

    /// Fail every subsequent read with `kind`.
    pub fn break_with(&self, kind: ErrorKind) {
        self.inner.borrow_mut().broken = Some(kind);
    }

    /// Command lines written so far, terminator stripped.
    pub fn commands(&self) -> Vec<String> {
        self.inner.borrow().commands.clone()
    }

    pub fn written(&self) -> Vec<u8> {
        self.inner.borrow().written.clone()
    }
}

impl ErrorType for MockSerial {
    type Error = ErrorKind;
}

impl ReadReady for MockSerial {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        let inner = self.inner.borrow();
        if let Some(kind) = inner.broken {
            return Err(kind);
        }
        Ok(inner.available() > 0 || inner.flood.is_some())
    }
}

impl Read for MockSerial {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut inner = self.inner.borrow_mut();
        if let Some(kind) = inner.broken {
            return Err(kind);
        }

        let ready = inner.available().min(buf.len());
        for slot in buf.iter_mut().take(ready) {
            if let Some((_, b)) = inner.rx.pop_front() {
                *slot = b;
            }
        }
        if ready > 0 {
            return Ok(ready);
        }

        match inner.flood {
            Some(b) => {
                buf.fill(b);
                Ok(buf.len())
            }
            None => Ok(0),
        }
    }
}

impl Write for MockSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let mut inner = self.inner.borrow_mut();
        inner.written.extend_from_slice(buf);

        for &b in buf {
            if b == b'\r' {
                let line = core::mem::take(&mut inner.partial);
                let command = String::from_utf8_lossy(&line).into_owned();
                inner.command_written(command);
            } else {
                inner.partial.push(b);
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[test]
fn responder_fires_on_terminator() {
    let mut serial = MockSerial::new();
    serial.respond("AT", "OK\r\n");

    serial.write_all(b"AT").unwrap();
    assert!(!serial.read_ready().unwrap());
    serial.write_all(b"\r").unwrap();
    assert!(serial.read_ready().unwrap());

    let mut buf = [0u8; 8];
    assert_eq!(serial.read(&mut buf).unwrap(), 4);
    assert_eq!(&buf[..4], b"OK\r\n");
    assert_eq!(serial.commands(), ["AT"]);
}

#[test]
fn delayed_input_is_not_ready_early() {
    let mut serial = MockSerial::new();
    serial.inject_after(Duration::from_millis(30), "x");
    assert!(!serial.read_ready().unwrap());
    std::thread::sleep(Duration::from_millis(40));
    assert!(serial.read_ready().unwrap());
}
