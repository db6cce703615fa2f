#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod client;
pub mod command;
pub mod config;
pub mod deadline;
pub mod error;
pub mod modules;
pub mod parse;
pub mod reply;
pub mod ring;

#[cfg(test)]
mod test_helpers;

pub use client::{Line, Modem};
pub use command::{Command, Suffix};
pub use config::Config;
pub use deadline::Deadline;
pub use error::{Error, ModemError, ParseError};
pub use modules::{Chipset, Profile};
pub use parse::{Field, FromField};
pub use reply::Reply;
pub use ring::IncomingCall;
