use core::str::FromStr;

/// Failure to extract a field from a reply line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// The prefix is absent from the line, or the line has too few fields
    NotFound,
    /// The field exists but does not convert to the requested type
    Malformed,
    /// The field does not fit the bounded output
    Overflow,
}

/// Final result codes reported by the modem in place of the expected reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModemError {
    /// Plain `ERROR`
    Generic,
    /// `+CME ERROR: <n>`, mobile equipment failure
    Cme(u16),
    /// `+CMS ERROR: <n>`, message service failure
    Cms(u16),
}

impl FromStr for ModemError {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "ERROR" {
            return Ok(Self::Generic);
        }
        // Verbose (textual) error reports carry no code we can keep.
        let code = |rest: &str| rest.trim().parse::<u16>().unwrap_or(u16::MAX);
        if let Some(rest) = s.strip_prefix("+CME ERROR:") {
            Ok(Self::Cme(code(rest)))
        } else if let Some(rest) = s.strip_prefix("+CMS ERROR:") {
            Ok(Self::Cms(code(rest)))
        } else {
            Err(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The deadline passed before a matching line arrived
    Timeout,
    /// The expected prefix or field is missing from the received line
    NotFound,
    /// The field was found but failed to convert
    Malformed,
    /// A field did not fit its bounded output
    Overflow,
    /// The rendered command does not fit the command buffer
    CommandOverflow,
    /// The modem answered with a final error result code
    Modem(ModemError),
    /// The operation is not available on the active chipset profile
    Unsupported,
    /// An argument is outside what the command accepts
    InvalidArgument,
    /// The transport reported a fault
    Io(embedded_io::ErrorKind),
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter<'_>) {
        match self {
            Self::Timeout => defmt::write!(f, "Timeout"),
            Self::NotFound => defmt::write!(f, "NotFound"),
            Self::Malformed => defmt::write!(f, "Malformed"),
            Self::Overflow => defmt::write!(f, "Overflow"),
            Self::CommandOverflow => defmt::write!(f, "CommandOverflow"),
            Self::Modem(e) => defmt::write!(f, "Modem({:?})", e),
            Self::Unsupported => defmt::write!(f, "Unsupported"),
            Self::InvalidArgument => defmt::write!(f, "InvalidArgument"),
            Self::Io(e) => defmt::write!(f, "Io({:?})", e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::NotFound => Self::NotFound,
            ParseError::Malformed => Self::Malformed,
            ParseError::Overflow => Self::Overflow,
        }
    }
}

impl From<ModemError> for Error {
    fn from(e: ModemError) -> Self {
        Self::Modem(e)
    }
}

pub(crate) fn io<E: embedded_io::Error>(e: E) -> Error {
    Error::Io(e.kind())
}
