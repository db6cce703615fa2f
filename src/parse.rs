//! Positional field extraction from AT reply lines.
//!
//! Replies such as `+CSQ: 14,99` or `+CCID: "8988303000000000001",90` are a
//! prefix followed by delimited fields, some of them quoted. A [`Field`]
//! names the prefix, the delimiter and the zero-based index of the wanted
//! field; [`FromField`] converts the selected text into a typed value.

use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};
use heapless::String;

use crate::client::Modem;
use crate::error::ParseError;

/// Location of one field inside a reply line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field<'a> {
    pub prefix: &'a str,
    pub delimiter: char,
    pub index: usize,
    pub quoted: bool,
}

impl<'a> Field<'a> {
    /// First comma separated field after `prefix`.
    pub const fn new(prefix: &'a str) -> Self {
        Self {
            prefix,
            delimiter: ',',
            index: 0,
            quoted: false,
        }
    }

    pub const fn index(self, index: usize) -> Self {
        Self { index, ..self }
    }

    pub const fn delimiter(self, delimiter: char) -> Self {
        Self { delimiter, ..self }
    }

    /// Honour `"..."` quoting when splitting and strip the quotes from the result.
    pub const fn quoted(self) -> Self {
        Self {
            quoted: true,
            ..self
        }
    }
}

/// Text following the first occurrence of `prefix` in `line`.
fn payload<'l>(line: &'l str, prefix: &str) -> Result<&'l str, ParseError> {
    line.find(prefix)
        .map(|at| &line[at + prefix.len()..])
        .ok_or(ParseError::NotFound)
}

/// The `field.index`-th delimited field after the prefix, whitespace trimmed.
pub fn field<'l>(line: &'l str, field: &Field<'_>) -> Result<&'l str, ParseError> {
    payload(line, field.prefix)?
        .split(field.delimiter)
        .nth(field.index)
        .map(str::trim)
        .ok_or(ParseError::NotFound)
}

/// Like [`field`], but delimiters inside quotes do not split and surrounding
/// quotes are removed. Unquoted fields are returned unchanged.
pub fn quoted_field<'l>(line: &'l str, field: &Field<'_>) -> Result<&'l str, ParseError> {
    let rest = payload(line, field.prefix)?;

    let mut quoted = false;
    let mut current = 0;
    let mut start = 0;
    for (i, c) in rest.char_indices() {
        if c == '"' {
            quoted = !quoted;
        } else if !quoted && c == field.delimiter {
            if current == field.index {
                return Ok(strip_quotes(&rest[start..i]));
            }
            current += 1;
            start = i + c.len_utf8();
        }
    }

    if current == field.index {
        Ok(strip_quotes(&rest[start..]))
    } else {
        Err(ParseError::NotFound)
    }
}

/// Trim whitespace, then drop one leading and one trailing `"` where present.
pub fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

/// Select the field described by `loc` and convert it.
pub fn parse<V: FromField>(line: &str, loc: &Field<'_>) -> Result<V, ParseError> {
    let raw = if loc.quoted {
        quoted_field(line, loc)?
    } else {
        field(line, loc)?
    };
    V::from_field(raw)
}

/// `raw`, a slice of `line`, is followed by nothing but whitespace.
fn runs_to_end(line: &str, raw: &str) -> bool {
    let end = raw.as_ptr() as usize - line.as_ptr() as usize + raw.len();
    line.get(end..).map_or(true, |rest| rest.trim().is_empty())
}

/// Conversion from the text of a single reply field.
pub trait FromField: Sized {
    fn from_field(raw: &str) -> Result<Self, ParseError>;
}

macro_rules! from_field_numeric {
    ($($t:ty),*) => {
        $(
            impl FromField for $t {
                fn from_field(raw: &str) -> Result<Self, ParseError> {
                    raw.trim().parse().map_err(|_| ParseError::Malformed)
                }
            }
        )*
    };
}

from_field_numeric!(u8, u16, u32, u64, usize, i8, i16, i32, i64, f32, f64);

impl<const L: usize> FromField for String<L> {
    fn from_field(raw: &str) -> Result<Self, ParseError> {
        let mut s = String::new();
        s.push_str(raw).map_err(|_| ParseError::Overflow)?;
        Ok(s)
    }
}

impl<'a, T, D, const N: usize> Modem<'a, T, D, N>
where
    T: Read + Write + ReadReady,
    D: DelayNs,
{
    /// Decode `loc` from the most recently received line.
    pub fn parse_reply<V: FromField>(&self, loc: &Field<'_>) -> Result<V, ParseError> {
        V::from_field(self.reply_field(loc)?)
    }

    /// Borrow the raw text of `loc` from the most recently received line.
    ///
    /// A line holding invalid UTF-8 is [`ParseError::Malformed`]. On a
    /// truncated line a field that runs into the cut is
    /// [`ParseError::Overflow`]; fields wholly before it are still returned.
    pub fn reply_field(&self, loc: &Field<'_>) -> Result<&str, ParseError> {
        let line = self.last_line();
        if line.malformed {
            return Err(ParseError::Malformed);
        }

        let text = self.reply();
        let raw = if loc.quoted {
            quoted_field(text, loc)?
        } else {
            field(text, loc)?
        };
        if line.truncated && runs_to_end(text, raw) {
            return Err(ParseError::Overflow);
        }
        Ok(raw)
    }
}
