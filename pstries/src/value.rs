//! Keys and values stored in a trie

use crate::TERMINAL_CHAR;
use core::fmt::{self, Display, Write};
use smol_str::SmolStr;

/// Sequence of single-byte character codes spelling one table entry
#[repr(transparent)]
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Key(Vec<u8>);

impl Key {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the key contains the reserved terminal character code
    pub fn contains_terminal(&self) -> bool {
        self.0.contains(&TERMINAL_CHAR)
    }
}

/// Converts a string with every character in the range `U+0000..=U+00FF` into a key
impl TryFrom<&str> for Key {
    type Error = String;

    fn try_from(string: &str) -> Result<Self, Self::Error> {
        string
            .chars()
            .map(|c| u8::try_from(u32::from(c)).map_err(|_| string.to_string()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl From<&[u8]> for Key {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.iter().map(|b| char::from(*b)) {
            for escaped in c.escape_debug() {
                f.write_char(escaped)?;
            }
        }

        Ok(())
    }
}

/// Result stored at the end of a key
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Value {
    /// Number emitted verbatim into the 16-bit table
    Integer(u16),
    /// Name of a constant defined by the consumer of the emitted table, e.g. `Nature::HARDY`
    Symbol(SmolStr),
}

impl Value {
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Self::Symbol(SmolStr::new(name))
    }

    /// Integers are always valid, symbols have to be `::`-separated identifiers
    pub fn is_valid(&self) -> bool {
        match self {
            Value::Integer(_) => true,
            Value::Symbol(name) => is_symbol_literal(name),
        }
    }

    pub fn as_integer(&self) -> Option<u16> {
        match self {
            Value::Integer(value) => Some(*value),
            Value::Symbol(_) => None,
        }
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for Value {
    fn from(name: &str) -> Self {
        Self::symbol(name)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{value}"),
            Value::Symbol(name) => f.write_str(name),
        }
    }
}

fn is_symbol_literal(name: &str) -> bool {
    !name.is_empty() && name.split("::").all(is_identifier)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
