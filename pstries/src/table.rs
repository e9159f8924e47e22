//! Compiled trie layout and the reference walker for it
//!
//! The array consists of entries of four words each: `[char_code, left, right, payload]`. Walking starts at
//! address `0` with the first input character. If the character equals `char_code`, the walk either ends
//! (terminal entry, `payload` is the value) or continues with the next character at address `payload`.
//! Smaller characters continue at `left`, greater ones at `right`, where address `0` means "no match".
//! Running out of input is treated like reading the terminal character.

use crate::{Value, ABSENT_ADDRESS, ENTRY_WORDS, ROOT_ADDRESS, TERMINAL_CHAR};
use core::cmp::Ordering;
use core::fmt::{self, Display};

/// Link fields of an entry
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Left,
    Right,
    Payload,
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Left => "left",
            Field::Right => "right",
            Field::Payload => "payload",
        })
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Payload {
    /// Address of the entry matching the next character
    Continuation(u16),
    /// Value of the key which ends at this entry
    Terminal(Value),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Entry {
    pub char_code: u8,
    pub left: u16,
    pub right: u16,
    pub payload: Payload,
}

impl Entry {
    pub fn is_terminal(&self) -> bool {
        self.char_code == TERMINAL_CHAR
    }
}

/// Single word of the serialized array
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Word<'t> {
    Number(u16),
    Symbol(&'t str),
}

impl Display for Word<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Word::Number(number) => write!(f, "{number}"),
            Word::Symbol(name) => f.write_str(name),
        }
    }
}

/// Figures collected while verifying a compiled trie
#[derive(Clone, PartialEq, Debug, Default)]
pub struct TrieStatistics {
    pub(crate) keys: usize,
    pub(crate) nodes: usize,
    pub(crate) entries: usize,
    pub(crate) deepest_probe: usize,
    pub(crate) total_probes: usize,
}

impl TrieStatistics {
    /// Number of keys stored in the trie
    pub fn keys(&self) -> usize {
        self.keys
    }

    /// Number of trie nodes the entries were compiled from
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Largest number of entries visited while walking any single key
    pub fn deepest_probe(&self) -> usize {
        self.deepest_probe
    }

    /// Average number of entries visited per key
    pub fn mean_probe(&self) -> f64 {
        if self.keys == 0 {
            0.0
        } else {
            self.total_probes as f64 / self.keys as f64
        }
    }
}

impl Display for TrieStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            r#"TrieStatistics {{
    keys: {}
    nodes: {}
    entries: {} ({} words)
    probes: {:.2} avg, {} max
}}"#,
            self.keys,
            self.nodes,
            self.entries,
            self.entries * ENTRY_WORDS,
            self.mean_probe(),
            self.deepest_probe,
        ))
    }
}

/// Result of walking an input through a compiled trie
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Probe<'t> {
    /// Number of input characters consumed before reaching the terminal entry
    pub consumed: usize,
    /// Number of entries visited
    pub visited: usize,
    pub value: &'t Value,
}

/// Flat, address-linked array produced by the [`TrieCompiler`](crate::TrieCompiler)
#[derive(Clone, PartialEq, Debug)]
pub struct CompiledTrie {
    name: String,
    entries: Vec<Entry>,
    stats: TrieStatistics,
}

impl CompiledTrie {
    pub(crate) fn new(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        let stats = TrieStatistics {
            entries: entries.len(),
            ..TrieStatistics::default()
        };

        Self {
            name: name.into(),
            entries,
            stats,
        }
    }

    pub(crate) fn set_stats(&mut self, stats: TrieStatistics) {
        self.stats = stats;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &TrieStatistics {
        &self.stats
    }

    /// Walks the input from the root until a terminal entry is reached.
    /// Returns `None` if a branch runs out before that happens.
    pub fn probe(&self, input: impl IntoIterator<Item = u8>) -> Option<Probe<'_>> {
        let mut input = input.into_iter();
        let mut current = input.next().unwrap_or(TERMINAL_CHAR);
        let mut address = ROOT_ADDRESS;
        let mut consumed = 0;
        let mut visited = 0;

        loop {
            let entry = self.entries.get(address as usize)?;
            visited += 1;

            address = match current.cmp(&entry.char_code) {
                Ordering::Equal => match &entry.payload {
                    Payload::Terminal(value) => {
                        return Some(Probe {
                            consumed,
                            visited,
                            value,
                        })
                    }
                    Payload::Continuation(next) => {
                        consumed += 1;
                        current = input.next().unwrap_or(TERMINAL_CHAR);
                        *next
                    }
                },
                Ordering::Less => present(entry.left)?,
                Ordering::Greater => present(entry.right)?,
            };
        }
    }

    /// Walks the input, returning the number of consumed characters and the value of the matched key
    pub fn walk(&self, input: impl IntoIterator<Item = u8>) -> Option<(usize, &Value)> {
        self.probe(input).map(|probe| (probe.consumed, probe.value))
    }

    /// Looks up the value stored for exactly `key`
    pub fn lookup(&self, key: &[u8]) -> Option<&Value> {
        self.walk(key.iter().cloned())
            .filter(|(consumed, _)| *consumed == key.len())
            .map(|(_, value)| value)
    }

    /// Matches the field at the start of `input` which ends at `delimiter` (or the end of input).
    /// Returns the length of the field and its value.
    pub fn match_field(&self, input: &[u8], delimiter: u8) -> Option<(usize, &Value)> {
        let field = input
            .iter()
            .position(|c| *c == delimiter)
            .map_or(input, |end| &input[..end]);

        self.lookup(field).map(|value| (field.len(), value))
    }

    /// Flattens the entries into words, entry `i` starting at word `ENTRY_WORDS * i`
    pub fn words(&self) -> impl Iterator<Item = Word<'_>> + '_ {
        self.entries.iter().flat_map(|entry| {
            let payload = match &entry.payload {
                Payload::Continuation(address) => Word::Number(*address),
                Payload::Terminal(Value::Integer(value)) => Word::Number(*value),
                Payload::Terminal(Value::Symbol(name)) => Word::Symbol(name.as_str()),
            };

            [
                Word::Number(entry.char_code as u16),
                Word::Number(entry.left),
                Word::Number(entry.right),
                payload,
            ]
        })
    }

    /// Numeric form of the array, available when no terminal refers to a symbol
    pub fn to_u16_words(&self) -> Option<Vec<u16>> {
        self.words()
            .map(|word| match word {
                Word::Number(number) => Some(number),
                Word::Symbol(_) => None,
            })
            .collect()
    }
}

fn present(address: u16) -> Option<u16> {
    if address == ABSENT_ADDRESS {
        None
    } else {
        Some(address)
    }
}
