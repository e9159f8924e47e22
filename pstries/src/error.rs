//! Failures which abort the compilation of a trie

use crate::compile::NodeId;
use crate::table::Field;
use crate::value::{Key, Value};
use core::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq)]
pub enum CompileErrorKind {
    /// The same key was inserted more than once
    DuplicateKey(Key),
    /// Key contains the reserved terminal character or is not representable in single bytes
    InvalidKey(String),
    /// Value is neither a 16-bit integer nor a symbol literal
    InvalidValue { key: Key, value: Value },
    /// There is nothing to compile, a trie without a root entry can not be walked
    EmptyTrie,
    /// Appending another entry would leave the addressable space
    Overflow { limit: usize },
    /// A node was scheduled for compilation a second time
    ReentrantCompilation(NodeId),
    /// A link in the compiled array is unresolved or points outside of it
    Inconsistent { address: usize, field: Field },
    /// Walking the compiled array did not yield the value inserted for a key
    VerificationFailed(Key),
}

impl Display for CompileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CompileErrorKind::*;

        match self {
            DuplicateKey(key) => write!(f, "repeated key '{key}'"),
            InvalidKey(key) => write!(f, "invalid key '{}'", key.escape_debug()),
            InvalidValue { key, value } => write!(f, "invalid value '{value}' for key '{key}'"),
            EmptyTrie => f.write_str("no keys to compile"),
            Overflow { limit } => write!(f, "compilation too large (limit is {limit} entries)"),
            ReentrantCompilation(node) => write!(f, "repeated attempt to compile node {node}"),
            Inconsistent { address, field } => {
                write!(f, "entry {address} has an invalid {field} link")
            }
            VerificationFailed(key) => write!(f, "key '{key}' does not walk to its value"),
        }
    }
}

/// Error raised while compiling the trie called `trie`
#[derive(Debug, PartialEq, Eq)]
pub struct CompileError {
    pub trie: String,
    pub kind: CompileErrorKind,
}

impl CompileError {
    pub fn new(trie: impl Into<String>, kind: CompileErrorKind) -> Self {
        Self {
            trie: trie.into(),
            kind,
        }
    }

    pub fn kind(&self) -> &CompileErrorKind {
        &self.kind
    }
}

impl Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trie {}: {}", self.trie, self.kind)
    }
}

impl std::error::Error for CompileError {}
