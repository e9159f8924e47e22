//! Compiler for the character tries used by the battle protocol parser
//!
//! Keyword tables (`key -> value`) are inserted into a character trie, every node of which is
//! flattened into a balanced binary search list. All lists are linked into one flat array of
//! four-word entries which the parser walks at runtime (see [`CompiledTrie::walk`]).

mod constants;
pub use constants::*;

pub mod compile;
pub mod emit;
pub mod error;
pub mod table;
pub mod value;

#[cfg(feature = "import")]
pub mod import;

pub use compile::TrieCompiler;
pub use error::{CompileError, CompileErrorKind};
pub use table::{CompiledTrie, Entry, Payload, TrieStatistics, Word};
pub use value::{Key, Value};
