//! Keyword table definitions
//!
//! Tables are described by a JSON document whose members are the tables and whose nested members
//! are the entries of the respective table. Member order is retained and so are repeated keys, which
//! are then rejected by the compiler.
//!
//! ```json
//! {
//!     "PLAYER_IDS": { "p1": 1, "p2": 2 },
//!     "TYPE_NAMES": { "bug": "Type::BUG", "dark": "Type::DARK" }
//! }
//! ```

use crate::{error::CompileError, CompiledTrie, TrieCompiler, Value};
use core::fmt::{self, Display};

mod json;

/// Value of a table entry as written in the definition
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Literal {
    /// Quoted string, names a symbol
    Text(String),
    /// Anything starting like a number
    Number(String),
    /// Unquoted word such as `true` or `null`
    Bare(String),
}

impl Literal {
    /// Converts the literal into a value if it is a 16-bit integer or a well-formed symbol
    pub fn to_value(&self) -> Option<Value> {
        let value = match self {
            Literal::Text(text) => Value::symbol(text),
            Literal::Number(number) => Value::Integer(number.parse().ok()?),
            Literal::Bare(_) => return None,
        };

        Some(value).filter(Value::is_valid)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Text(text) => write!(f, "{text:?}"),
            Literal::Number(raw) | Literal::Bare(raw) => f.write_str(raw),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TableDefinition {
    pub name: String,
    pub entries: Vec<(String, Literal)>,
}

impl TableDefinition {
    pub fn compile(&self, compiler: &TrieCompiler) -> Result<CompiledTrie, DefinitionError> {
        let pairs = self
            .entries
            .iter()
            .map(|(key, literal)| match literal.to_value() {
                Some(value) => Ok((key.as_str(), value)),
                None => Err(DefinitionError::InvalidValue {
                    table: self.name.clone(),
                    key: key.clone(),
                    literal: literal.clone(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(compiler.compile_table(&self.name, pairs)?)
    }
}

#[derive(Debug)]
pub enum DefinitionError {
    /// Document is not well-formed, contains the position of the error
    Syntax(String),
    InvalidValue {
        table: String,
        key: String,
        literal: Literal,
    },
    Compile(CompileError),
}

impl From<CompileError> for DefinitionError {
    fn from(error: CompileError) -> Self {
        Self::Compile(error)
    }
}

impl Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionError::Syntax(message) => write!(f, "malformed table definitions: {message}"),
            DefinitionError::InvalidValue {
                table,
                key,
                literal,
            } => write!(
                f,
                "trie {table}: invalid value {literal} for key {key:?}, expected an integer or a symbol"
            ),
            DefinitionError::Compile(error) => Display::fmt(error, f),
        }
    }
}

impl std::error::Error for DefinitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DefinitionError::Compile(error) => Some(error),
            _ => None,
        }
    }
}

/// Parses all table definitions contained in the document
pub fn parse_definitions(input: &str) -> Result<Vec<TableDefinition>, DefinitionError> {
    json::definitions(input)
}

/// Parses the document and compiles every table in order, stopping at the first failure
pub fn compile_definitions(
    input: &str,
    compiler: &TrieCompiler,
) -> Result<Vec<CompiledTrie>, DefinitionError> {
    parse_definitions(input)?
        .iter()
        .map(|table| table.compile(compiler))
        .collect()
}
