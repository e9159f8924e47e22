//! Tools to compile keyword tables into linked trie arrays

use crate::{
    error::{CompileError, CompileErrorKind},
    table::{CompiledTrie, TrieStatistics},
    Key, Value, ENTRY_LIMIT,
};
use fnv::FnvHashSet;
use log::debug;

mod builder;
pub use builder::NodeId;
use builder::TrieBuilder;

mod linker;
use linker::Linker;

mod node;

#[derive(Clone, Debug)]
pub struct TrieCompiler {
    entry_limit: usize,
    verify: bool,
}

impl TrieCompiler {
    pub fn new() -> Self {
        Self {
            entry_limit: ENTRY_LIMIT,
            verify: true,
        }
    }

    /// Lowers the number of entries a trie may compile to, values above [`ENTRY_LIMIT`] are clamped
    pub fn entry_limit(&mut self, limit: usize) -> &mut Self {
        self.entry_limit = limit.min(ENTRY_LIMIT);
        self
    }

    /// Sets whether every key is looked up in the compiled array before it is returned
    pub fn verify(&mut self, enabled: bool) -> &mut Self {
        self.verify = enabled;
        self
    }

    pub fn limit(&self) -> usize {
        self.entry_limit
    }

    /// Compiles a table whose keys are given as strings of single-byte characters
    pub fn compile_table<'k>(
        &self,
        name: &str,
        pairs: impl IntoIterator<Item = (&'k str, Value)>,
    ) -> Result<CompiledTrie, CompileError> {
        let pairs = pairs
            .into_iter()
            .map(|(key, value)| Ok((Key::try_from(key)?, value)))
            .collect::<Result<Vec<_>, String>>()
            .map_err(|key| CompileError::new(name, CompileErrorKind::InvalidKey(key)))?;

        self.compile(name, pairs)
    }

    /// Builds a trie from the given pairs and links it into a single array.
    /// Nothing is returned unless every step succeeds.
    pub fn compile(
        &self,
        name: &str,
        pairs: impl IntoIterator<Item = (Key, Value)>,
    ) -> Result<CompiledTrie, CompileError> {
        self.compile_pairs(name, pairs)
            .map_err(|kind| CompileError::new(name, kind))
    }

    fn compile_pairs(
        &self,
        name: &str,
        pairs: impl IntoIterator<Item = (Key, Value)>,
    ) -> Result<CompiledTrie, CompileErrorKind> {
        // 1. Validate the input
        let pairs = check_pairs(pairs)?;

        // 2. Build the trie
        let mut builder = TrieBuilder::new();
        for (key, value) in pairs.iter() {
            builder.insert(key, value.clone())?;
        }
        let node_count = builder.node_count();
        debug!(
            "built trie {name}: {node_count} nodes, {} edges",
            builder.edge_count()
        );

        // 3. Flatten and link all nodes
        let entries = Linker::new(builder.into_nodes(), self.entry_limit).link()?;
        let mut trie = CompiledTrie::new(name, entries);

        // 4. Verify that every key walks to its value
        let stats = if self.verify {
            verify(&trie, &pairs, node_count)?
        } else {
            TrieStatistics {
                keys: pairs.len(),
                nodes: node_count,
                entries: trie.len(),
                ..TrieStatistics::default()
            }
        };

        debug!(
            "compiled trie {name}: {} keys, {} nodes, {} entries",
            stats.keys(),
            stats.nodes(),
            stats.entries()
        );

        trie.set_stats(stats);
        Ok(trie)
    }
}

impl Default for TrieCompiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejects repeated keys, keys containing the terminal and malformed values. Returns the pairs sorted by key.
fn check_pairs(
    pairs: impl IntoIterator<Item = (Key, Value)>,
) -> Result<Vec<(Key, Value)>, CompileErrorKind> {
    let mut seen = FnvHashSet::default();
    let mut checked = Vec::new();

    for (key, value) in pairs {
        if key.contains_terminal() {
            return Err(CompileErrorKind::InvalidKey(key.to_string()));
        }

        if !seen.insert(key.clone()) {
            return Err(CompileErrorKind::DuplicateKey(key));
        }

        if !value.is_valid() {
            return Err(CompileErrorKind::InvalidValue { key, value });
        }

        checked.push((key, value));
    }

    if checked.is_empty() {
        return Err(CompileErrorKind::EmptyTrie);
    }

    checked.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(checked)
}

fn verify(
    trie: &CompiledTrie,
    pairs: &[(Key, Value)],
    nodes: usize,
) -> Result<TrieStatistics, CompileErrorKind> {
    let mut stats = TrieStatistics {
        keys: pairs.len(),
        nodes,
        entries: trie.len(),
        ..TrieStatistics::default()
    };

    for (key, value) in pairs {
        let probe = trie
            .probe(key.as_bytes().iter().cloned())
            .filter(|probe| probe.consumed == key.len() && probe.value == value)
            .ok_or_else(|| CompileErrorKind::VerificationFailed(key.clone()))?;

        stats.deepest_probe = stats.deepest_probe.max(probe.visited);
        stats.total_probes += probe.visited;
    }

    Ok(stats)
}
