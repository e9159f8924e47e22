//! Character trie assembled from key-value pairs before it is compiled

use crate::{error::CompileErrorKind, Key, Value, AVG_EDGE_COUNT, TERMINAL_CHAR};
use core::fmt::{self, Display};
use smallvec::SmallVec;

/// Index of a node in the builder's arena
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub(crate) enum Target {
    /// Continue matching the next character in another node
    Node(NodeId),
    /// End of a key
    Terminal(Value),
}

#[derive(Debug)]
pub(crate) struct Edge {
    pub char_code: u8,
    pub target: Target,
}

#[derive(Debug, Default)]
pub(crate) struct Node {
    pub edges: SmallVec<[Edge; AVG_EDGE_COUNT]>,
    pub compiled: bool,
}

impl Node {
    fn edge(&self, char_code: u8) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.char_code == char_code)
    }

    fn has_terminal(&self) -> bool {
        self.edge(TERMINAL_CHAR).is_some()
    }
}

/// Arena of trie nodes, the root always lives at [`NodeId::ROOT`]
#[derive(Debug)]
pub(crate) struct TrieBuilder {
    nodes: Vec<Node>,
}

impl TrieBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Follows (and creates where missing) the edges spelling `key` and installs a terminal edge at the end
    pub fn insert(&mut self, key: &Key, value: Value) -> Result<(), CompileErrorKind> {
        if key.contains_terminal() {
            return Err(CompileErrorKind::InvalidKey(key.to_string()));
        }

        let mut current = NodeId::ROOT;
        for char_code in key.as_bytes() {
            current = self.child_or_insert(current, *char_code);
        }

        let node = &mut self.nodes[current.0];
        if node.has_terminal() {
            return Err(CompileErrorKind::DuplicateKey(key.clone()));
        }

        node.edges.push(Edge {
            char_code: TERMINAL_CHAR,
            target: Target::Terminal(value),
        });

        Ok(())
    }

    fn child_or_insert(&mut self, parent: NodeId, char_code: u8) -> NodeId {
        let existing = self.nodes[parent.0]
            .edge(char_code)
            .and_then(|edge| match edge.target {
                Target::Node(child) => Some(child),
                Target::Terminal(_) => None,
            });

        if let Some(child) = existing {
            return child;
        }

        let child = NodeId(self.nodes.len());
        self.nodes.push(Node::default());
        self.nodes[parent.0].edges.push(Edge {
            char_code,
            target: Target::Node(child),
        });

        child
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of edges, each of which compiles into exactly one entry
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.edges.len()).sum()
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}
