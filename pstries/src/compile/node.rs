//! Flattens the edges of a single trie node into a balanced binary search list

use super::builder::{Edge, Node, NodeId, Target};
use crate::{error::CompileErrorKind, table::Field, Value, ABSENT_ADDRESS};
use log::trace;

/// Slot of an already appended entry which receives the address of an entry appended later on
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Fixup {
    pub address: usize,
    pub field: Field,
}

/// Node waiting for compilation, along with the slot its start address has to be written to
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Pending {
    pub node: NodeId,
    pub fixup: Option<Fixup>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) enum RawPayload {
    /// Continuation whose node has not been compiled yet
    Unresolved,
    Continuation(u16),
    Terminal(Value),
}

/// Entry whose links may still be placeholders (`None`)
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct RawEntry {
    pub char_code: u8,
    pub left: Option<u16>,
    pub right: Option<u16>,
    pub payload: RawPayload,
}

impl RawEntry {
    fn patch(&mut self, field: Field, address: u16) {
        match field {
            Field::Left => self.left = Some(address),
            Field::Right => self.right = Some(address),
            Field::Payload => self.payload = RawPayload::Continuation(address),
        }
    }
}

/// Output array and work list shared by all nodes of one trie
#[derive(Debug)]
pub(crate) struct Compilation {
    pub entries: Vec<RawEntry>,
    pub pending: Vec<Pending>,
    limit: usize,
}

impl Compilation {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            pending: Vec::new(),
            limit,
        }
    }

    /// Appends the balanced list for the given node, scheduling its child nodes instead of descending into them
    pub fn compile_node(
        &mut self,
        nodes: &mut [Node],
        pending: Pending,
    ) -> Result<(), CompileErrorKind> {
        let index = pending.node.index();
        let node = &mut nodes[index];

        if node.compiled {
            return Err(CompileErrorKind::ReentrantCompilation(pending.node));
        }

        node.compiled = true;
        node.edges.sort_unstable_by_key(|edge| edge.char_code);

        let nodes: &[Node] = nodes;
        let edges = &nodes[index].edges[..];

        trace!(
            "compiling node {} with {} edges at address {}",
            pending.node,
            edges.len(),
            self.entries.len()
        );

        if edges.is_empty() {
            return Ok(());
        }

        self.compile_range(nodes, edges, 0, edges.len() - 1, pending.fixup)
    }

    fn compile_range(
        &mut self,
        nodes: &[Node],
        edges: &[Edge],
        first: usize,
        last: usize,
        fixup: Option<Fixup>,
    ) -> Result<(), CompileErrorKind> {
        let current = select_pivot(nodes, edges, first, last);

        let address = self.entries.len();
        if address >= self.limit {
            return Err(CompileErrorKind::Overflow { limit: self.limit });
        }
        let link = u16::try_from(address)
            .map_err(|_| CompileErrorKind::Overflow { limit: self.limit })?;

        if let Some(fixup) = fixup {
            self.entries[fixup.address].patch(fixup.field, link);
        }

        let edge = &edges[current];
        let payload = match &edge.target {
            Target::Node(child) => {
                self.pending.push(Pending {
                    node: *child,
                    fixup: Some(Fixup {
                        address,
                        field: Field::Payload,
                    }),
                });

                RawPayload::Unresolved
            }
            Target::Terminal(value) => RawPayload::Terminal(value.clone()),
        };

        self.entries.push(RawEntry {
            char_code: edge.char_code,
            left: None,
            right: None,
            payload,
        });

        if current == first {
            self.entries[address].left = Some(ABSENT_ADDRESS);
        } else {
            let fixup = Fixup {
                address,
                field: Field::Left,
            };
            self.compile_range(nodes, edges, first, current - 1, Some(fixup))?;
        }

        if current == last {
            self.entries[address].right = Some(ABSENT_ADDRESS);
        } else {
            let fixup = Fixup {
                address,
                field: Field::Right,
            };
            self.compile_range(nodes, edges, current + 1, last, Some(fixup))?;
        }

        Ok(())
    }
}

/// Picks the edge anchoring the search over `edges[first..=last]`.
///
/// Odd counts use the middle edge. For even counts, the one of the two central edges which continues into
/// the node with more edges is promoted, a continuation wins over a terminal and ties go to the lower one.
fn select_pivot(nodes: &[Node], edges: &[Edge], first: usize, last: usize) -> usize {
    let distance = last - first;

    if distance % 2 == 0 {
        return first + distance / 2;
    }

    let lower = first + distance / 2;
    let upper = lower + 1;

    match (
        continuation_size(nodes, &edges[lower]),
        continuation_size(nodes, &edges[upper]),
    ) {
        (Some(lower_size), Some(upper_size)) if upper_size > lower_size => upper,
        (None, Some(_)) => upper,
        _ => lower,
    }
}

fn continuation_size(nodes: &[Node], edge: &Edge) -> Option<usize> {
    match edge.target {
        Target::Node(child) => Some(nodes[child.index()].edges.len()),
        Target::Terminal(_) => None,
    }
}
