//! Links the balanced lists of all trie nodes into a single array

use super::builder::{Node, NodeId};
use super::node::{Compilation, Pending, RawEntry, RawPayload};
use crate::{
    error::CompileErrorKind,
    table::{Entry, Field, Payload},
    ABSENT_ADDRESS, TERMINAL_CHAR,
};
use log::debug;

pub(crate) struct Linker {
    nodes: Vec<Node>,
    compilation: Compilation,
}

impl Linker {
    pub fn new(nodes: Vec<Node>, limit: usize) -> Self {
        Self {
            nodes,
            compilation: Compilation::new(limit),
        }
    }

    /// Compiles every node reachable from the root, most recently scheduled node first.
    /// The root ends up at address `0` as it is compiled before anything else.
    pub fn link(mut self) -> Result<Vec<Entry>, CompileErrorKind> {
        self.compilation.pending.push(Pending {
            node: NodeId::ROOT,
            fixup: None,
        });

        while let Some(next) = self.compilation.pending.pop() {
            self.compilation.compile_node(&mut self.nodes, next)?;
        }

        debug!(
            "linked {} nodes into {} entries",
            self.nodes.len(),
            self.compilation.entries.len()
        );

        validate(self.compilation.entries)
    }
}

/// Checks that every link is resolved and stays within the array, stripping the placeholders
pub(crate) fn validate(entries: Vec<RawEntry>) -> Result<Vec<Entry>, CompileErrorKind> {
    let count = entries.len();
    let in_range = |address: u16| address == ABSENT_ADDRESS || (address as usize) < count;

    entries
        .into_iter()
        .enumerate()
        .map(|(address, entry)| {
            let inconsistent = |field| CompileErrorKind::Inconsistent { address, field };

            let left = entry
                .left
                .filter(|a| in_range(*a))
                .ok_or_else(|| inconsistent(Field::Left))?;

            let right = entry
                .right
                .filter(|a| in_range(*a))
                .ok_or_else(|| inconsistent(Field::Right))?;

            let payload = match entry.payload {
                RawPayload::Continuation(next)
                    if entry.char_code != TERMINAL_CHAR && in_range(next) =>
                {
                    Payload::Continuation(next)
                }
                RawPayload::Terminal(value) if entry.char_code == TERMINAL_CHAR => {
                    Payload::Terminal(value)
                }
                _ => return Err(inconsistent(Field::Payload)),
            };

            Ok(Entry {
                char_code: entry.char_code,
                left,
                right,
                payload,
            })
        })
        .collect()
}

#[cfg(test)]
mod does {
    use super::*;
    use crate::compile::builder::TrieBuilder;
    use crate::{Key, Value, ENTRY_LIMIT};

    fn link(keys: &[(&str, u16)]) -> Vec<Entry> {
        let mut builder = TrieBuilder::new();
        for (key, value) in keys {
            builder
                .insert(&Key::try_from(*key).unwrap(), Value::Integer(*value))
                .unwrap();
        }
        Linker::new(builder.into_nodes(), ENTRY_LIMIT)
            .link()
            .unwrap()
    }

    fn raw(char_code: u8, left: Option<u16>, right: Option<u16>, payload: RawPayload) -> RawEntry {
        RawEntry {
            char_code,
            left,
            right,
            payload,
        }
    }

    #[test]
    fn lay_out_player_ids() {
        use Payload::*;

        let entries = link(&[("p1", 1), ("p2", 2), ("p3", 3), ("p4", 4)]);
        let layout = entries
            .iter()
            .map(|e| (e.char_code, e.left, e.right, e.payload.clone()))
            .collect::<Vec<_>>();

        #[rustfmt::skip]
        assert_eq!(layout, [
            (b'p', 0, 0, Continuation(1)),
            (b'2', 2, 3, Continuation(8)),
            (b'1', 0, 0, Continuation(7)),
            (b'3', 0, 4, Continuation(6)),
            (b'4', 0, 0, Continuation(5)),
            (0,    0, 0, Terminal(Value::Integer(4))),
            (0,    0, 0, Terminal(Value::Integer(3))),
            (0,    0, 0, Terminal(Value::Integer(1))),
            (0,    0, 0, Terminal(Value::Integer(2))),
        ]);
    }

    #[test]
    fn compile_every_node_once() {
        let entries = link(&[("frz", 1), ("frozen", 1), ("fnt", 2), ("fainted", 2)]);
        assert_eq!(entries.len(), 19);
        assert_eq!(entries.iter().filter(|e| e.is_terminal()).count(), 4);
    }

    #[test]
    fn reject_unresolved_links() {
        let entries = vec![
            raw(b'a', Some(0), None, RawPayload::Continuation(1)),
            raw(0, Some(0), Some(0), RawPayload::Terminal(Value::Integer(1))),
        ];

        assert_eq!(
            validate(entries),
            Err(CompileErrorKind::Inconsistent {
                address: 0,
                field: Field::Right
            })
        );

        let entries = vec![raw(b'a', Some(0), Some(0), RawPayload::Unresolved)];
        assert_eq!(
            validate(entries),
            Err(CompileErrorKind::Inconsistent {
                address: 0,
                field: Field::Payload
            })
        );
    }

    #[test]
    fn reject_links_outside_the_array() {
        let entries = vec![
            raw(b'a', Some(0), Some(0), RawPayload::Continuation(1)),
            raw(0, Some(2), Some(0), RawPayload::Terminal(Value::Integer(1))),
        ];

        assert_eq!(
            validate(entries),
            Err(CompileErrorKind::Inconsistent {
                address: 1,
                field: Field::Left
            })
        );
    }

    #[test]
    fn reject_mismatched_terminals() {
        let entries = vec![raw(0, Some(0), Some(0), RawPayload::Continuation(0))];

        assert_eq!(
            validate(entries),
            Err(CompileErrorKind::Inconsistent {
                address: 0,
                field: Field::Payload
            })
        );
    }
}
