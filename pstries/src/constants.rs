/// Character code of the pseudo-edge which terminates a key
pub const TERMINAL_CHAR: u8 = 0;

/// Address of the first entry of the root node, doubles as the "absent branch" marker
pub const ROOT_ADDRESS: u16 = 0;
pub const ABSENT_ADDRESS: u16 = 0;

/// Number of words each entry occupies in the serialized array
pub const ENTRY_WORDS: usize = 4;
/// Size of the 16-bit word space available to the serialized array
pub const WORD_SPACE: usize = 0xFFFF;
/// Maximum number of entries a single trie may compile to.
/// One entry worth of words is held back for metadata.
pub const ENTRY_LIMIT: usize = (WORD_SPACE - ENTRY_WORDS) / ENTRY_WORDS;

/// Number of edges a trie node stores inline before spilling to the heap
pub const AVG_EDGE_COUNT: usize = 4;
