use pstries::{CompileErrorKind, Key, Payload, TrieCompiler, Value, ENTRY_LIMIT};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn player_ids() -> Vec<(&'static str, Value)> {
    vec![
        ("p1", Value::from(1)),
        ("p2", Value::from(2)),
        ("p3", Value::from(3)),
        ("p4", Value::from(4)),
    ]
}

#[test]
fn walk_player_ids() {
    init();

    let trie = TrieCompiler::new()
        .compile_table("PLAYER_IDS", player_ids())
        .unwrap();

    // one entry per edge: 'p', '1'..'4' and four terminals
    assert_eq!(trie.len(), 9);
    assert_eq!(trie.entries().iter().filter(|e| e.is_terminal()).count(), 4);

    assert_eq!(trie.lookup(b"p2"), Some(&Value::Integer(2)));
    assert_eq!(trie.lookup(b"p4"), Some(&Value::Integer(4)));
    assert_eq!(trie.lookup(b"p5"), None);
    assert_eq!(trie.lookup(b"p"), None);
    assert_eq!(trie.lookup(b"p23"), None);
    assert_eq!(trie.lookup(b""), None);
    assert_eq!(trie.walk(*b"p2"), Some((2, &Value::Integer(2))));
}

#[test]
fn keep_links_within_the_array() {
    let trie = TrieCompiler::new()
        .compile_table(
            "STAT_NAMES",
            [
                ("hp", Value::from(0)),
                ("attack", Value::from(1)),
                ("atk", Value::from(1)),
                ("defense", Value::from(2)),
                ("def", Value::from(2)),
                ("specialattack", Value::from(3)),
                ("spa", Value::from(3)),
                ("specialdefense", Value::from(4)),
                ("spd", Value::from(4)),
                ("speed", Value::from(5)),
                ("spe", Value::from(5)),
            ],
        )
        .unwrap();

    let count = trie.len();
    for entry in trie.entries() {
        assert!((entry.left as usize) < count);
        assert!((entry.right as usize) < count);

        match entry.payload {
            Payload::Continuation(address) => {
                assert!(!entry.is_terminal());
                assert!(address != 0 && (address as usize) < count);
            }
            Payload::Terminal(_) => assert!(entry.is_terminal()),
        }
    }

    assert_eq!(trie.lookup(b"spe"), Some(&Value::Integer(5)));
    assert_eq!(trie.lookup(b"speed"), Some(&Value::Integer(5)));
    assert_eq!(trie.lookup(b"spee"), None);
}

#[test]
fn allow_shared_values() {
    let trie = TrieCompiler::new()
        .compile_table(
            "NVSTATUS_NAMES",
            [
                ("frozen", Value::symbol("NVStatus::FREEZE")),
                ("frz", Value::symbol("NVStatus::FREEZE")),
            ],
        )
        .unwrap();

    assert_eq!(trie.lookup(b"frozen"), Some(&Value::symbol("NVStatus::FREEZE")));
    assert_eq!(trie.lookup(b"frz"), Some(&Value::symbol("NVStatus::FREEZE")));
}

#[test]
fn reject_repeated_keys() {
    let error = TrieCompiler::new()
        .compile_table(
            "NVSTATUS_NAMES",
            [
                ("frz", Value::symbol("NVStatus::FREEZE")),
                ("brn", Value::symbol("NVStatus::BURN")),
                ("frz", Value::symbol("NVStatus::BURN")),
            ],
        )
        .unwrap_err();

    assert_eq!(
        error.kind(),
        &CompileErrorKind::DuplicateKey(Key::from_bytes(*b"frz"))
    );
    assert_eq!(error.to_string(), "trie NVSTATUS_NAMES: repeated key 'frz'");
}

#[test]
fn reject_invalid_input() {
    let compiler = TrieCompiler::new();

    let error = compiler
        .compile_table("TYPES", [("bug", Value::symbol("Type BUG"))])
        .unwrap_err();
    assert!(matches!(error.kind, CompileErrorKind::InvalidValue { .. }));

    let error = compiler
        .compile_table("TYPES", [("\u{3b1}", Value::from(1))])
        .unwrap_err();
    assert_eq!(error.kind, CompileErrorKind::InvalidKey("\u{3b1}".into()));

    let error = compiler
        .compile("TYPES", [(Key::from_bytes(*b"b\0g"), Value::from(1))])
        .unwrap_err();
    assert!(matches!(error.kind, CompileErrorKind::InvalidKey(_)));

    let error = compiler.compile("TYPES", Vec::new()).unwrap_err();
    assert_eq!(error.kind, CompileErrorKind::EmptyTrie);
}

#[test]
fn match_the_empty_key() {
    let trie = TrieCompiler::new()
        .compile_table("EMPTY", [("", Value::from(9)), ("a", Value::from(1))])
        .unwrap();

    assert_eq!(trie.lookup(b""), Some(&Value::Integer(9)));
    assert_eq!(trie.lookup(b"a"), Some(&Value::Integer(1)));
    assert_eq!(trie.lookup(b"b"), None);
}

#[test]
fn overflow_configured_limit() {
    let mut compiler = TrieCompiler::new();

    compiler.entry_limit(8);
    let error = compiler
        .compile_table("PLAYER_IDS", player_ids())
        .unwrap_err();
    assert_eq!(error.kind, CompileErrorKind::Overflow { limit: 8 });

    compiler.entry_limit(9);
    assert_eq!(
        compiler
            .compile_table("PLAYER_IDS", player_ids())
            .unwrap()
            .len(),
        9
    );
}

/// Keys of two characters, `first` distinct leading characters each followed by 128 distinct ones
fn two_level_keys(first: u8) -> Vec<(Key, Value)> {
    (1..=first)
        .flat_map(|a| (1..=128u8).map(move |b| (Key::from_bytes(vec![a, b]), Value::from(b as u16))))
        .collect()
}

#[test]
fn overflow_addressable_space() {
    init();

    // 63 + 63 * 128 * 2 entries
    let trie = TrieCompiler::new()
        .compile("WIDE", two_level_keys(63))
        .unwrap();
    assert_eq!(trie.len(), 16_191);
    assert!(trie.len() <= ENTRY_LIMIT);

    // 64 + 64 * 128 * 2 entries
    let error = TrieCompiler::new()
        .compile("WIDER", two_level_keys(64))
        .unwrap_err();
    assert_eq!(error.kind, CompileErrorKind::Overflow { limit: ENTRY_LIMIT });
    assert_eq!(error.trie, "WIDER");
}

#[test]
fn compile_deterministically() {
    let mut reversed = player_ids();
    reversed.reverse();

    let compiler = TrieCompiler::new();
    let first = compiler.compile_table("PLAYER_IDS", player_ids()).unwrap();
    let second = compiler.compile_table("PLAYER_IDS", player_ids()).unwrap();
    let third = compiler.compile_table("PLAYER_IDS", reversed).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.entries(), third.entries());
}

#[test]
fn serialize_numeric_tables() {
    let trie = TrieCompiler::new()
        .compile_table("PLAYER_IDS", player_ids())
        .unwrap();
    let words = trie.to_u16_words().unwrap();

    assert_eq!(words.len(), 4 * trie.len());
    // entry 1 starts at word 4
    assert_eq!(words[4..8], [b'2' as u16, 2, 3, 8]);
    assert_eq!(words[32..36], [0, 0, 0, 2]);
}

#[test]
fn skip_verification_on_request() {
    let mut compiler = TrieCompiler::new();
    compiler.verify(false);

    let trie = compiler.compile_table("PLAYER_IDS", player_ids()).unwrap();
    assert_eq!(trie.stats().keys(), 4);
    assert_eq!(trie.stats().deepest_probe(), 0);
    assert_eq!(trie.lookup(b"p3"), Some(&Value::Integer(3)));
}
