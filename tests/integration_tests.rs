use crunchx::error::GrammarError;
use crunchx::{driver, rules};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn generate(src: &str) -> Vec<String> {
    let mut out = Vec::new();
    driver::run(src.as_bytes(), &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn s1_single_terminal() {
    assert_eq!(generate("PRODUCER:'x'"), vec!["x"]);
}

#[test]
fn s2_concatenation_with_alternation() {
    let src = "A:'0','1'\nB:'a','b'\nPRODUCER: A B";
    assert_eq!(generate(src), vec!["0a", "1a", "0b", "1b"]);
}

#[test]
fn s3_nested_producers() {
    let src = "D:'0','1'\nL:'a','b'\nC: L , D\nPRODUCER: C C";
    let expected = vec![
        "aa", "ba", "0a", "1a", "ab", "bb", "0b", "1b", "a0", "b0", "00", "10", "a1", "b1", "01",
        "11",
    ];
    assert_eq!(generate(src), expected);
}

#[test]
fn s4_empty_terminal() {
    assert_eq!(generate("E:''\nPRODUCER: E 'x'"), vec!["x"]);
}

#[test]
fn s5_missing_reference() {
    let mut out = Vec::new();
    let err = driver::run(b"PRODUCER: Q", &mut out).unwrap_err();
    match err {
        GrammarError::NoSuchProducer(name) => assert_eq!(name, "Q"),
        other => panic!("expected NoSuchProducer, got {:?}", other),
    }
}

#[test]
fn s6_non_productive_cycle() {
    let mut out = Vec::new();
    let err = driver::run(b"A: B\nB: A\nPRODUCER: A", &mut out).unwrap_err();
    assert!(matches!(err, GrammarError::NonProductive(_)));
}

#[test]
fn s7_comment_and_blank_lines() {
    let src = "# leading comment\nNUM:'0','1'\n\nPRODUCER: NUM";
    assert_eq!(generate(src), vec!["0", "1"]);
}

#[test]
fn s8_oversized_rules_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("huge.rul");
    std::fs::write(&path, vec![b'a'; 2 * 1024 * 1024 + 1]).unwrap();

    let err = rules::load_rules(&path).unwrap_err();
    assert!(matches!(err, GrammarError::FileTooLarge(_)));
}

#[test]
fn s9_missing_entry_producer_is_distinguished_from_non_productive() {
    let mut out = Vec::new();
    let err = driver::run(b"A:'x'", &mut out).unwrap_err();
    assert!(matches!(err, GrammarError::Misc(_)));
}

#[test]
fn s10_default_rules_round_trip_and_enumerate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("crunchx.rul");

    assert!(!path.exists());
    rules::write_default_rules(&path).unwrap();
    let loaded = rules::load_rules(&path).unwrap();

    let mut out = Vec::new();
    driver::run(&loaded, &mut out).unwrap();
    let first_line = out.split(|&b| b == b'\n').next().unwrap();
    assert_eq!(first_line, b"aaaaaaaa");
}

#[test]
fn reset_idempotence_matches_fresh_cursor() {
    use crunchx::analyser::analyse;
    use crunchx::cursor::Cursor;
    use crunchx::parser::parse;

    let src = b"A:'0','1'\nPRODUCER: A 'x'";
    let grammar = analyse(parse(src).unwrap()).unwrap();

    let fresh = Cursor::new(&grammar).unwrap();
    let mut built = Cursor::new(&grammar).unwrap();
    built.reset();

    assert_eq!(fresh.current_bytes(), built.current_bytes());
}

#[test]
fn redefinition_appends_in_source_order() {
    use crunchx::parser::parse;

    let g = parse(b"A:'0'\nA:'1'\nPRODUCER: A").unwrap();
    let producer = g.producer(g.get("A").unwrap());
    assert_eq!(producer.rules.len(), 2);
}

#[test]
fn forward_references_do_not_affect_resolution_order() {
    use crunchx::analyser::analyse;
    use crunchx::parser::parse;

    let forward = analyse(parse(b"PRODUCER: A\nA:'x'").unwrap()).unwrap();
    let backward = analyse(parse(b"A:'x'\nPRODUCER: A").unwrap()).unwrap();

    assert_eq!(
        generate("PRODUCER: A\nA:'x'"),
        generate("A:'x'\nPRODUCER: A")
    );
    // Both analyse successfully regardless of order; the assertion above
    // is the behavioral check, this just keeps the grammars in scope.
    let _ = (forward, backward);
}

#[test]
fn enumeration_completeness_counts_every_derivation() {
    let src = "A:'a','b','c'\nB:'0','1'\nPRODUCER: A B";
    let all = generate(src);
    assert_eq!(all.len(), 6);
}
