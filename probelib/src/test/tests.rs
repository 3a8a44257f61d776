use std::fs;

use crate::config::{HashKindConfig, SimConfig};
use crate::error::SimError;
use crate::hashers::KeyHasher;
use crate::io::{gather_keys, parse_inline, read_key_file};
use crate::simulator::{Access, ResultRecord, Simulator};
use crate::table::{AccessOutcome, Slot, Table, TableState, TableTrait};

/// Maps every key to the same bucket, for pinning down probe behaviour
struct Constant(u64);

impl KeyHasher for Constant {
    fn hash(&self, _key: &str) -> u64 {
        self.0
    }
}

/// Maps a key to its first byte, giving distinct single-letter keys distinct buckets
struct FirstByte;

impl KeyHasher for FirstByte {
    fn hash(&self, key: &str) -> u64 {
        key.bytes().next().unwrap_or(0) as u64
    }
}

fn keys(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|k| k.to_string()).collect()
}

#[test]
fn single_key_is_one_miss() -> Result<(), SimError> {
    let mut simulator = Simulator::with_table(Table::new(4, Constant(0)));
    let result = simulator.simulate(&keys(&["a"]))?;
    assert_eq!(
        result,
        ResultRecord {
            hits: 0,
            misses: 1,
            collisions: 0,
            load_factor: 0.25
        }
    );
    Ok(())
}

#[test]
fn repeated_key_hits_without_collisions() -> Result<(), SimError> {
    let mut simulator = Simulator::with_table(Table::new(4, Constant(0)));
    let result = simulator.simulate(&keys(&["a", "a"]))?;
    assert_eq!(
        result,
        ResultRecord {
            hits: 1,
            misses: 1,
            collisions: 0,
            load_factor: 0.25
        }
    );
    Ok(())
}

#[test]
fn process_reports_miss_then_hit() -> Result<(), SimError> {
    let mut simulator = Simulator::with_table(Table::new(4, Constant(0)));
    assert_eq!(simulator.process("a")?, Access::Miss);
    assert_eq!(simulator.process("a")?, Access::Hit);
    Ok(())
}

#[test]
fn clustered_keys_overflow_with_partial_counters() {
    // All five keys share one home bucket in a 4 slot table: the fifth cannot be
    // placed. The first four accrue 0 + 1 + 2 + 3 probe-step collisions
    let mut simulator = Simulator::with_table(Table::new(4, Constant(0)));
    let err = simulator
        .simulate(&keys(&["a", "b", "c", "d", "e"]))
        .unwrap_err();
    match err {
        SimError::TableFull {
            key,
            capacity,
            partial,
        } => {
            assert_eq!(key, "e");
            assert_eq!(capacity, 4);
            assert_eq!(
                partial,
                ResultRecord {
                    hits: 0,
                    misses: 4,
                    collisions: 6,
                    load_factor: 1.0
                }
            );
        }
        other => panic!("expected TableFull, got {other:?}"),
    }
    assert_eq!(simulator.state(), TableState::Full);
}

#[test]
fn overflowing_key_changes_no_counter() {
    let mut simulator = Simulator::with_table(Table::new(2, Constant(0)));
    let err = simulator.simulate(&keys(&["a", "b", "c"])).unwrap_err();
    assert!(!err.is_configuration());
    // The failed scan over "c" must leave the counters exactly as reported, so a
    // fresh report matches the partial record carried in the error
    match err {
        SimError::TableFull { partial, .. } => assert_eq!(partial, simulator.report()),
        other => panic!("expected TableFull, got {other:?}"),
    }
}

#[test]
fn hit_still_succeeds_in_full_table() -> Result<(), SimError> {
    let mut simulator = Simulator::with_table(Table::new(2, Constant(0)));
    let result = simulator.simulate(&keys(&["a", "b", "a"]))?;
    assert_eq!(
        result,
        ResultRecord {
            hits: 1,
            misses: 2,
            collisions: 1,
            load_factor: 1.0
        }
    );
    assert_eq!(simulator.state(), TableState::Full);
    assert_eq!(simulator.empty_slot_count(), 0);
    Ok(())
}

#[test]
fn distinct_buckets_never_collide() -> Result<(), SimError> {
    // 'x', 'y', 'z' land in buckets 0, 1, 2 of a 10 slot table
    let mut simulator = Simulator::with_table(Table::new(10, FirstByte));
    let result = simulator.simulate(&keys(&["x", "y", "x", "z"]))?;
    assert_eq!(
        result,
        ResultRecord {
            hits: 1,
            misses: 3,
            collisions: 0,
            load_factor: 0.3
        }
    );
    Ok(())
}

#[test]
fn probing_wraps_past_the_last_slot() {
    let mut table = Table::new(4, Constant(3));
    assert_eq!(table.probe_and_update("a"), AccessOutcome::Miss { collisions: 0 });
    // "b" starts at occupied slot 3 and wraps around to slot 0
    assert_eq!(table.probe_and_update("b"), AccessOutcome::Miss { collisions: 1 });
    assert_eq!(table.slots()[3], Slot::Occupied("a".to_string()));
    assert_eq!(table.slots()[0], Slot::Occupied("b".to_string()));
    assert_eq!(table.occupied_count(), 2);
}

#[test]
fn no_key_is_stored_twice() {
    let mut table = Table::new(4, Constant(0));
    for key in ["a", "a", "b", "a"] {
        table.probe_and_update(key);
    }
    let copies = table
        .slots()
        .iter()
        .filter(|slot| **slot == Slot::Occupied("a".to_string()))
        .count();
    assert_eq!(copies, 1);
    assert_eq!(table.occupied_count(), 2);
}

#[test]
fn repeated_runs_are_deterministic() -> Result<(), SimError> {
    let config = SimConfig {
        capacity: 64,
        hash: HashKindConfig::Fnv,
    };
    let workload = crate::util::synthetic_keys(16, 200);
    let first = Simulator::new(&config)?.simulate(&workload)?;
    let second = Simulator::new(&config)?.simulate(&workload)?;
    assert_eq!(first, second);
    assert_eq!(first.hits + first.misses, 200);
    assert!(first.load_factor <= 1.0);
    Ok(())
}

#[test]
fn no_input_is_a_configuration_error() {
    let err = gather_keys(None, None).unwrap_err();
    assert!(matches!(err, SimError::NoInput));
    assert!(err.is_configuration());
    // An inline list with nothing in it counts as no input too
    assert!(matches!(
        gather_keys(None, Some(" , ,")).unwrap_err(),
        SimError::NoInput
    ));
}

#[test]
fn both_input_forms_are_rejected() {
    assert!(matches!(
        gather_keys(Some("keys.txt"), Some("a,b")).unwrap_err(),
        SimError::AmbiguousInput
    ));
}

#[test]
fn inline_list_drops_empty_entries() {
    assert_eq!(parse_inline("a, b,,c ,"), vec!["a", "b", "c"]);
    assert_eq!(parse_inline("a,a,a"), vec!["a", "a", "a"]);
}

#[test]
fn key_file_drops_blank_lines() -> Result<(), SimError> {
    let path = std::env::temp_dir().join("probelib-key-file-test.txt");
    fs::write(&path, "alpha\n\n   \nbeta\r\ngamma\n").expect("couldn't write the fixture");
    let read = read_key_file(path.to_str().expect("non-utf8 temp path"));
    fs::remove_file(&path).expect("couldn't remove the fixture");
    assert_eq!(read?, vec!["alpha", "beta", "gamma"]);
    Ok(())
}

#[test]
fn missing_key_file_is_a_configuration_error() {
    let err = read_key_file("/definitely/not/a/real/key-file.txt").unwrap_err();
    assert!(matches!(err, SimError::KeyFile { .. }));
    assert!(err.is_configuration());
}

#[test]
fn zero_capacity_is_rejected() {
    let config = SimConfig {
        capacity: 0,
        hash: HashKindConfig::Fnv,
    };
    assert!(matches!(
        Simulator::new(&config).unwrap_err(),
        SimError::ZeroCapacity
    ));
}

#[test]
fn config_parsing_applies_defaults() {
    let config: SimConfig = serde_json::from_str("{}").expect("empty config should parse");
    assert_eq!(config.capacity, 64);
    assert!(matches!(config.hash, HashKindConfig::Fnv));

    let config: SimConfig =
        serde_json::from_str(r#"{"capacity": 16, "hash": "poly"}"#).expect("config should parse");
    assert_eq!(config.capacity, 16);
    assert!(matches!(config.hash, HashKindConfig::Polynomial));
}

#[test]
fn result_record_serialises_with_the_expected_field_names() -> Result<(), SimError> {
    let mut simulator = Simulator::with_table(Table::new(4, Constant(0)));
    let result = simulator.simulate(&keys(&["a", "a", "b"]))?;
    let json = serde_json::to_value(&result).expect("record should serialise");
    let fields = json.as_object().expect("record should be an object");
    assert_eq!(fields.len(), 4);
    assert_eq!(fields["hits"], 1);
    assert_eq!(fields["misses"], 2);
    assert_eq!(fields["collisions"], 1);
    assert_eq!(fields["load_factor"], 0.5);
    Ok(())
}

#[test]
fn counters_never_decrease() -> Result<(), SimError> {
    let mut simulator = Simulator::with_table(Table::new(8, FirstByte));
    let mut previous = simulator.report();
    for key in ["p", "q", "p", "r", "q", "p"] {
        simulator.process(key)?;
        let current = simulator.report();
        assert!(current.hits >= previous.hits);
        assert!(current.misses >= previous.misses);
        assert!(current.collisions >= previous.collisions);
        assert!(current.load_factor >= previous.load_factor);
        previous = current;
    }
    Ok(())
}
