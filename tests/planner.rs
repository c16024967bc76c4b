//! Scenario tables for seed plan resolution and mask layout.

use seedmask::plan::INVALID;
use seedmask::{BinomialTable, SeedConfig, SeedConfigError, SeedPlan};
use test_case::test_case;

#[test_case(64, 16, 1, 0, 1 ; "single substitution")]
#[test_case(64, 24, 2, 1, 4 ; "indel tolerant")]
#[test_case(48, 20, 3, 2, 2 ; "three active chunks")]
#[test_case(24, 10, 3, 0, 1 ; "short read")]
#[test_case(64, 8, 5, 0, 1 ; "many substitutions")]
#[test_case(32, 30, 2, 0, 1 ; "single base chunks")]
#[test_case(64, 1, 0, 0, 1 ; "exact match")]
fn windows_match_enumeration(r: u32, w: u32, s: u32, i: u32, l: u32) {
    let table = BinomialTable::new();
    let plan = SeedPlan::from_config(SeedConfig::new(r, w, s, i, l));
    assert!(plan.valid(), "{plan}");

    let chunks = plan.chunks() as usize;
    assert_eq!(plan.number_windows(), plan.masks().len() as u64);
    assert_eq!(plan.number_windows(), table.get(chunks, s as usize));
    assert_eq!(plan.chunks(), plan.active_chunks() + s as i32);
    assert!(plan.window_length() >= w as i32);
    assert!(plan.window_length() <= 32);
    assert!(plan.read_length() <= r as i32);
    assert_eq!(plan.window_bits(), 2 * plan.window_length());
}

#[test_case(64, 16, 1, 0, 1 ; "single substitution")]
#[test_case(64, 24, 2, 1, 4 ; "indel tolerant")]
#[test_case(48, 20, 3, 2, 2 ; "three active chunks")]
#[test_case(64, 8, 5, 0, 1 ; "many substitutions")]
#[test_case(32, 30, 2, 0, 1 ; "single base chunks")]
fn masks_are_well_formed(r: u32, w: u32, s: u32, i: u32, l: u32) {
    let plan = SeedPlan::from_config(SeedConfig::new(r, w, s, i, l));
    let window_length = plan.window_length() as u32;

    for mask in plan.masks() {
        let ranges = mask.ranges();
        let covered: u32 = ranges.iter().map(|range| range.length()).sum();
        assert_eq!(covered, window_length, "mask {mask}");
        assert_eq!(mask.window_length(), window_length);
        assert_eq!(mask.indels(), i);
        assert_eq!(mask.indel_length(), l);

        assert!(mask.gaps()[1..].iter().all(|&gap| gap > 0), "mask {mask}");
        for pair in ranges.windows(2) {
            assert!(
                pair[1].right_shift() > pair[0].position(),
                "ranges overlap or are out of order in {mask}"
            );
            assert_eq!(
                pair[1].left_shift(),
                pair[0].left_shift() + pair[0].length(),
                "output is not packed in {mask}"
            );
        }
        assert_eq!(ranges[0].left_shift(), 0);
        assert!(ranges[ranges.len() - 1].position() < plan.read_length() as u32);
    }
}

#[test]
fn single_substitution_over_sixty_four_bases() {
    let plan = SeedPlan::from_config(SeedConfig::new(64, 16, 1, 0, 1));
    assert!(plan.valid());
    assert_eq!(plan.chunks(), 2);
    assert_eq!(plan.chunk_length(), 16);
    assert_eq!(plan.number_windows(), plan.chunks() as u64);

    let dumps: Vec<String> = plan.masks().iter().map(|mask| mask.to_string()).collect();
    assert_eq!(dumps, ["[+0] 0..=15", "[+16] 16..=31->0"]);
}

#[test_case(SeedConfig::new(10, 20, 0, 0, 1),
    SeedConfigError::WindowLength { window_length: 20, read_length: 10 } ; "window longer than read")]
#[test_case(SeedConfig::new(0, 1, 0, 0, 1),
    SeedConfigError::ReadLength { read_length: 0 } ; "empty read")]
#[test_case(SeedConfig::new(65, 16, 1, 0, 1),
    SeedConfigError::ReadLength { read_length: 65 } ; "read wider than a word")]
#[test_case(SeedConfig::new(64, 0, 1, 0, 1),
    SeedConfigError::WindowLength { window_length: 0, read_length: 64 } ; "empty window")]
#[test_case(SeedConfig::new(64, 31, 2, 0, 1),
    SeedConfigError::WindowSpan { window_length: 31, substitutions: 2 } ; "key wider than a word")]
#[test_case(SeedConfig::new(20, 18, 3, 0, 1),
    SeedConfigError::Substitutions { substitutions: 3, window_length: 18, read_length: 20 } ; "too many substitutions")]
#[test_case(SeedConfig::new(64, 16, 1, 2, 1),
    SeedConfigError::Indels { indels: 2, substitutions: 1 } ; "indels beyond substitutions")]
#[test_case(SeedConfig::new(64, 16, 1, 1, 0),
    SeedConfigError::IndelLength ; "zero indel length")]
fn invalid_plans_report_sentinels(config: SeedConfig, reason: SeedConfigError) {
    assert_eq!(config.validate(), Err(reason.clone()));

    let plan = SeedPlan::from_config(config);
    assert!(!plan.valid());
    assert_eq!(plan.invalid_reason(), Some(&reason));
    assert!(plan.tiling().is_none());

    assert_eq!(plan.read_length(), INVALID);
    assert_eq!(plan.window_length(), INVALID);
    assert_eq!(plan.window_bits(), INVALID);
    assert_eq!(plan.chunk_length(), INVALID);
    assert_eq!(plan.chunks(), INVALID);
    assert_eq!(plan.active_chunks(), INVALID);
    assert_eq!(plan.number_windows(), 0);
    assert!(plan.masks().is_empty());
    assert!(plan.to_string().contains("invalid"));
}
