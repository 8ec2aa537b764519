use super::*;
use crate::aligner::testutil::{pairs, test_oracle, ScriptedOracle};
use crate::aligner::AlignError;
use crate::unit::reconstruct;

#[test]
fn test_line_with_counter_and_mixed_token() {
    let oracle = test_oracle();
    let units = align(&oracle, "三日後にまた会おう");
    assert_eq!(
        pairs(&units),
        vec![
            ("三日", Some("みっか")),
            ("後", Some("ご")),
            ("に", None),
            ("また", None),
            ("会", Some("あ")),
            ("おう", None),
        ]
    );
    assert_eq!(reconstruct(&units), "三日後にまた会おう");
}

#[test]
fn test_counter_annotated_in_place() {
    let oracle = test_oracle();
    for line in ["3人で行った", "三人で行った"] {
        let units = align(&oracle, line);
        assert_eq!(units[0].reading.as_deref(), Some("さんにん"));
        assert_eq!(reconstruct(&units), line);
        assert_eq!(
            pairs(&units[1..]),
            vec![("で", None), ("行", Some("い")), ("った", None)]
        );
    }
}

#[test]
fn test_counter_replaced_before_oracle() {
    let oracle = ScriptedOracle::new().line(
        "さんにんで行った",
        &[("さんにんで", "さんにんで"), ("行った", "いった")],
    );
    let units = align_with(&oracle, "三人で行った", replace_style()).unwrap();
    assert_eq!(
        pairs(&units),
        vec![("さんにんで", None), ("行", Some("い")), ("った", None)]
    );
}

#[test]
fn test_unmapped_counter_left_to_oracle() {
    let oracle = ScriptedOracle::new().line("11人", &[("11人", "じゅういちにん")]);
    let units = align(&oracle, "11人");
    assert_eq!(reconstruct(&units), "11人");
    assert!(units.iter().all(|u| u.base != "11人"));
}

#[test]
fn test_override_always() {
    let oracle = test_oracle();
    let units = align(&oracle, "私は");
    assert_eq!(pairs(&units), vec![("私", Some("わたし")), ("は", None)]);
}

#[test]
fn test_override_standalone_at_line_start() {
    let oracle = test_oracle();
    let units = align(&oracle, "君が");
    assert_eq!(pairs(&units), vec![("君", Some("きみ")), ("が", None)]);
}

#[test]
fn test_override_skipped_after_name() {
    let oracle = test_oracle();
    let units = align(&oracle, "太郎君");
    assert_eq!(
        pairs(&units),
        vec![("太郎", Some("たろう")), ("君", Some("くん"))]
    );
}

#[test]
fn test_override_standalone_after_punctuation() {
    // punctuation is not part of a name
    let oracle = ScriptedOracle::new().line("、君は", &[("、", "、"), ("君は", "くんは")]);
    let units = align(&oracle, "、君は");
    assert_eq!(
        pairs(&units),
        vec![("、", None), ("君", Some("きみ")), ("は", None)]
    );
}

#[test]
fn test_strict_policy_rejects_bad_oracle() {
    let oracle = ScriptedOracle::new().line("今日は", &[("今日", "きょう")]);
    let err = align_with(&oracle, "今日は", AlignOptions::default()).unwrap_err();
    match err {
        AlignError::OracleContractViolation { expected, actual } => {
            assert_eq!(expected, "今日は");
            assert_eq!(actual, "今日");
        }
    }
}

#[test]
fn test_trusting_policy_aligns_anyway() {
    let oracle = ScriptedOracle::new().line("今日は", &[("今日", "きょう")]);
    let units = align_with(&oracle, "今日は", trusting()).unwrap();
    assert_eq!(pairs(&units), vec![("今日", Some("きょう"))]);
}

#[test]
fn test_lines_are_independent() {
    let oracle = test_oracle();
    let counters = default_counters();
    let overrides = default_overrides();
    let aligner = Aligner::with_tables(&oracle, &counters, &overrides, AlignOptions::default());
    let first = aligner.align_line("太郎君").unwrap();
    let second = aligner.align_line("君が").unwrap();
    assert_eq!(first[1].reading.as_deref(), Some("くん"));
    assert_eq!(second[0].reading.as_deref(), Some("きみ"));
}
