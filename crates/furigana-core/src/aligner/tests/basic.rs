use super::*;
use crate::aligner::align_tokens;
use crate::aligner::testutil::{pairs, test_oracle, ScriptedOracle};
use crate::oracle::OracleToken;
use crate::unit::reconstruct;

#[test]
fn test_empty_line() {
    let oracle = test_oracle();
    assert!(align(&oracle, "").is_empty());
}

#[test]
fn test_all_kanji_token_keeps_whole_reading() {
    let oracle = test_oracle();
    let units = align_bare(&oracle, "地球");
    assert_eq!(pairs(&units), vec![("地球", Some("ちきゅう"))]);
}

#[test]
fn test_katakana_token_passes_through() {
    let oracle = test_oracle();
    let units = align_bare(&oracle, "テレビ");
    assert_eq!(pairs(&units), vec![("テレビ", None)]);
}

#[test]
fn test_katakana_emitted_once() {
    let oracle = test_oracle();
    let units = align_bare(&oracle, "テレビは");
    assert_eq!(pairs(&units), vec![("テレビ", None), ("は", None)]);
}

#[test]
fn test_no_kanji_token_passes_through() {
    let oracle = test_oracle();
    let units = align_bare(&oracle, "また、ABC");
    assert_eq!(reconstruct(&units), "また、ABC");
    assert!(units.iter().all(|u| u.reading.is_none()));
}

#[test]
fn test_mixed_one_to_one() {
    let oracle = test_oracle();
    let units = align_bare(&oracle, "気持ち");
    assert_eq!(
        pairs(&units),
        vec![("気", Some("き")), ("持", Some("も")), ("ち", None)]
    );
}

#[test]
fn test_mixed_apportion_by_guess() {
    // 勉 guesses べん, so 強 takes the remaining きょう
    let oracle = test_oracle();
    let units = align_bare(&oracle, "勉強する");
    assert_eq!(
        pairs(&units),
        vec![("勉", Some("べん")), ("強", Some("きょう")), ("する", None)]
    );
}

#[test]
fn test_mixed_apportion_fallback_one_char() {
    // 大 guesses だい, which おとな does not start with: 大 takes one code point
    let oracle = test_oracle();
    let units = align_bare(&oracle, "大人しい");
    assert_eq!(
        pairs(&units),
        vec![("大", Some("お")), ("人", Some("とな")), ("しい", None)]
    );
}

#[test]
fn test_apportion_is_deterministic() {
    let oracle = test_oracle();
    let a = align_bare(&oracle, "大人しい");
    let b = align_bare(&oracle, "大人しい");
    assert_eq!(a, b);
}

#[test]
fn test_leading_kana_then_kanji() {
    let oracle = test_oracle();
    let units = align_bare(&oracle, "お茶");
    assert_eq!(pairs(&units), vec![("お", None), ("茶", Some("ちゃ"))]);
}

#[test]
fn test_next_reading_not_found_takes_rest() {
    let oracle = ScriptedOracle::new().line("書く", &[("書く", "かいた")]);
    let units = align_bare(&oracle, "書く");
    assert_eq!(pairs(&units), vec![("書", Some("かいた")), ("く", None)]);
}

#[test]
fn test_empty_reading_does_not_panic() {
    let oracle = ScriptedOracle::new().line("行った", &[("行った", "")]);
    let units = align_bare(&oracle, "行った");
    assert_eq!(pairs(&units), vec![("行", None), ("った", None)]);
}

#[test]
fn test_reading_exhausted_mid_token() {
    let oracle = ScriptedOracle::new().line("見る見る", &[("見る見る", "みる")]);
    let units = align_bare(&oracle, "見る見る");
    assert_eq!(
        pairs(&units),
        vec![("見", Some("み")), ("る", None), ("見", None), ("る", None)]
    );
    assert_eq!(reconstruct(&units), "見る見る");
}

#[test]
fn test_align_tokens_without_tables() {
    let oracle = test_oracle();
    let tokens = vec![
        OracleToken::new("会おう", "あおう"),
        OracleToken::new("君", "くん"),
    ];
    let units = align_tokens(&oracle, &tokens);
    assert_eq!(
        pairs(&units),
        vec![("会", Some("あ")), ("おう", None), ("君", Some("くん"))]
    );
}

#[test]
fn test_unknown_kanji_read_as_itself_is_plain() {
    let oracle = test_oracle();
    let units = align_bare(&oracle, "見");
    assert_eq!(pairs(&units), vec![("見", None)]);
}
