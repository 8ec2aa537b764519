use serde::Serialize;

use crate::oracle::{OracleToken, Transliterator};
use crate::unicode::{is_kanji, is_katakana_str};
use crate::unit::AlignmentUnit;

/// How a token was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// All katakana: passed through unannotated.
    Katakana,
    /// No kanji: passed through unannotated.
    NoKanji,
    /// All kanji: the oracle reading is kept for the whole token.
    AllKanji,
    /// Kanji and kana mixed: readings apportioned per kanji run.
    Mixed,
}

pub fn route_of(orig: &str) -> Route {
    if is_katakana_str(orig) {
        Route::Katakana
    } else if !orig.chars().any(is_kanji) {
        Route::NoKanji
    } else if orig.chars().all(is_kanji) {
        Route::AllKanji
    } else {
        Route::Mixed
    }
}

/// Align one oracle token, appending its units to `out`.
pub fn align_token(
    oracle: &dyn Transliterator,
    token: &OracleToken,
    out: &mut Vec<AlignmentUnit>,
) -> Route {
    let route = route_of(&token.orig);
    match route {
        Route::Katakana | Route::NoKanji => out.push(AlignmentUnit::plain(token.orig.as_str())),
        Route::AllKanji => out.push(AlignmentUnit::annotated(
            token.orig.as_str(),
            token.hira.as_str(),
        )),
        Route::Mixed => {
            let orig: Vec<char> = token.orig.chars().collect();
            let hira: Vec<char> = token.hira.chars().collect();
            align_mixed(oracle, &orig, &hira, out);
        }
    }
    route
}

/// Split a mixed token into kanji units and the kana between them.
///
/// `idx` walks `hira` in code points. Kana advance it by the length of their
/// own reading; a kanji run takes everything up to where the reading of the
/// character after the run is next found (or the rest of `hira`).
fn align_mixed(
    oracle: &dyn Transliterator,
    orig: &[char],
    hira: &[char],
    out: &mut Vec<AlignmentUnit>,
) {
    let mut idx = 0usize;
    let mut kana = String::new();
    let mut i = 0;

    while i < orig.len() {
        let ch = orig[i];
        if !is_kanji(ch) {
            idx += oracle.char_reading(ch).chars().count();
            kana.push(ch);
            i += 1;
            continue;
        }

        if !kana.is_empty() {
            out.push(AlignmentUnit::plain(std::mem::take(&mut kana)));
        }

        let mut j = i;
        while j < orig.len() && is_kanji(orig[j]) {
            j += 1;
        }

        let next_idx = if j < orig.len() {
            let next: Vec<char> = oracle.char_reading(orig[j]).chars().collect();
            find_from(hira, &next, idx).unwrap_or(hira.len())
        } else {
            hira.len()
        };

        let start = idx.min(hira.len());
        let end = next_idx.max(start);
        let run_reading = &hira[start..end];
        let run = &orig[i..j];

        if run_reading.len() == run.len() {
            for (&kc, &rc) in run.iter().zip(run_reading) {
                out.push(AlignmentUnit::annotated(kc.to_string(), rc.to_string()));
            }
        } else {
            apportion(oracle, run, run_reading, out);
        }

        idx = next_idx;
        i = j;
    }

    if !kana.is_empty() {
        out.push(AlignmentUnit::plain(kana));
    }
}

/// Share `reading` across a kanji run whose length differs from it.
///
/// Every kanji but the last takes its own single-character reading when the
/// remainder starts with it, otherwise one code point. The last kanji takes
/// whatever is left.
fn apportion(
    oracle: &dyn Transliterator,
    run: &[char],
    reading: &[char],
    out: &mut Vec<AlignmentUnit>,
) {
    let mut remaining = reading;
    for (k, &kc) in run.iter().enumerate() {
        let piece = if k + 1 == run.len() {
            remaining
        } else {
            let guess: Vec<char> = oracle.char_reading(kc).chars().collect();
            let take = if remaining.starts_with(&guess) {
                guess.len()
            } else {
                remaining.len().min(1)
            };
            let (head, tail) = remaining.split_at(take);
            remaining = tail;
            head
        };
        out.push(AlignmentUnit::annotated(
            kc.to_string(),
            piece.iter().collect::<String>(),
        ));
    }
}

/// Position of `needle` in `haystack` at or after `from`, in code points.
/// An empty needle is found at `from`; a start past the end finds nothing.
fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    if needle.is_empty() {
        return Some(from);
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn find_from_semantics() {
        let hay = chars("あおうお");
        assert_eq!(find_from(&hay, &chars("お"), 0), Some(1));
        assert_eq!(find_from(&hay, &chars("お"), 2), Some(3));
        assert_eq!(find_from(&hay, &chars("か"), 0), None);
        assert_eq!(find_from(&hay, &chars(""), 2), Some(2));
        assert_eq!(find_from(&hay, &chars(""), 4), Some(4));
        assert_eq!(find_from(&hay, &chars(""), 5), None);
        assert_eq!(find_from(&hay, &chars("お"), 9), None);
        assert_eq!(find_from(&hay, &chars("おうおう"), 0), None);
    }

    #[test]
    fn routes() {
        assert_eq!(route_of("テレビ"), Route::Katakana);
        assert_eq!(route_of("また"), Route::NoKanji);
        assert_eq!(route_of("、"), Route::NoKanji);
        assert_eq!(route_of("地球"), Route::AllKanji);
        assert_eq!(route_of("会おう"), Route::Mixed);
        assert_eq!(route_of("見たテ"), Route::Mixed);
    }
}
