//! Icecast-style annotation metadata
//!
//! Stream directories put extra metadata in a track's `<annotation>` as
//! `key: value` lines:
//!
//! ```text
//! Stream Title: Groove Salad
//! Content Type: audio/mpeg
//! Bitrate: 128
//! ```
//!
//! Keys are camel-cased so `Content Type`, `content-type` and `contentType`
//! all land on `contentType`.

use std::collections::BTreeMap;

/// Parse annotation text into camel-cased keys and trimmed values
pub fn extract_metas(text: &str) -> BTreeMap<String, String> {
    let mut metas = BTreeMap::new();

    for line in text.split(&['\r', '\n'][..]).filter(|line| !line.is_empty()) {
        // Split on the first colon only; URLs in values keep theirs
        if let Some((key, value)) = line.split_once(':') {
            metas.insert(camel_case(key.trim()), value.trim().to_string());
        }
    }

    metas
}

/// Convert a separator- or case-delimited token to camelCase
pub fn camel_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());

    for (index, word) in split_words(input).iter().enumerate() {
        let lower = word.to_lowercase();
        if index == 0 {
            result.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }

    result
}

#[derive(Clone, Copy, PartialEq)]
enum CharKind {
    Lower,
    Upper,
    Digit,
}

fn char_kind(c: char) -> CharKind {
    if c.is_numeric() {
        CharKind::Digit
    } else if c.is_uppercase() {
        CharKind::Upper
    } else {
        CharKind::Lower
    }
}

/// Word boundaries: separators, `aB`, `ABc` (before the `B`), letter/digit
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();

    for chunk in input.split(|c: char| !c.is_alphanumeric()).filter(|c| !c.is_empty()) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut current = String::new();

        for (i, &c) in chars.iter().enumerate() {
            if i > 0 {
                let prev = char_kind(chars[i - 1]);
                let kind = char_kind(c);
                let next_is_lower = chars
                    .get(i + 1)
                    .is_some_and(|&n| char_kind(n) == CharKind::Lower);

                let boundary = match (prev, kind) {
                    (CharKind::Lower, CharKind::Upper) => true,
                    (CharKind::Upper, CharKind::Upper) => next_is_lower,
                    (CharKind::Digit, CharKind::Digit) => false,
                    (CharKind::Digit, _) | (_, CharKind::Digit) => true,
                    _ => false,
                };

                if boundary && !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }

        if !current.is_empty() {
            words.push(current);
        }
    }

    words
}

#[cfg(test)]
#[path = "annotation_tests.rs"]
mod tests;
