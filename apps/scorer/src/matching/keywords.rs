//! Keyword extraction — turns free text into a bounded, deduplicated token list.
//!
//! Tokens are runs of letters, digits and `+#.-` so that "c++", "c#" and "node.js"
//! survive intact. Consecutive qualifying words (no punctuation between them)
//! are additionally emitted as two- and three-word phrases. Tokens longer
//! than [`MAX_TOKEN_LEN`] are dropped, which keeps every pairwise comparison
//! downstream bounded.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::matching::similarity::MAX_COMPARABLE_LEN;
use crate::matching::vocabulary::is_stopword;

/// Upper bound on the number of keywords returned for one text.
pub const MAX_KEYWORDS: usize = 100;
const MAX_PHRASE_WORDS: usize = 3;
/// Longest single token kept, in chars.
pub const MAX_TOKEN_LEN: usize = MAX_COMPARABLE_LEN;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}+#.\-]+").expect("token regex is valid"));

/// Extracts case-folded keywords and short phrases in order of first occurrence.
///
/// Empty input yields an empty list.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut keywords = Vec::new();
    let mut seen = HashSet::new();
    let mut run: Vec<&str> = Vec::new();
    let mut last_end = 0;

    for m in TOKEN_RE.find_iter(&lowered) {
        let gap = &lowered[last_end..m.start()];
        last_end = m.end();
        if !gap.chars().all(char::is_whitespace) {
            run.clear();
        }

        let raw = m.as_str();
        let word = normalize_token(raw);
        if !is_qualifying(word) {
            run.clear();
            continue;
        }

        run.push(word);
        if run.len() > MAX_PHRASE_WORDS {
            run.remove(0);
        }

        push_unique(&mut keywords, &mut seen, word.to_string());
        for n in 2..=run.len() {
            push_unique(&mut keywords, &mut seen, run[run.len() - n..].join(" "));
        }

        // A trailing period ends the sentence, so phrases must not span it.
        if raw.ends_with('.') {
            run.clear();
        }
        if keywords.len() >= MAX_KEYWORDS {
            break;
        }
    }

    keywords.truncate(MAX_KEYWORDS);
    keywords
}

fn normalize_token(raw: &str) -> &str {
    raw.trim_end_matches(['.', '-']).trim_start_matches('-')
}

fn is_qualifying(word: &str) -> bool {
    let len = word.chars().count();
    (2..=MAX_TOKEN_LEN).contains(&len)
        && word.chars().any(char::is_alphabetic)
        && !is_stopword(word)
}

fn push_unique(keywords: &mut Vec<String>, seen: &mut HashSet<String>, keyword: String) {
    if seen.insert(keyword.clone()) {
        keywords.push(keyword);
    }
}
