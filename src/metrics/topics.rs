// Naive topic extraction: most frequent meaningful words across messages.
//
// Tokens are lower-cased and stripped of punctuation, keeping ASCII word
// characters and the accented letters common in Portuguese. Short tokens and
// stopwords are discarded. Ties in frequency keep first-encountered order.

use std::collections::HashMap;

use crate::interactions::Interaction;

/// Number of topics the dashboard shows.
pub const DEFAULT_TOPIC_LIMIT: usize = 3;

/// Tokens with this many characters or fewer are ignored.
const MIN_TOKEN_CHARS_EXCLUSIVE: usize = 3;

/// Accented letters kept during token cleanup.
const KEPT_ACCENTS: &str = "áéíóúàâêôãõç";

const STOPWORDS: &[&str] = &[
    "a", "o", "de", "da", "do", "e", "é", "em", "que", "para", "com", "não", "um", "uma", "os",
    "as", "dos", "das", "por", "no", "na", "se", "me", "ele", "ela", "eu", "você",
];

fn is_kept_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() || KEPT_ACCENTS.contains(c)
}

/// Split a message into candidate topic tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|&c| is_kept_char(c))
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS_EXCLUSIVE)
        .filter(|token| !STOPWORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Count token frequencies across interactions, in first-encountered order.
pub fn token_frequencies(interactions: &[Interaction]) -> Vec<(String, usize)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for interaction in interactions {
        for token in tokenize(&interaction.text) {
            match index.get(&token) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(token.clone(), counts.len());
                    counts.push((token, 1));
                }
            }
        }
    }

    counts
}

/// The `limit` most frequent topics, most frequent first.
///
/// Equal frequencies keep the order in which the words were first seen.
pub fn extract_topics(interactions: &[Interaction], limit: usize) -> Vec<String> {
    let mut counts = token_frequencies(interactions);
    // stable sort preserves first-encountered order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(word, _)| word)
        .collect()
}
