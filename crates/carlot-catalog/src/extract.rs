//! Keyword extraction for typeahead suggestions.
//!
//! [`TermExtractor`] is the pluggable seam: the suggestion engine only needs
//! an ordered set of candidate terms. [`LexiconTagger`] tags colour words and
//! common nouns with fixed word lists; [`WhitespaceSplitter`] is the naive
//! split the engine falls back to.

use std::collections::HashSet;

use crate::error::ExtractError;

/// Fragments longer than this are refused by the tagger.
pub const MAX_TAGGER_INPUT: usize = 512;

/// Extracts candidate search terms from free text.
pub trait TermExtractor: Send + Sync {
    /// Name of this extraction strategy, for logs.
    fn name(&self) -> &str;

    /// Candidate terms in order of relevance, without duplicates.
    fn extract(&self, text: &str) -> Result<Vec<String>, ExtractError>;
}

/// Splits on runs of whitespace; every non-empty token is a term.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSplitter;

impl TermExtractor for WhitespaceSplitter {
    fn name(&self) -> &str {
        "whitespace"
    }

    fn extract(&self, text: &str) -> Result<Vec<String>, ExtractError> {
        Ok(text.split_whitespace().map(str::to_owned).collect())
    }
}

/// Part-of-speech guess for a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Color,
    Noun,
    Other,
}

const COLORS: &[&str] = &[
    "red", "blue", "green", "yellow", "black", "white", "gray", "grey", "silver", "gold",
    "golden", "orange", "purple", "violet", "pink", "brown", "maroon", "beige", "bronze",
    "cyan", "magenta", "navy", "teal", "turquoise", "crimson", "scarlet", "ivory", "cream",
    "charcoal", "burgundy", "copper", "tan",
];

// Function words, auxiliaries, common verbs and adjectives. Anything else
// that contains a letter is treated as a noun, which is how shoppers type
// brand and model names.
const NON_NOUNS: &[&str] = &[
    // determiners and pronouns
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "our", "their", "his",
    "her", "its", "some", "any", "every", "each", "all", "no", "i", "me", "we", "us", "you",
    "he", "she", "it", "they", "them", "what", "which", "who", "whom", "whose",
    // prepositions and conjunctions
    "in", "on", "at", "by", "for", "with", "without", "from", "to", "of", "about", "under",
    "over", "above", "below", "between", "near", "into", "than", "and", "or", "but", "nor",
    "so", "if", "then", "as", "like",
    // auxiliaries
    "is", "are", "was", "were", "be", "been", "being", "am", "do", "does", "did", "have",
    "has", "had", "can", "could", "will", "would", "shall", "should", "may", "might", "must",
    // verbs shoppers type
    "show", "find", "get", "give", "want", "need", "looking", "look", "search", "buy", "see",
    "list", "compare", "prefer",
    // adjectives and adverbs
    "new", "used", "old", "cheap", "cheapest", "expensive", "affordable", "good", "best",
    "better", "great", "nice", "big", "small", "fast", "slow", "very", "most", "more", "less",
    "not", "only", "please",
];

#[derive(Debug, Clone)]
pub struct LexiconTagger {
    colors: HashSet<&'static str>,
    non_nouns: HashSet<&'static str>,
    max_input: usize,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconTagger {
    pub fn new() -> Self {
        Self {
            colors: COLORS.iter().copied().collect(),
            non_nouns: NON_NOUNS.iter().copied().collect(),
            max_input: MAX_TAGGER_INPUT,
        }
    }

    pub fn with_max_input(mut self, max_input: usize) -> Self {
        self.max_input = max_input;
        self
    }

    pub fn tag(&self, token: &str) -> Tag {
        let lower = token.to_lowercase();
        if self.colors.contains(lower.as_str()) {
            Tag::Color
        } else if self.non_nouns.contains(lower.as_str())
            || !token.chars().any(char::is_alphabetic)
        {
            Tag::Other
        } else {
            Tag::Noun
        }
    }

    /// Whitespace tokens with surrounding punctuation trimmed. Inner
    /// punctuation stays (`Mercedes-Benz`).
    fn tokens(text: &str) -> impl Iterator<Item = &str> {
        text.split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|word| !word.is_empty())
    }
}

impl TermExtractor for LexiconTagger {
    fn name(&self) -> &str {
        "lexicon"
    }

    /// Colour words first, then nouns, each in order of appearance.
    fn extract(&self, text: &str) -> Result<Vec<String>, ExtractError> {
        let len = text.chars().count();
        if len > self.max_input {
            return Err(ExtractError::InputTooLong { len, max: self.max_input });
        }

        let mut colors = Vec::new();
        let mut nouns = Vec::new();
        for token in Self::tokens(text) {
            match self.tag(token) {
                Tag::Color => colors.push(token),
                Tag::Noun => nouns.push(token),
                Tag::Other => {}
            }
        }

        let mut seen = HashSet::new();
        Ok(colors
            .into_iter()
            .chain(nouns)
            .filter(|term| seen.insert(term.to_lowercase()))
            .map(str::to_owned)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_split_keeps_every_token() {
        let terms = WhitespaceSplitter.extract("  the   red\tcar ").unwrap();
        assert_eq!(terms, vec!["the", "red", "car"]);
        assert!(WhitespaceSplitter.extract("   ").unwrap().is_empty());
    }

    #[test]
    fn color_word_alone() {
        let terms = LexiconTagger::new().extract("red").unwrap();
        assert_eq!(terms, vec!["red"]);
    }

    #[test]
    fn colors_come_before_nouns() {
        let terms = LexiconTagger::new()
            .extract("show me a Honda City in Red, please")
            .unwrap();
        assert_eq!(terms, vec!["Red", "Honda", "City"]);
    }

    #[test]
    fn duplicates_are_dropped_case_insensitively() {
        let terms = LexiconTagger::new().extract("BMW bmw Black black").unwrap();
        assert_eq!(terms, vec!["Black", "BMW"]);
    }

    #[test]
    fn hyphenated_brands_stay_whole() {
        let terms = LexiconTagger::new().extract("Mercedes-Benz?").unwrap();
        assert_eq!(terms, vec!["Mercedes-Benz"]);
    }

    #[test]
    fn numbers_and_function_words_are_not_nouns() {
        let tagger = LexiconTagger::new();
        assert_eq!(tagger.tag("2024"), Tag::Other);
        assert_eq!(tagger.tag("the"), Tag::Other);
        assert_eq!(tagger.tag("i20"), Tag::Noun);
        assert!(tagger.extract("show me the best").unwrap().is_empty());
    }

    #[test]
    fn long_input_is_refused() {
        let tagger = LexiconTagger::new().with_max_input(8);
        let err = tagger.extract("a fairly long fragment").unwrap_err();
        assert!(matches!(err, ExtractError::InputTooLong { max: 8, .. }));
    }
}
