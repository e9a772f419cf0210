use super::Tokenizer;
use crate::data::DataError;
use std::collections::{BTreeSet, HashMap};

/// Character-level tokenizer with one token per `char`.
///
/// The vocabulary is the set of distinct characters of the corpus it was built
/// from, numbered in ascending code-point order, so the same corpus always
/// yields the same ids.
#[derive(Clone, Debug)]
pub struct CharTokenizer {
    char_to_id: HashMap<char, usize>,
    id_to_char: Vec<char>,
}

impl CharTokenizer {
    pub fn new(corpus: &str) -> Self {
        let id_to_char: Vec<char> = corpus
            .chars()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let char_to_id: HashMap<char, usize> = id_to_char
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i))
            .collect();

        log::debug!("built character vocabulary of {} symbols", id_to_char.len());

        Self {
            char_to_id,
            id_to_char,
        }
    }

    pub fn id_of(&self, c: char) -> Option<usize> {
        self.char_to_id.get(&c).copied()
    }

    pub fn char_of(&self, id: usize) -> Option<char> {
        self.id_to_char.get(id).copied()
    }

    /// Vocabulary characters in id order.
    pub fn chars(&self) -> &[char] {
        &self.id_to_char
    }

    /// Shorthand for [`Tokenizer::encode`] usable wherever a function is expected.
    pub fn encoder(&self) -> impl Fn(&str) -> Result<Vec<usize>, DataError> + '_ {
        move |text: &str| self.encode(text)
    }
}

impl Tokenizer for CharTokenizer {
    fn encode(&self, value: &str) -> Result<Vec<usize>, DataError> {
        value
            .chars()
            .map(|c| self.id_of(c).ok_or(DataError::UnknownChar(c)))
            .collect()
    }

    fn decode(&self, tokens: &[usize]) -> Result<String, DataError> {
        tokens
            .iter()
            .map(|&id| self.char_of(id).ok_or(DataError::UnknownToken(id)))
            .collect()
    }

    fn vocab_size(&self) -> usize {
        self.id_to_char.len()
    }
}
