mod character;

pub use character::CharTokenizer;

use super::DataError;

pub trait Tokenizer: Send + Sync {
    fn encode(&self, value: &str) -> Result<Vec<usize>, DataError>;
    fn decode(&self, tokens: &[usize]) -> Result<String, DataError>;
    fn vocab_size(&self) -> usize;
}
