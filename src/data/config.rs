use super::{dataset::CharDataset, tokenizer::Tokenizer, DataError};
use burn::prelude::*;
use std::sync::Arc;

#[derive(Config, Debug)]
pub struct CharDatasetConfig {
    /// Tokens per window.
    #[config(default = 32)]
    pub block_size: usize,
    /// Windows per batch.
    #[config(default = 4)]
    pub batch_size: usize,
    /// Share of the corpus, by character count, kept for training.
    #[config(default = 0.9)]
    pub train_fraction: f64,
}

impl CharDatasetConfig {
    /// Checks `train_fraction`; window and batch sizes are checked by
    /// [`CharDataset::new`].
    pub fn validate(&self) -> Result<(), DataError> {
        if !(0.0..=1.0).contains(&self.train_fraction) {
            return Err(DataError::InvalidConfig(format!(
                "train_fraction must be within [0, 1], got {}",
                self.train_fraction
            )));
        }
        Ok(())
    }

    pub fn init(
        &self,
        corpus: impl Into<Arc<str>>,
        tokenizer: Arc<dyn Tokenizer>,
    ) -> Result<CharDataset, DataError> {
        self.validate()?;
        CharDataset::new(corpus, tokenizer, self.block_size, self.batch_size)
    }

    /// Builds the dataset and splits it at `train_fraction`.
    pub fn init_split(
        &self,
        corpus: impl Into<Arc<str>>,
        tokenizer: Arc<dyn Tokenizer>,
    ) -> Result<(CharDataset, CharDataset), DataError> {
        self.init(corpus, tokenizer)?
            .train_val_split(self.train_fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CharTokenizer;

    #[test]
    fn test_defaults() {
        let config = CharDatasetConfig::new();

        assert_eq!(config.block_size, 32);
        assert_eq!(config.batch_size, 4);
        assert_eq!(config.train_fraction, 0.9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_init_uses_configured_sizes() {
        let corpus = "hello world, hello burn";
        let tokenizer = Arc::new(CharTokenizer::new(corpus));

        let dataset = CharDatasetConfig::new()
            .with_block_size(5)
            .with_batch_size(2)
            .init(corpus, tokenizer)
            .unwrap();

        assert_eq!(dataset.block_size(), 5);
        assert_eq!(dataset.batch_size(), 2);
        assert_eq!(dataset.text(), corpus);
    }

    #[test]
    fn test_init_split() {
        let corpus = "to be or not to be, that is the question".repeat(5);
        let tokenizer = Arc::new(CharTokenizer::new(&corpus));

        let (train, validation) = CharDatasetConfig::new()
            .with_block_size(8)
            .init_split(corpus.as_str(), tokenizer)
            .unwrap();

        assert_eq!(train.num_chars(), 180);
        assert_eq!(validation.num_chars(), 20);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let corpus = "hello world, hello burn";
        let tokenizer = Arc::new(CharTokenizer::new(corpus));

        assert!(matches!(
            CharDatasetConfig::new()
                .with_block_size(0)
                .init(corpus, tokenizer.clone()),
            Err(DataError::InvalidConfig(_))
        ));
        assert!(matches!(
            CharDatasetConfig::new()
                .with_block_size(4)
                .with_batch_size(0)
                .init(corpus, tokenizer.clone()),
            Err(DataError::InvalidConfig(_))
        ));
        assert!(CharDatasetConfig::new()
            .with_train_fraction(-0.1)
            .validate()
            .is_err());
        assert!(matches!(
            CharDatasetConfig::new()
                .with_block_size(4)
                .with_train_fraction(1.5)
                .init(corpus, tokenizer),
            Err(DataError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_serializes_to_json() {
        let config = CharDatasetConfig::new().with_block_size(64);
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["block_size"], 64);
        assert_eq!(json["batch_size"], 4);
        assert_eq!(json["train_fraction"], 0.9);
    }
}
