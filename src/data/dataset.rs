use super::{batcher::TrainingBatch, tokenizer::Tokenizer, DataError, WindowBatcher};
use burn::data::{dataloader::batcher::Batcher, dataset::Dataset};
use burn::prelude::Backend;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::Arc;

/// One training example: `targets` is `inputs` shifted left by one token.
#[derive(new, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowItem {
    pub inputs: Vec<usize>,
    pub targets: Vec<usize>,
}

/// Block-aligned windows over a character corpus.
///
/// Window `i` starts at character `i * block_size` and reads `block_size + 1`
/// tokens. The corpus is encoded once; datasets produced by
/// [`train_val_split`](Self::train_val_split) share the text, the tokens and
/// the tokenizer with their parent.
#[derive(Clone)]
pub struct CharDataset {
    text: Arc<str>,
    bytes: Range<usize>,
    tokens: Arc<[usize]>,
    chars: Range<usize>,
    tokenizer: Arc<dyn Tokenizer>,
    block_size: usize,
    batch_size: usize,
}

impl CharDataset {
    pub fn new(
        corpus: impl Into<Arc<str>>,
        tokenizer: Arc<dyn Tokenizer>,
        block_size: usize,
        batch_size: usize,
    ) -> Result<Self, DataError> {
        let text: Arc<str> = corpus.into();
        let tokens: Arc<[usize]> = tokenizer.encode(&text)?.into();

        let dataset = Self {
            bytes: 0..text.len(),
            chars: 0..tokens.len(),
            text,
            tokens,
            tokenizer,
            block_size,
            batch_size,
        };
        dataset.validate()?;

        log::debug!(
            "dataset over {} chars: {} windows of {} (batch size {})",
            dataset.num_chars(),
            dataset.len(),
            block_size,
            batch_size
        );

        Ok(dataset)
    }

    fn validate(&self) -> Result<(), DataError> {
        if self.block_size == 0 {
            return Err(DataError::InvalidConfig("block_size must be positive".into()));
        }
        if self.batch_size == 0 {
            return Err(DataError::InvalidConfig("batch_size must be positive".into()));
        }

        let required = self.block_size.checked_add(1).ok_or_else(|| {
            DataError::InvalidConfig(format!("block_size {} is too large", self.block_size))
        })?;
        if self.num_chars() < required {
            return Err(DataError::CorpusTooShort {
                chars: self.num_chars(),
                required,
            });
        }

        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text[self.bytes.clone()]
    }

    pub fn tokens(&self) -> &[usize] {
        &self.tokens[self.chars.clone()]
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    pub fn num_chars(&self) -> usize {
        self.chars.len()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Window at `index`, or `IndexOutOfRange` when fewer than
    /// `block_size + 1` tokens remain from its start. This includes
    /// `len() - 1` whenever the corpus length is a multiple of `block_size`.
    pub fn try_get(&self, index: usize) -> Result<WindowItem, DataError> {
        let start = index.checked_mul(self.block_size);
        let end = start
            .and_then(|start| start.checked_add(self.block_size))
            .and_then(|end| end.checked_add(1));

        match (start, end) {
            (Some(start), Some(end)) if end <= self.num_chars() => {
                let window = &self.tokens()[start..end];
                Ok(WindowItem::new(
                    window[..self.block_size].to_vec(),
                    window[1..].to_vec(),
                ))
            }
            _ => Err(DataError::IndexOutOfRange {
                index,
                windows: self.len(),
            }),
        }
    }

    /// Draws one start index from `[0, len() - batch_size)` and returns the
    /// windows `start..start + batch_size` in order.
    pub fn sample_windows<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<WindowItem>, DataError> {
        let windows = self.len();
        if windows <= self.batch_size {
            return Err(DataError::NotEnoughWindows {
                windows,
                batch_size: self.batch_size,
            });
        }

        let start = rng.gen_range(0..windows - self.batch_size);
        log::trace!("sampling windows {}..{}", start, start + self.batch_size);

        (start..start + self.batch_size)
            .map(|index| self.try_get(index))
            .collect()
    }

    pub fn get_batch<B: Backend>(
        &self,
        batcher: &WindowBatcher<B>,
    ) -> Result<TrainingBatch<B>, DataError> {
        self.get_batch_with_rng(batcher, &mut rand::thread_rng())
    }

    pub fn get_batch_with_rng<B: Backend, R: Rng>(
        &self,
        batcher: &WindowBatcher<B>,
        rng: &mut R,
    ) -> Result<TrainingBatch<B>, DataError> {
        let items = self.sample_windows(rng)?;
        Ok(batcher.batch(items))
    }

    /// Splits the corpus at `floor(num_chars() * train_fraction)` characters.
    ///
    /// Both halves keep this dataset's tokenizer, block size and batch size
    /// and are validated like a freshly built dataset.
    pub fn train_val_split(&self, train_fraction: f64) -> Result<(Self, Self), DataError> {
        if !(0.0..=1.0).contains(&train_fraction) {
            return Err(DataError::InvalidConfig(format!(
                "train_fraction must be within [0, 1], got {train_fraction}"
            )));
        }

        let split =
            ((self.num_chars() as f64 * train_fraction).floor() as usize).min(self.num_chars());
        let split_byte = self.bytes.start
            + self
                .text()
                .char_indices()
                .nth(split)
                .map_or(self.bytes.len(), |(offset, _)| offset);

        let split_char = self.chars.start + split;

        let train = self.view(self.bytes.start..split_byte, self.chars.start..split_char);
        let validation = self.view(split_byte..self.bytes.end, split_char..self.chars.end);

        log::debug!(
            "split {} chars into {} train / {} validation",
            self.num_chars(),
            train.num_chars(),
            validation.num_chars()
        );

        train.validate()?;
        validation.validate()?;

        Ok((train, validation))
    }

    fn view(&self, bytes: Range<usize>, chars: Range<usize>) -> Self {
        Self {
            text: self.text.clone(),
            bytes,
            tokens: self.tokens.clone(),
            chars,
            tokenizer: self.tokenizer.clone(),
            block_size: self.block_size,
            batch_size: self.batch_size,
        }
    }
}

impl Dataset<WindowItem> for CharDataset {
    fn get(&self, index: usize) -> Option<WindowItem> {
        self.try_get(index).ok()
    }

    /// Number of block-aligned windows: `floor(num_chars() / block_size)`.
    fn len(&self) -> usize {
        self.num_chars() / self.block_size
    }
}
