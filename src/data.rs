mod batcher;
mod config;
mod dataset;
mod error;
pub mod tokenizer;

pub use batcher::{TrainingBatch, WindowBatcher};
pub use config::CharDatasetConfig;
pub use dataset::{CharDataset, WindowItem};
pub use error::DataError;
pub use tokenizer::{CharTokenizer, Tokenizer};
