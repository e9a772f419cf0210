use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Unknown character: {0:?}")]
    UnknownChar(char),

    #[error("Invalid token ID: {0}")]
    UnknownToken(usize),

    #[error("Window index {index} out of range ({windows} complete windows)")]
    IndexOutOfRange { index: usize, windows: usize },

    #[error("Cannot sample a batch of {batch_size} from {windows} windows")]
    NotEnoughWindows { windows: usize, batch_size: usize },

    #[error("Corpus has {chars} characters, at least {required} required")]
    CorpusTooShort { chars: usize, required: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
