use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentationError {
    #[error("Sentence splitting failed: {0}")]
    Split(String),

    #[error("Sentence detector could not be initialized: {0}")]
    DetectorInit(String),

    #[error("Chunk budget must be at least 1 character (got {0})")]
    InvalidBudget(usize),
}

pub type Result<T> = std::result::Result<T, SegmentationError>;
