use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Unknown {kind}: {value}")]
    UnknownChoice { kind: &'static str, value: String },
    #[error("Unknown category filter: {0}")]
    UnknownFilter(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Failures reported by a [`FundingDataProvider`](super::FundingDataProvider).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid opportunity data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate opportunity id: {0}")]
    DuplicateId(String),

    #[error("Match score {score} of opportunity {id} is outside 0-100")]
    ScoreOutOfRange { id: String, score: u8 },

    #[error("Submission rejected: {0}")]
    Rejected(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;
