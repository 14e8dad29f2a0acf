#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid edge at position {index}: {reason}")]
    InvalidEdge { index: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
