#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported dimensionality {0}, expected 2 or 3")]
    InvalidDimension(u8),
    #[error(transparent)]
    Graph(#[from] narwhal_graphlib::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
