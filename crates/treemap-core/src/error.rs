use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// `put` was called with a key that is already stored. The tree is unchanged.
    #[error("Duplicate key rejected")]
    DuplicateKey,
    #[error("Tree is empty")]
    EmptyTree,
    #[error("Structural corruption: {0}")]
    Corruption(String),
}
