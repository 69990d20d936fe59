use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("selection is empty after trimming")]
    EmptySelection,

    #[error("unknown law id: {0}")]
    UnknownLaw(String),

    #[error("favorite list is full ({max} laws)")]
    FavoritesFull { max: usize },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
