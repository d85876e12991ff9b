use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// 要素数0の木は構築できない。
    #[error("a tree must hold at least one element")]
    InvalidSize,
    #[error(transparent)]
    Range(#[from] RangeError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("index {index} out of range for tree of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("range end index {end} out of range for tree of length {len}")]
    EndOutOfBounds { end: usize, len: usize },
    #[error("range starts at {start} but ends at {end}")]
    StartAfterEnd { start: usize, end: usize },
    #[error("range is empty at {at}")]
    Empty { at: usize },
    #[error("range bound overflows usize")]
    Overflow,
}
