use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot map empty archive")]
    EmptyArchive,

    #[error("frame decompression failed: {0}")]
    FrameDecompress(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
