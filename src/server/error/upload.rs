use thiserror::Error;

/// Client errors raised while receiving or assembling a chunked upload.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Upload is not in progress")]
    NotInProgress,

    #[error("Chunk index {index} is out of range, upload has {total} chunks")]
    ChunkOutOfRange { index: i32, total: i32 },

    #[error("Chunk {index} has {actual} bytes, expected {expected}")]
    ChunkSizeMismatch {
        index: i32,
        expected: i64,
        actual: i64,
    },

    #[error("Upload is missing chunks: {0:?}")]
    MissingChunks(Vec<i32>),

    /// Assembled file size or SHA-256 does not match what the client declared.
    #[error("Uploaded file failed integrity check: {0}")]
    IntegrityCheckFailed(String),
}
