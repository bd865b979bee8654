use sha2::{Digest, Sha256};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::{upload::UploadError, AppError},
    model::{
        upload::{InitUploadParams, UploadStatus},
        user::User,
    },
    service::upload::UploadService,
};

mod init;

const MAX_UPLOAD_SIZE: i64 = 1024 * 1024;
const CHUNK: usize = 1024;

/// 2500 bytes split into chunks of 1024, 1024 and 452.
fn file_bytes() -> Vec<u8> {
    (0..2500u32).map(|i| (i % 251) as u8).collect()
}

fn params_for(bytes: &[u8]) -> InitUploadParams {
    InitUploadParams {
        filename: "lecture-01.mp4".to_string(),
        total_size: bytes.len() as i64,
        chunk_size: Some(CHUNK as i64),
        sha256: hex::encode(Sha256::digest(bytes)),
    }
}
