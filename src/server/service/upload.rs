//! Chunked file uploads.
//!
//! A client announces the file (name, size, SHA-256) and receives an upload id and chunk
//! count. Chunks are written to `<upload_dir>/<id>/<index>.part` in any order and may be
//! re-sent. Completing the upload concatenates the parts into `<upload_dir>/<id>/<filename>`
//! and verifies size and digest before the upload is marked completed.

use std::path::{Path, PathBuf};

use rand::Rng;
use sea_orm::DatabaseConnection;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;

use crate::server::{
    data::upload::UploadRepository,
    error::{upload::UploadError, AppError},
    model::{
        upload::{InitUploadParams, Upload, UploadStatus},
        user::User,
    },
    util::validation::sanitize_filename,
};

pub const DEFAULT_CHUNK_SIZE: i64 = 5 * 1024 * 1024;
pub const MIN_CHUNK_SIZE: i64 = 1024;
pub const MAX_CHUNK_SIZE: i64 = 64 * 1024 * 1024;

const UPLOAD_ID_LEN: usize = 32;
const FILENAME_MAX_LEN: usize = 255;
const PART_EXTENSION: &str = "part";

pub struct UploadService<'a> {
    db: &'a DatabaseConnection,
    upload_dir: &'a Path,
    max_upload_size: i64,
}

impl<'a> UploadService<'a> {
    pub fn new(db: &'a DatabaseConnection, upload_dir: &'a Path, max_upload_size: i64) -> Self {
        Self {
            db,
            upload_dir,
            max_upload_size,
        }
    }

    /// Starts an upload.
    ///
    /// # Returns
    /// - `Ok(Upload)` - In-progress upload with its id and chunk count
    /// - `Err(AppError::BadRequest)` - Invalid filename, size, chunk size or digest
    pub async fn init(&self, user: &User, params: InitUploadParams) -> Result<Upload, AppError> {
        let filename = sanitize_filename(&params.filename);
        if filename.is_empty()
            || filename.len() > FILENAME_MAX_LEN
            || filename.ends_with(&format!(".{}", PART_EXTENSION))
        {
            return Err(AppError::BadRequest(format!(
                "Invalid filename '{}'",
                params.filename
            )));
        }

        if params.total_size < 1 || params.total_size > self.max_upload_size {
            return Err(AppError::BadRequest(format!(
                "File size must be between 1 and {} bytes",
                self.max_upload_size
            )));
        }

        let chunk_size = params.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&chunk_size) {
            return Err(AppError::BadRequest(format!(
                "Chunk size must be between {} and {} bytes",
                MIN_CHUNK_SIZE, MAX_CHUNK_SIZE
            )));
        }

        let sha256 = params.sha256.trim().to_ascii_lowercase();
        if sha256.len() != 64 || !sha256.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AppError::BadRequest(
                "sha256 must be 64 hexadecimal characters".to_string(),
            ));
        }

        let total_chunks = i32::try_from((params.total_size + chunk_size - 1) / chunk_size)
            .map_err(|_| AppError::BadRequest("Too many chunks".to_string()))?;

        let id = random_id();
        tokio::fs::create_dir_all(self.upload_path(&id)).await?;

        let upload = UploadRepository::new(self.db)
            .create(
                id,
                user.id,
                filename,
                params.total_size,
                chunk_size,
                total_chunks,
                sha256,
            )
            .await?;

        tracing::info!(
            upload_id = %upload.id,
            user_id = user.id,
            total_size = upload.total_size,
            total_chunks = upload.total_chunks,
            "Upload started"
        );

        Ok(upload)
    }

    /// Stores one chunk, replacing an earlier copy of the same index.
    ///
    /// # Returns
    /// - `Ok(())` - Chunk written
    /// - `Err(AppError::UploadErr)` - Upload not in progress, index out of range or wrong length
    pub async fn put_chunk(
        &self,
        user: &User,
        upload_id: &str,
        index: i32,
        bytes: &[u8],
    ) -> Result<(), AppError> {
        let upload = self.get_in_progress(user, upload_id).await?;

        if index < 0 || index >= upload.total_chunks {
            return Err(UploadError::ChunkOutOfRange {
                index,
                total: upload.total_chunks,
            }
            .into());
        }

        let expected = upload.expected_chunk_len(index);
        if bytes.len() as i64 != expected {
            return Err(UploadError::ChunkSizeMismatch {
                index,
                expected,
                actual: bytes.len() as i64,
            }
            .into());
        }

        tokio::fs::write(self.part_path(upload_id, index), bytes).await?;

        tracing::debug!(upload_id, index, "Chunk stored");

        Ok(())
    }

    /// Upload with the indices of the chunks received so far, in ascending order.
    pub async fn status(&self, user: &User, upload_id: &str) -> Result<(Upload, Vec<i32>), AppError> {
        let upload = self.get_owned(user, upload_id).await?;

        let received = if upload.status == UploadStatus::InProgress {
            self.received_chunks(&upload).await?
        } else {
            Vec::new()
        };

        Ok((upload, received))
    }

    /// Assembles the chunks and verifies the result.
    ///
    /// A size or digest mismatch marks the upload failed and removes its directory with
    /// the parts and the assembled file.
    ///
    /// # Returns
    /// - `Ok(Upload)` - Completed upload
    /// - `Err(AppError::UploadErr)` - Missing chunks or integrity failure
    pub async fn complete(&self, user: &User, upload_id: &str) -> Result<Upload, AppError> {
        let upload = self.get_in_progress(user, upload_id).await?;

        let received = self.received_chunks(&upload).await?;
        let missing: Vec<i32> = (0..upload.total_chunks)
            .filter(|i| received.binary_search(i).is_err())
            .collect();
        if !missing.is_empty() {
            return Err(UploadError::MissingChunks(missing).into());
        }

        let target = self.upload_path(upload_id).join(&upload.filename);
        let (size, digest) = self.assemble(&upload, &target).await?;

        let failure = if size != upload.total_size {
            Some(format!("expected {} bytes, got {}", upload.total_size, size))
        } else if digest != upload.sha256 {
            Some("SHA-256 digest does not match".to_string())
        } else {
            None
        };

        if let Some(reason) = failure {
            tokio::fs::remove_dir_all(self.upload_path(upload_id)).await?;
            UploadRepository::new(self.db).mark_failed(upload_id).await?;
            tracing::warn!(upload_id, "Upload failed verification: {}", reason);
            return Err(UploadError::IntegrityCheckFailed(reason).into());
        }

        for index in 0..upload.total_chunks {
            tokio::fs::remove_file(self.part_path(upload_id, index)).await?;
        }

        let completed = UploadRepository::new(self.db)
            .mark_completed(upload_id, target.to_string_lossy().into_owned())
            .await?
            .ok_or_else(|| AppError::NotFound("Upload not found".to_string()))?;

        tracing::info!(upload_id, size, "Upload completed");

        Ok(completed)
    }

    /// Concatenates the parts into `target`, returning its size and hex digest.
    async fn assemble(&self, upload: &Upload, target: &Path) -> Result<(i64, String), AppError> {
        let mut file = tokio::fs::File::create(target).await?;
        let mut hasher = Sha256::new();
        let mut size: i64 = 0;

        for index in 0..upload.total_chunks {
            let bytes = tokio::fs::read(self.part_path(&upload.id, index)).await?;
            hasher.update(&bytes);
            size += bytes.len() as i64;
            file.write_all(&bytes).await?;
        }

        file.flush().await?;

        Ok((size, hex::encode(hasher.finalize())))
    }

    async fn received_chunks(&self, upload: &Upload) -> Result<Vec<i32>, AppError> {
        let mut received = Vec::new();

        let mut entries = match tokio::fs::read_dir(self.upload_path(&upload.id)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(received),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PART_EXTENSION) {
                continue;
            }
            let index = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<i32>().ok());
            if let Some(index) = index.filter(|i| (0..upload.total_chunks).contains(i)) {
                received.push(index);
            }
        }

        received.sort_unstable();
        Ok(received)
    }

    async fn get_owned(&self, user: &User, upload_id: &str) -> Result<Upload, AppError> {
        let upload = UploadRepository::new(self.db)
            .find_by_id(upload_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Upload not found".to_string()))?;

        if upload.user_id != user.id {
            return Err(AppError::Forbidden(
                "Upload belongs to another user".to_string(),
            ));
        }

        Ok(upload)
    }

    async fn get_in_progress(&self, user: &User, upload_id: &str) -> Result<Upload, AppError> {
        let upload = self.get_owned(user, upload_id).await?;

        if upload.status != UploadStatus::InProgress {
            return Err(UploadError::NotInProgress.into());
        }

        Ok(upload)
    }

    fn upload_path(&self, upload_id: &str) -> PathBuf {
        self.upload_dir.join(upload_id)
    }

    fn part_path(&self, upload_id: &str, index: i32) -> PathBuf {
        self.upload_path(upload_id)
            .join(format!("{}.{}", index, PART_EXTENSION))
    }
}

fn random_id() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();

    (0..UPLOAD_ID_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
