use super::*;

/// Tests starting an upload.
///
/// Verifies the chunk count and that a directory for the parts is created.
///
/// Expected: in-progress upload with 3 chunks
#[tokio::test]
async fn computes_chunk_count() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let instructor = User::from_entity(factory::create_instructor(db).await?)?;

    let upload = UploadService::new(db, dir.path(), MAX_UPLOAD_SIZE)
        .init(&instructor, params_for(&file_bytes()))
        .await?;

    assert_eq!(upload.status, UploadStatus::InProgress);
    assert_eq!(upload.total_chunks, 3);
    assert_eq!(upload.chunk_size, 1024);
    assert_eq!(upload.id.len(), 32);
    assert!(dir.path().join(&upload.id).is_dir());

    Ok(())
}

/// Tests invalid upload announcements.
///
/// Verifies that an oversized file, a tiny chunk size, a malformed digest and a `.part`
/// filename are rejected.
///
/// Expected: Err(BadRequest) for each
#[tokio::test]
async fn rejects_invalid_parameters() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let instructor = User::from_entity(factory::create_instructor(db).await?)?;
    let service = UploadService::new(db, dir.path(), MAX_UPLOAD_SIZE);
    let valid = params_for(&file_bytes());

    let cases = [
        InitUploadParams {
            total_size: MAX_UPLOAD_SIZE + 1,
            ..valid.clone()
        },
        InitUploadParams {
            chunk_size: Some(512),
            ..valid.clone()
        },
        InitUploadParams {
            sha256: "not-a-digest".to_string(),
            ..valid.clone()
        },
        InitUploadParams {
            filename: "0.part".to_string(),
            ..valid.clone()
        },
    ];

    for params in cases {
        let result = service.init(&instructor, params).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    Ok(())
}
