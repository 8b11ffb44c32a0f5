//! Sequential S3 upload pass over the file manifest. Missing files and
//! failed transfers are logged and skipped; nothing here aborts the batch
//! or retries.

use anyhow::Result;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{primitives::ByteStream, Client};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::schema::MANIFEST;

pub async fn make_s3_client() -> Client {
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    Client::new(&config)
}

/// One manifest entry resolved against the local data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub file_name: &'static str,
    pub local_path: PathBuf,
    pub key: String,
    pub exists: bool,
}

/// Resolve every manifest entry to its local path and remote key. Pure
/// apart from the existence probe, so the upload decision is testable
/// without a network.
pub fn pending_uploads(data_dir: &Path, prefix: &str) -> Vec<PendingUpload> {
    MANIFEST
        .iter()
        .map(|&file_name| {
            let local_path = data_dir.join(file_name);
            PendingUpload {
                file_name,
                exists: local_path.exists(),
                key: format!("{prefix}/{file_name}"),
                local_path,
            }
        })
        .collect()
}

/// Copy each present manifest file to `s3://{bucket}/{prefix}/{file}`,
/// returning the keys that made it up. A single file's failure never
/// aborts the batch.
pub async fn upload_all(
    client: &Client,
    bucket: &str,
    data_dir: &Path,
    prefix: &str,
) -> Vec<String> {
    let mut uploaded = Vec::new();
    for pending in pending_uploads(data_dir, prefix) {
        if !pending.exists {
            warn!(file = pending.file_name, "file not found, skipping");
            continue;
        }
        info!(file = pending.file_name, key = %pending.key, bucket, "uploading");
        match put_file(client, bucket, &pending).await {
            Ok(()) => {
                info!(file = pending.file_name, "uploaded");
                uploaded.push(pending.key);
            }
            Err(err) => {
                error!(file = pending.file_name, error = %err, "upload failed");
            }
        }
    }
    uploaded
}

async fn put_file(client: &Client, bucket: &str, pending: &PendingUpload) -> Result<()> {
    let body = ByteStream::from_path(&pending.local_path).await?;
    client
        .put_object()
        .bucket(bucket)
        .key(&pending.key)
        .body(body)
        .send()
        .await?;
    Ok(())
}
