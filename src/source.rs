// Where the apply command reads its JSONL from: a local file or an S3 object.

use std::path::PathBuf;

use aws_config::SdkConfig;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordSource {
    File(PathBuf),
    S3 { bucket: String, key: String },
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Bucket '{0}' does not exist")]
    NoSuchBucket(String),

    #[error("File '{key}' not found in bucket '{bucket}'")]
    NoSuchKey { bucket: String, key: String },

    #[error("Error accessing S3: {0}")]
    S3(String),

    #[error("Object '{0}' is not valid UTF-8")]
    Encoding(String),
}

impl SourceError {
    /// Classify an S3 GetObject failure by its error code.
    pub fn from_s3_code(bucket: &str, key: &str, code: Option<&str>, message: String) -> Self {
        match code {
            Some("NoSuchBucket") => Self::NoSuchBucket(bucket.to_string()),
            Some("NoSuchKey") => Self::NoSuchKey {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            _ => Self::S3(message),
        }
    }
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::S3 { bucket, key } => write!(f, "s3://{bucket}/{key}"),
        }
    }
}

impl RecordSource {
    /// Load the raw JSONL text. The SDK config is only consulted for S3.
    pub async fn load(&self, sdk_config: Option<&SdkConfig>) -> Result<String, SourceError> {
        match self {
            Self::File(path) => {
                debug!(path = %path.display(), "Reading records from file");
                std::fs::read_to_string(path).map_err(|source| SourceError::File {
                    path: path.clone(),
                    source,
                })
            }
            Self::S3 { bucket, key } => {
                let sdk_config = sdk_config.ok_or_else(|| {
                    SourceError::S3("no AWS configuration available".to_string())
                })?;
                load_s3(&aws_sdk_s3::Client::new(sdk_config), bucket, key).await
            }
        }
    }
}

async fn load_s3(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<String, SourceError> {
    info!(bucket = bucket, key = key, "Fetching records from S3");

    let output = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| {
            let message = DisplayErrorContext(&e).to_string();
            let code = if e.as_service_error().is_some_and(|s| s.is_no_such_key()) {
                Some("NoSuchKey")
            } else {
                e.code()
            };
            SourceError::from_s3_code(bucket, key, code, message)
        })?;

    let bytes = output
        .body
        .collect()
        .await
        .map_err(|e| SourceError::S3(e.to_string()))?
        .into_bytes();

    String::from_utf8(bytes.to_vec()).map_err(|_| SourceError::Encoding(key.to_string()))
}
