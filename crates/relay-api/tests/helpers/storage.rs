//! In-memory storage double that records every put.

use async_trait::async_trait;
use bytes::Bytes;
use relay_storage::{ObjectAcl, ObjectReader, Storage, StorageBackend, StorageError, StorageResult};
use std::sync::Mutex;
use tokio::io::AsyncReadExt;

pub const TEST_BUCKET_URL: &str = "https://test-bucket.s3.ap-south-1.amazonaws.com";

/// One call that reached the storage backend.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub data: Vec<u8>,
    pub content_type: String,
    pub acl: ObjectAcl,
    pub streamed: bool,
    pub content_length: Option<u64>,
}

/// Records puts in memory, or fails every put when built with [`failing`](Self::failing).
#[derive(Default)]
pub struct RecordingStorage {
    objects: Mutex<Vec<StoredObject>>,
    failure: Option<String>,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            objects: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }

    pub fn put_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    fn record(&self, object: StoredObject) -> StorageResult<String> {
        if let Some(message) = &self.failure {
            return Err(StorageError::UploadFailed(message.clone()));
        }
        let url = format!("{}/{}", TEST_BUCKET_URL, object.key);
        self.objects.lock().unwrap().push(object);
        Ok(url)
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
        acl: ObjectAcl,
    ) -> StorageResult<String> {
        self.record(StoredObject {
            key: key.to_string(),
            data: data.to_vec(),
            content_type: content_type.to_string(),
            acl,
            streamed: false,
            content_length: None,
        })
    }

    async fn put_stream(
        &self,
        key: &str,
        mut reader: ObjectReader,
        content_length: Option<u64>,
        content_type: &str,
        acl: ObjectAcl,
    ) -> StorageResult<String> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        self.record(StoredObject {
            key: key.to_string(),
            data,
            content_type: content_type.to_string(),
            acl,
            streamed: true,
            content_length,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
