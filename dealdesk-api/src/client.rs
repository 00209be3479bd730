use async_trait::async_trait;

use crate::error::{ApiError, Result};
use crate::record::{Record, RecordFields};
use crate::types::{EntityKind, ListQuery, RecordPage};

/// A file to be uploaded to an upload-capable resource.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// File name as presented to the backend.
    pub file_name: String,
    /// MIME type (e.g. `"application/pdf"`).
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Remote client for one business resource (deals, documents or prospects).
///
/// All calls are asynchronous and may fail with a transport or status
/// [`ApiError`]. Implementations must not retry on their own: a failure is
/// terminal for that attempt.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Which entity this client serves.
    fn kind(&self) -> EntityKind;

    /// Fetch one page of records, optionally filtered by a search term.
    async fn list(&self, query: &ListQuery) -> Result<RecordPage>;

    /// Fetch a single record by id.
    async fn get(&self, id: &str) -> Result<Record>;

    /// Create a new record from field values. The backend assigns the id.
    async fn create(&self, fields: &RecordFields) -> Result<Record>;

    /// Replace an existing record's field values.
    async fn update(&self, id: &str, fields: &RecordFields) -> Result<Record>;

    /// Delete a record by id.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Upload a file, producing a new record (documents only).
    ///
    /// The default implementation rejects the call; only clients for
    /// upload-capable entities override it.
    async fn upload(&self, request: &UploadRequest) -> Result<Record> {
        let _ = request;
        Err(ApiError::UploadUnsupported {
            resource: self.kind().descriptor().path.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoUploadClient;

    #[async_trait]
    impl ResourceClient for NoUploadClient {
        fn kind(&self) -> EntityKind {
            EntityKind::Deal
        }

        async fn list(&self, _query: &ListQuery) -> Result<RecordPage> {
            Ok(RecordPage::from_total_count(vec![], 1, 10, 0))
        }

        async fn get(&self, id: &str) -> Result<Record> {
            Err(ApiError::NotFound {
                resource: "deals".to_string(),
                id: id.to_string(),
                raw_message: None,
            })
        }

        async fn create(&self, _fields: &RecordFields) -> Result<Record> {
            Ok(Record::new("d1", [("name", "Acme")]))
        }

        async fn update(&self, _id: &str, _fields: &RecordFields) -> Result<Record> {
            Ok(Record::new("d1", [("name", "Acme")]))
        }

        async fn delete(&self, _id: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn default_upload_is_rejected() {
        let client = NoUploadClient;
        let req = UploadRequest {
            file_name: "a.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![1, 2, 3],
        };
        let res = client.upload(&req).await;
        assert!(
            matches!(&res, Err(ApiError::UploadUnsupported { .. })),
            "unexpected result: {res:?}"
        );
    }
}
