//! In-memory [`ResourceClient`] implementation.
//!
//! Backs two things: unit tests for the cache and controllers (with call
//! counters and injectable failures), and the TUI's offline mode when no
//! backend URL is configured.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use dealdesk_api::{
    ApiError, EntityKind, ListQuery, Record, RecordFields, RecordPage, ResourceClient, Result,
    UploadRequest,
};

/// Per-operation call counters, readable from tests.
#[derive(Debug, Default)]
pub struct CallCounts {
    list: AtomicU32,
    create: AtomicU32,
    update: AtomicU32,
    delete: AtomicU32,
    upload: AtomicU32,
}

impl CallCounts {
    pub fn list(&self) -> u32 {
        self.list.load(Ordering::SeqCst)
    }
    pub fn create(&self) -> u32 {
        self.create.load(Ordering::SeqCst)
    }
    pub fn update(&self) -> u32 {
        self.update.load(Ordering::SeqCst)
    }
    pub fn delete(&self) -> u32 {
        self.delete.load(Ordering::SeqCst)
    }
    pub fn upload(&self) -> u32 {
        self.upload.load(Ordering::SeqCst)
    }

    /// Total network calls across all operations.
    pub fn total(&self) -> u32 {
        self.list() + self.create() + self.update() + self.delete() + self.upload()
    }
}

/// In-memory store behind the [`ResourceClient`] trait.
pub struct MemoryResourceClient {
    kind: EntityKind,
    records: RwLock<Vec<Record>>,
    /// If `Some`, the next call returns this error (used to test failure paths).
    fail_next: RwLock<Option<ApiError>>,
    counts: CallCounts,
}

impl MemoryResourceClient {
    /// Empty store for `kind`.
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        Self::with_records(kind, Vec::new())
    }

    /// Store pre-populated with `records`.
    #[must_use]
    pub fn with_records(kind: EntityKind, records: Vec<Record>) -> Self {
        Self {
            kind,
            records: RwLock::new(records),
            fail_next: RwLock::new(None),
            counts: CallCounts::default(),
        }
    }

    /// Arrange for the next call (any operation) to fail with `error`.
    pub async fn fail_next(&self, error: ApiError) {
        *self.fail_next.write().await = Some(error);
    }

    /// Call counters.
    #[must_use]
    pub fn counts(&self) -> &CallCounts {
        &self.counts
    }

    fn resource(&self) -> String {
        self.kind.descriptor().path.to_string()
    }

    async fn take_injected_failure(&self) -> Result<()> {
        match self.fail_next.write().await.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn matches_search(record: &Record, term: &str) -> bool {
        let needle = term.to_lowercase();
        record
            .fields
            .values()
            .any(|v| v.to_lowercase().contains(&needle))
    }
}

#[async_trait]
impl ResourceClient for MemoryResourceClient {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    async fn list(&self, query: &ListQuery) -> Result<RecordPage> {
        self.counts.list.fetch_add(1, Ordering::SeqCst);
        self.take_injected_failure().await?;

        let query = query.validated(100);
        let store = self.records.read().await;
        let filtered: Vec<&Record> = match query.search.as_deref() {
            Some(term) if !term.is_empty() => store
                .iter()
                .filter(|r| Self::matches_search(r, term))
                .collect(),
            _ => store.iter().collect(),
        };

        let total = u32::try_from(filtered.len()).unwrap_or(u32::MAX);
        let start = (query.page - 1).saturating_mul(query.page_size);
        let records = filtered
            .into_iter()
            .skip(usize::try_from(start).unwrap_or(usize::MAX))
            .take(usize::try_from(query.page_size).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(RecordPage::from_total_count(
            records,
            query.page,
            query.page_size,
            total,
        ))
    }

    async fn get(&self, id: &str) -> Result<Record> {
        self.take_injected_failure().await?;
        let store = self.records.read().await;
        store
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                resource: self.resource(),
                id: id.to_string(),
                raw_message: None,
            })
    }

    async fn create(&self, fields: &RecordFields) -> Result<Record> {
        self.counts.create.fetch_add(1, Ordering::SeqCst);
        self.take_injected_failure().await?;

        let record = Record {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: None,
            updated_at: None,
            fields: fields.clone(),
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, fields: &RecordFields) -> Result<Record> {
        self.counts.update.fetch_add(1, Ordering::SeqCst);
        self.take_injected_failure().await?;

        let mut store = self.records.write().await;
        let Some(record) = store.iter_mut().find(|r| r.id == id) else {
            return Err(ApiError::NotFound {
                resource: self.resource(),
                id: id.to_string(),
                raw_message: None,
            });
        };
        record.fields = fields.clone();
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.counts.delete.fetch_add(1, Ordering::SeqCst);
        self.take_injected_failure().await?;

        let mut store = self.records.write().await;
        let before = store.len();
        store.retain(|r| r.id != id);
        if store.len() == before {
            return Err(ApiError::NotFound {
                resource: self.resource(),
                id: id.to_string(),
                raw_message: None,
            });
        }
        Ok(())
    }

    async fn upload(&self, request: &UploadRequest) -> Result<Record> {
        self.counts.upload.fetch_add(1, Ordering::SeqCst);
        self.take_injected_failure().await?;

        if !self.kind.descriptor().supports_upload {
            return Err(ApiError::UploadUnsupported {
                resource: self.resource(),
            });
        }

        let record = Record::new(
            uuid::Uuid::new_v4().to_string(),
            [
                ("name", request.file_name.clone()),
                ("category", "Uploaded".to_string()),
                ("size", format!("{} bytes", request.bytes.len())),
                ("uploaded", String::new()),
            ],
        );
        self.records.write().await.push(record.clone());
        Ok(record)
    }
}

/// Seed records for offline mode, one small data set per entity.
#[must_use]
pub fn seed_records(kind: EntityKind) -> Vec<Record> {
    match kind {
        EntityKind::Deal => vec![
            Record::new(
                "d1",
                [
                    ("name", "Acme Acquisition"),
                    ("type", "Merger"),
                    ("status", "Open"),
                    ("value", "$10M"),
                ],
            ),
            Record::new(
                "d2",
                [
                    ("name", "Globex Partnership"),
                    ("type", "Joint Venture"),
                    ("status", "Diligence"),
                    ("value", "$4.5M"),
                ],
            ),
            Record::new(
                "d3",
                [
                    ("name", "Initech Buyout"),
                    ("type", "Acquisition"),
                    ("status", "Closed"),
                    ("value", "$22M"),
                ],
            ),
        ],
        EntityKind::Document => vec![
            Record::new(
                "doc1",
                [
                    ("name", "acme-loi.pdf"),
                    ("category", "Letter of Intent"),
                    ("size", "1.2 MB"),
                    ("uploaded", "2026-01-15"),
                ],
            ),
            Record::new(
                "doc2",
                [
                    ("name", "globex-nda.pdf"),
                    ("category", "NDA"),
                    ("size", "640 KB"),
                    ("uploaded", "2026-02-02"),
                ],
            ),
        ],
        EntityKind::Prospect => vec![
            Record::new(
                "p1",
                [
                    ("name", "Jane Doe"),
                    ("company", "Globex"),
                    ("email", "jane@globex.com"),
                    ("status", "Contacted"),
                ],
            ),
            Record::new(
                "p2",
                [
                    ("name", "John Roe"),
                    ("company", "Hooli"),
                    ("email", "john@hooli.com"),
                    ("status", "New"),
                ],
            ),
        ],
    }
}
