//! Per-entity list controller: browse, edit, confirm-delete.
//!
//! One controller owns the visible state of one resource list (current
//! page, search term, selection) and a mode that is exactly one of
//! browsing, editing a form, or awaiting delete confirmation. Mutations
//! never patch the visible list directly: they go through the client,
//! invalidate the cache for the whole resource, and re-fetch.

use std::sync::Arc;

use dealdesk_api::{
    ApiError, EntityDescriptor, EntityKind, ListQuery, Record, ResourceClient, UploadRequest,
};

use crate::cache::{QueryCache, QueryKey};
use crate::error::{CoreError, CoreResult};
use crate::form::FormState;

// ============ Modes ============

/// Pending delete confirmation for one record.
#[derive(Debug, Clone)]
pub struct DeletePrompt {
    /// Identifier of the record to delete once confirmed.
    pub record_id: String,
    /// Human-readable label shown in the confirmation dialog.
    pub label: String,
}

/// Interaction mode of a list view. Exactly one is active at a time.
#[derive(Debug, Clone)]
pub enum ListMode {
    /// Plain table navigation.
    Browsing,
    /// A form editor is open, for a new or existing record.
    Editing(FormState),
    /// A delete prompt is open; nothing is deleted until confirmed.
    ConfirmingDelete(DeletePrompt),
}

/// Result of a form submission attempt.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The record was persisted and the list re-fetched.
    Saved(Record),
    /// Validation failed; the form stays open with field errors set.
    Invalid,
}

// ============ Controller ============

/// Workflow state for one entity's list view.
pub struct ListController {
    client: Arc<dyn ResourceClient>,
    cache: Arc<QueryCache>,
    descriptor: EntityDescriptor,
    page_size: u32,
    page: u32,
    total_pages: u32,
    search: String,
    records: Vec<Record>,
    fetch_error: Option<ApiError>,
    selected: usize,
    mode: ListMode,
}

impl ListController {
    /// Create a controller at page 1 with no search term.
    ///
    /// Call [`refresh`](Self::refresh) to load the first page.
    #[must_use]
    pub fn new(client: Arc<dyn ResourceClient>, cache: Arc<QueryCache>, page_size: u32) -> Self {
        let descriptor = client.kind().descriptor();
        Self {
            client,
            cache,
            descriptor,
            page_size: page_size.max(1),
            page: 1,
            total_pages: 1,
            search: String::new(),
            records: Vec::new(),
            fetch_error: None,
            selected: 0,
            mode: ListMode::Browsing,
        }
    }

    // ============ Accessors ============

    /// Entity kind this controller manages.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.descriptor.kind
    }

    /// Static entity metadata (title, fields, upload support).
    #[must_use]
    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    /// Current interaction mode.
    #[must_use]
    pub fn mode(&self) -> &ListMode {
        &self.mode
    }

    /// Records of the currently loaded page.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Current page number (1-indexed).
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Total pages reported by the last successful fetch (at least 1).
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Active search term; empty when unfiltered.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Error from the most recent fetch, if it failed. Stale records stay
    /// visible alongside it.
    #[must_use]
    pub fn fetch_error(&self) -> Option<&ApiError> {
        self.fetch_error.as_ref()
    }

    /// Index of the selected row.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The selected record, if the page is non-empty.
    #[must_use]
    pub fn selected_record(&self) -> Option<&Record> {
        self.records.get(self.selected)
    }

    /// Mutable access to the open form, if editing.
    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        match &mut self.mode {
            ListMode::Editing(form) => Some(form),
            _ => None,
        }
    }

    // ============ Fetching ============

    fn query_key(&self) -> QueryKey {
        QueryKey::new(self.kind(), self.page, self.search.clone())
    }

    async fn fetch_page(&self) -> crate::cache::QueryState {
        let client = Arc::clone(&self.client);
        let query = ListQuery {
            page: self.page,
            page_size: self.page_size,
            search: (!self.search.is_empty()).then(|| self.search.clone()),
        };
        self.cache
            .query(&self.query_key(), move || async move {
                client.list(&query).await
            })
            .await
    }

    /// Fetch the current page through the cache and apply the result.
    ///
    /// If the fetched page reports fewer total pages than the current page
    /// number (the data set shrank underneath us), the page is clamped and
    /// re-fetched. A failed fetch records the error and keeps whatever
    /// records were last shown.
    pub async fn refresh(&mut self) {
        loop {
            let state = self.fetch_page().await;
            if let Some(page) = state.data {
                self.records = page.records;
                self.total_pages = page.total_pages.max(1);
            }
            self.fetch_error = state.error;

            let clamped = self.page.clamp(1, self.total_pages);
            if clamped == self.page || self.fetch_error.is_some() {
                break;
            }
            self.page = clamped;
        }
        self.selected = self.selected.min(self.records.len().saturating_sub(1));
    }

    /// Replace the search term. A changed term resets to page 1 and
    /// re-fetches; an identical term is a no-op.
    pub async fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term == self.search {
            return;
        }
        self.search = term;
        self.page = 1;
        self.selected = 0;
        self.refresh().await;
    }

    /// Jump to `page`, clamped to `1..=total_pages`.
    pub async fn set_page(&mut self, page: u32) {
        let target = page.clamp(1, self.total_pages);
        if target == self.page {
            return;
        }
        self.page = target;
        self.selected = 0;
        self.refresh().await;
    }

    /// Advance one page, saturating at the last page.
    pub async fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1)).await;
    }

    /// Go back one page, saturating at page 1.
    pub async fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1)).await;
    }

    // ============ Selection ============

    /// Move the selection down one row.
    pub fn select_next(&mut self) {
        if !self.records.is_empty() {
            self.selected = (self.selected + 1).min(self.records.len() - 1);
        }
    }

    /// Move the selection up one row.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Select the first row.
    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    /// Select the last row.
    pub fn select_last(&mut self) {
        self.selected = self.records.len().saturating_sub(1);
    }

    // ============ Editing ============

    /// Open an empty form for a new record.
    pub fn open_new(&mut self) {
        self.mode = ListMode::Editing(FormState::new(self.descriptor.clone()));
    }

    /// Open a form pre-filled from the selected record. No-op when the
    /// page is empty.
    pub fn open_edit(&mut self) {
        if let Some(record) = self.selected_record() {
            self.mode = ListMode::Editing(FormState::editing(self.descriptor.clone(), record));
        }
    }

    /// Close any open form or delete prompt without side effects.
    pub fn cancel(&mut self) {
        self.mode = ListMode::Browsing;
    }

    /// Validate and persist the open form.
    ///
    /// Validation failure returns [`SubmitOutcome::Invalid`] with the form
    /// still open and no network call made. A form carrying a record id
    /// issues an update, otherwise a create; on success the resource is
    /// invalidated, the list re-fetched, and the mode returns to browsing.
    /// A backend error propagates and leaves the form open for retry.
    pub async fn submit(&mut self) -> CoreResult<SubmitOutcome> {
        let ListMode::Editing(form) = &mut self.mode else {
            return Err(CoreError::NoActiveForm);
        };
        if !form.validate() {
            return Ok(SubmitOutcome::Invalid);
        }
        let fields = form.to_fields();
        let record_id = form.record_id().map(ToString::to_string);

        let saved = match record_id {
            Some(id) => self.client.update(&id, &fields).await?,
            None => self.client.create(&fields).await?,
        };

        self.cache.invalidate_resource(self.kind()).await;
        self.mode = ListMode::Browsing;
        self.refresh().await;
        Ok(SubmitOutcome::Saved(saved))
    }

    // ============ Deletion ============

    /// Ask for confirmation before deleting the selected record. No-op
    /// when the page is empty.
    pub fn request_delete(&mut self) {
        if let Some(record) = self.selected_record() {
            let label = record
                .field("name")
                .unwrap_or(record.id.as_str())
                .to_string();
            self.mode = ListMode::ConfirmingDelete(DeletePrompt {
                record_id: record.id.clone(),
                label,
            });
        }
    }

    /// Carry out the pending delete.
    ///
    /// Only reachable through [`request_delete`](Self::request_delete); a
    /// backend error propagates and leaves the prompt open.
    pub async fn confirm_delete(&mut self) -> CoreResult<()> {
        let ListMode::ConfirmingDelete(prompt) = &self.mode else {
            return Err(CoreError::NoDeletePrompt);
        };
        let id = prompt.record_id.clone();

        self.client.delete(&id).await?;

        self.cache.invalidate_resource(self.kind()).await;
        self.mode = ListMode::Browsing;
        self.refresh().await;
        Ok(())
    }

    // ============ Upload ============

    /// Upload a file as a new record (documents only).
    ///
    /// On success the resource is invalidated and the list re-fetched, the
    /// same as any other mutation.
    pub async fn upload(&mut self, request: &UploadRequest) -> CoreResult<Record> {
        let record = self.client.upload(request).await?;
        self.cache.invalidate_resource(self.kind()).await;
        self.refresh().await;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{seed_records, MemoryResourceClient};

    fn controller_with(client: Arc<MemoryResourceClient>, page_size: u32) -> ListController {
        ListController::new(client, Arc::new(QueryCache::new()), page_size)
    }

    fn many_deals(count: usize) -> Vec<Record> {
        (0..count)
            .map(|i| {
                Record::new(
                    format!("d{i}"),
                    [
                        ("name", format!("Deal {i}")),
                        ("type", "Merger".to_string()),
                        ("status", "Open".to_string()),
                        ("value", "$1M".to_string()),
                    ],
                )
            })
            .collect()
    }

    fn fill(form: &mut FormState, values: &[&str]) {
        for (i, v) in values.iter().enumerate() {
            form.focus = i;
            let field = form.focused_value_mut();
            field.clear();
            field.push_str(v);
        }
    }

    #[tokio::test]
    async fn refresh_loads_the_first_page() {
        let client = Arc::new(MemoryResourceClient::with_records(
            EntityKind::Deal,
            seed_records(EntityKind::Deal),
        ));
        let mut ctrl = controller_with(client, 10);
        ctrl.refresh().await;

        assert_eq!(ctrl.page(), 1);
        assert_eq!(ctrl.total_pages(), 1);
        assert_eq!(ctrl.records().len(), 3);
        assert!(ctrl.fetch_error().is_none());
    }

    #[tokio::test]
    async fn twenty_five_records_make_three_pages() {
        let client = Arc::new(MemoryResourceClient::with_records(
            EntityKind::Deal,
            many_deals(25),
        ));
        let mut ctrl = controller_with(client, 10);
        ctrl.refresh().await;

        assert_eq!(ctrl.total_pages(), 3);
        ctrl.set_page(3).await;
        assert_eq!(ctrl.records().len(), 5);
    }

    #[tokio::test]
    async fn set_page_clamps_to_last_page() {
        let client = Arc::new(MemoryResourceClient::with_records(
            EntityKind::Deal,
            many_deals(25),
        ));
        let mut ctrl = controller_with(client, 10);
        ctrl.refresh().await;

        ctrl.set_page(5).await;
        assert_eq!(ctrl.page(), 3);
        ctrl.set_page(0).await;
        assert_eq!(ctrl.page(), 1);
    }

    #[tokio::test]
    async fn refresh_clamps_when_the_data_set_shrinks() {
        let client = Arc::new(MemoryResourceClient::with_records(
            EntityKind::Deal,
            many_deals(25),
        ));
        let mut ctrl = controller_with(client.clone(), 10);
        ctrl.refresh().await;
        ctrl.set_page(3).await;

        // Most of the data disappears behind the controller's back.
        for i in 5..25 {
            let res = client.delete(&format!("d{i}")).await;
            assert!(res.is_ok(), "seed delete failed: {res:?}");
        }
        ctrl.cache.invalidate_resource(EntityKind::Deal).await;
        ctrl.refresh().await;

        assert_eq!(ctrl.page(), 1);
        assert_eq!(ctrl.total_pages(), 1);
        assert_eq!(ctrl.records().len(), 5);
    }

    #[tokio::test]
    async fn search_change_resets_to_page_one() {
        let client = Arc::new(MemoryResourceClient::with_records(
            EntityKind::Deal,
            many_deals(25),
        ));
        let mut ctrl = controller_with(client, 10);
        ctrl.refresh().await;
        ctrl.set_page(2).await;

        ctrl.set_search("Deal 1").await;
        assert_eq!(ctrl.page(), 1);
        assert_eq!(ctrl.search(), "Deal 1");
        // "Deal 1" matches Deal 1 and Deal 10..19.
        assert_eq!(ctrl.records().len(), 10);
    }

    #[tokio::test]
    async fn unchanged_search_keeps_the_page() {
        let client = Arc::new(MemoryResourceClient::with_records(
            EntityKind::Deal,
            many_deals(25),
        ));
        let mut ctrl = controller_with(client, 10);
        ctrl.refresh().await;
        ctrl.set_page(2).await;

        ctrl.set_search("").await;
        assert_eq!(ctrl.page(), 2);
    }

    #[tokio::test]
    async fn submit_without_a_form_is_an_error() {
        let client = Arc::new(MemoryResourceClient::new(EntityKind::Deal));
        let mut ctrl = controller_with(client, 10);
        let res = ctrl.submit().await;
        assert!(
            matches!(&res, Err(CoreError::NoActiveForm)),
            "unexpected result: {res:?}"
        );
    }

    #[tokio::test]
    async fn invalid_submit_makes_no_network_calls() {
        let client = Arc::new(MemoryResourceClient::new(EntityKind::Deal));
        let mut ctrl = controller_with(client.clone(), 10);
        ctrl.refresh().await;

        ctrl.open_new();
        let outcome = ctrl.submit().await;
        assert!(
            matches!(&outcome, Ok(SubmitOutcome::Invalid)),
            "unexpected outcome: {outcome:?}"
        );
        assert_eq!(client.counts().create(), 0);
        assert_eq!(client.counts().update(), 0);

        // The form stays open with one error per empty field.
        let Some(form) = ctrl.form_mut() else {
            unreachable!("form should still be open");
        };
        assert!(form.has_errors());
    }

    #[tokio::test]
    async fn create_is_visible_after_submit() {
        let client = Arc::new(MemoryResourceClient::new(EntityKind::Deal));
        let mut ctrl = controller_with(client.clone(), 10);
        ctrl.refresh().await;

        ctrl.open_new();
        if let Some(form) = ctrl.form_mut() {
            fill(form, &["Acme Acquisition", "Merger", "Open", "$10M"]);
        }
        let outcome = ctrl.submit().await;
        assert!(
            matches!(&outcome, Ok(SubmitOutcome::Saved(_))),
            "unexpected outcome: {outcome:?}"
        );

        assert!(matches!(ctrl.mode(), ListMode::Browsing));
        assert_eq!(client.counts().create(), 1);
        assert_eq!(ctrl.records().len(), 1);
        assert_eq!(ctrl.records()[0].field("name"), Some("Acme Acquisition"));
    }

    #[tokio::test]
    async fn edit_issues_one_update_then_refetches() {
        let client = Arc::new(MemoryResourceClient::with_records(
            EntityKind::Deal,
            seed_records(EntityKind::Deal),
        ));
        let mut ctrl = controller_with(client.clone(), 10);
        ctrl.refresh().await;
        let lists_before = client.counts().list();

        ctrl.select_first();
        ctrl.open_edit();
        if let Some(form) = ctrl.form_mut() {
            form.focus = 3;
            let value = form.focused_value_mut();
            value.clear();
            value.push_str("$12M");
        }
        let outcome = ctrl.submit().await;
        assert!(outcome.is_ok(), "submit failed: {outcome:?}");

        assert_eq!(client.counts().update(), 1);
        assert_eq!(client.counts().create(), 0);
        assert!(client.counts().list() > lists_before, "expected a re-fetch");
        assert_eq!(ctrl.records()[0].field("value"), Some("$12M"));
    }

    #[tokio::test]
    async fn failed_submit_keeps_the_form_open() {
        let client = Arc::new(MemoryResourceClient::new(EntityKind::Deal));
        let mut ctrl = controller_with(client.clone(), 10);
        ctrl.open_new();
        if let Some(form) = ctrl.form_mut() {
            fill(form, &["Acme", "Merger", "Open", "$1M"]);
        }
        client
            .fail_next(ApiError::ServerError {
                resource: "deals".to_string(),
                status: 500,
                detail: "boom".to_string(),
            })
            .await;

        let res = ctrl.submit().await;
        assert!(res.is_err(), "expected submit to fail");
        assert!(matches!(ctrl.mode(), ListMode::Editing(_)));
    }

    #[tokio::test]
    async fn delete_happens_only_after_confirmation() {
        let client = Arc::new(MemoryResourceClient::with_records(
            EntityKind::Deal,
            seed_records(EntityKind::Deal),
        ));
        let mut ctrl = controller_with(client.clone(), 10);
        ctrl.refresh().await;

        ctrl.select_first();
        ctrl.request_delete();
        let ListMode::ConfirmingDelete(prompt) = ctrl.mode() else {
            unreachable!("expected a delete prompt");
        };
        assert_eq!(prompt.label, "Acme Acquisition");

        // Declining leaves everything untouched.
        ctrl.cancel();
        assert_eq!(client.counts().delete(), 0);
        assert_eq!(ctrl.records().len(), 3);

        // Confirming deletes and re-fetches.
        ctrl.request_delete();
        let res = ctrl.confirm_delete().await;
        assert!(res.is_ok(), "delete failed: {res:?}");
        assert_eq!(client.counts().delete(), 1);
        assert_eq!(ctrl.records().len(), 2);
        assert!(matches!(ctrl.mode(), ListMode::Browsing));
    }

    #[tokio::test]
    async fn confirm_without_a_prompt_is_an_error() {
        let client = Arc::new(MemoryResourceClient::new(EntityKind::Deal));
        let mut ctrl = controller_with(client, 10);
        let res = ctrl.confirm_delete().await;
        assert!(
            matches!(&res, Err(CoreError::NoDeletePrompt)),
            "unexpected result: {res:?}"
        );
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_prompt_open() {
        let client = Arc::new(MemoryResourceClient::with_records(
            EntityKind::Deal,
            seed_records(EntityKind::Deal),
        ));
        let mut ctrl = controller_with(client.clone(), 10);
        ctrl.refresh().await;
        ctrl.request_delete();

        client
            .fail_next(ApiError::Timeout {
                resource: "deals".to_string(),
                detail: "deadline exceeded".to_string(),
            })
            .await;
        let res = ctrl.confirm_delete().await;
        assert!(res.is_err(), "expected delete to fail");
        assert!(matches!(ctrl.mode(), ListMode::ConfirmingDelete(_)));
        assert_eq!(ctrl.records().len(), 3);
    }

    #[tokio::test]
    async fn upload_adds_a_document_and_refetches() {
        let client = Arc::new(MemoryResourceClient::new(EntityKind::Document));
        let mut ctrl = controller_with(client.clone(), 10);
        ctrl.refresh().await;

        let req = UploadRequest {
            file_name: "pitch.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![0; 2048],
        };
        let res = ctrl.upload(&req).await;
        assert!(res.is_ok(), "upload failed: {res:?}");
        assert_eq!(ctrl.records().len(), 1);
        assert_eq!(ctrl.records()[0].field("name"), Some("pitch.pdf"));
    }

    #[tokio::test]
    async fn fetch_error_keeps_previous_records_visible() {
        let client = Arc::new(MemoryResourceClient::with_records(
            EntityKind::Deal,
            seed_records(EntityKind::Deal),
        ));
        let mut ctrl = controller_with(client.clone(), 10);
        ctrl.refresh().await;
        assert_eq!(ctrl.records().len(), 3);

        ctrl.cache.invalidate_resource(EntityKind::Deal).await;
        client
            .fail_next(ApiError::NetworkError {
                resource: "deals".to_string(),
                detail: "connection refused".to_string(),
            })
            .await;
        ctrl.refresh().await;

        assert!(ctrl.fetch_error().is_some());
        assert_eq!(ctrl.records().len(), 3, "stale rows must stay visible");
    }
}
