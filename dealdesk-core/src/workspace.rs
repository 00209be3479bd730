//! Workspace: shared cache plus one client per entity.

use std::collections::HashMap;
use std::sync::Arc;

use dealdesk_api::{EntityKind, HttpResourceClient, ResourceClient};

use crate::cache::QueryCache;
use crate::controller::ListController;
use crate::error::{CoreError, CoreResult};
use crate::memory::{seed_records, MemoryResourceClient};

/// Owns the query cache and the per-entity resource clients.
///
/// Built once at application start; the UI asks it for a
/// [`ListController`] per entity page. All controllers share the one
/// cache, so a mutation on any page invalidates consistently.
pub struct Workspace {
    cache: Arc<QueryCache>,
    clients: HashMap<EntityKind, Arc<dyn ResourceClient>>,
}

impl Workspace {
    /// Assemble a workspace from pre-built clients.
    pub fn new(clients: impl IntoIterator<Item = Arc<dyn ResourceClient>>) -> Self {
        Self {
            cache: Arc::new(QueryCache::new()),
            clients: clients.into_iter().map(|c| (c.kind(), c)).collect(),
        }
    }

    /// Workspace talking to a REST backend, one HTTP client per entity.
    pub fn http(base_url: &str, api_token: Option<String>) -> CoreResult<Self> {
        let mut clients: Vec<Arc<dyn ResourceClient>> = Vec::new();
        for kind in EntityKind::ALL {
            let client = HttpResourceClient::new(kind, base_url, api_token.clone())?;
            clients.push(Arc::new(client));
        }
        Ok(Self::new(clients))
    }

    /// Offline workspace backed by in-memory stores with seed data.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(EntityKind::ALL.map(|kind| {
            Arc::new(MemoryResourceClient::with_records(kind, seed_records(kind)))
                as Arc<dyn ResourceClient>
        }))
    }

    /// The shared query cache.
    #[must_use]
    pub fn cache(&self) -> Arc<QueryCache> {
        Arc::clone(&self.cache)
    }

    /// Client registered for `kind`.
    pub fn client(&self, kind: EntityKind) -> CoreResult<Arc<dyn ResourceClient>> {
        self.clients
            .get(&kind)
            .cloned()
            .ok_or(CoreError::ClientMissing(kind))
    }

    /// Build a list controller for one entity page.
    pub fn controller(&self, kind: EntityKind, page_size: u32) -> CoreResult<ListController> {
        let client = self.client(kind)?;
        Ok(ListController::new(client, self.cache(), page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_workspace_serves_all_entities() {
        let workspace = Workspace::in_memory();
        for kind in EntityKind::ALL {
            let ctrl = workspace.controller(kind, 10);
            assert!(ctrl.is_ok(), "missing client for {kind}");
            let Ok(mut ctrl) = ctrl else {
                return;
            };
            ctrl.refresh().await;
            assert!(!ctrl.records().is_empty(), "no seed data for {kind}");
        }
    }

    #[tokio::test]
    async fn missing_client_is_reported() {
        let workspace = Workspace::new(std::iter::empty());
        let res = workspace.controller(EntityKind::Deal, 10);
        assert!(
            matches!(&res, Err(CoreError::ClientMissing(EntityKind::Deal))),
            "unexpected result: {:?}",
            res.err()
        );
    }

    #[tokio::test]
    async fn controllers_share_one_cache() {
        let workspace = Workspace::in_memory();
        let cache = workspace.cache();
        let v0 = cache.version();

        let Ok(mut ctrl) = workspace.controller(EntityKind::Deal, 10) else {
            unreachable!("deal client is registered");
        };
        ctrl.refresh().await;
        assert!(cache.version() > v0);
    }
}
