//! Bridge between the synchronous UI loop and the async core.
//!
//! The UI thread owns a multi-threaded tokio runtime and blocks on core
//! futures. Every call the dashboard makes is a short request/response,
//! so blocking the draw loop for its duration is acceptable.

use anyhow::{Context, Result};
use tokio::runtime::Runtime;

use dealdesk_core::Workspace;

use crate::config::Config;

/// Owns the tokio runtime and the dealdesk workspace.
pub struct Backend {
    runtime: Runtime,
    workspace: Workspace,
}

impl Backend {
    /// Build the runtime and, depending on the config, an HTTP or an
    /// in-memory workspace.
    pub fn new(config: &Config) -> Result<Self> {
        let runtime = Runtime::new().context("failed to start async runtime")?;
        let workspace = match config.base_url.as_deref() {
            Some(base_url) => Workspace::http(base_url, config.api_token.clone())
                .context("failed to build HTTP clients")?,
            None => {
                log::info!("no baseUrl configured, using in-memory sample data");
                Workspace::in_memory()
            }
        };
        Ok(Self { runtime, workspace })
    }

    /// The workspace behind this backend.
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Run a core future to completion on the owned runtime.
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
