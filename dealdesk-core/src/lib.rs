//! Dealdesk Core Library
//!
//! Provides the platform-independent workflow behind the dashboard UI:
//! - Cached, de-duplicated list queries (Query Cache)
//! - Per-entity browse/edit/delete state machines (List Controller)
//! - Schema-validated form editing (Form State)
//!
//! The presentation layer (terminal, desktop, web) owns rendering and input
//! only; every state transition and every network call funnels through this
//! crate.

pub mod cache;
pub mod controller;
pub mod error;
pub mod form;
pub mod memory;
pub mod workspace;

// Re-export common types
pub use cache::{QueryCache, QueryKey, QueryState};
pub use controller::{DeletePrompt, ListController, ListMode, SubmitOutcome};
pub use error::{CoreError, CoreResult};
pub use form::FormState;
pub use memory::MemoryResourceClient;
pub use workspace::Workspace;
