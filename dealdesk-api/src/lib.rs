//! # dealdesk-api
//!
//! REST resource client for the dealdesk backend.
//!
//! Every business entity the dashboard manages (deals, documents,
//! prospects) is a [`Record`]: an identifier plus a flat map of named
//! string fields. Each entity kind declares its field list through an
//! [`EntityDescriptor`], which drives both form rendering and the
//! required-field validation in [`schema`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dealdesk_api::{EntityKind, HttpResourceClient, ListQuery, ResourceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpResourceClient::new(
//!         EntityKind::Deal,
//!         "https://api.example.com",
//!         Some("token".to_string()),
//!     )?;
//!
//!     let page = client.list(&ListQuery::default()).await?;
//!     for record in &page.records {
//!         println!("{} {}", record.id, record.field("name").unwrap_or("-"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ApiError>`](ApiError). Failures are
//! terminal for that attempt: there is no automatic retry, the caller
//! decides whether to re-issue the request.

mod client;
mod error;
mod http;
mod record;
pub mod schema;
mod types;

pub use client::{ResourceClient, UploadRequest};
pub use error::{ApiError, Result};
pub use http::HttpResourceClient;
pub use record::{Record, RecordFields};
pub use types::{EntityDescriptor, EntityKind, FieldSpec, ListQuery, RecordPage};
