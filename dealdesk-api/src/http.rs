//! HTTP implementation of [`ResourceClient`] over the dealdesk REST API.
//!
//! One client instance serves one resource under `{base}/api/{resource}`:
//!
//! - `GET    /api/{resource}?page=&pageSize=&search=` paged list
//! - `GET    /api/{resource}/{id}`                    single record
//! - `POST   /api/{resource}`                         create
//! - `PUT    /api/{resource}/{id}`                    update
//! - `DELETE /api/{resource}/{id}`                    delete
//! - `POST   /api/{resource}/upload`                  multipart upload

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::{ResourceClient, UploadRequest};
use crate::error::{ApiError, Result};
use crate::record::{Record, RecordFields};
use crate::types::{EntityKind, ListQuery, RecordPage};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wire shape of a list response.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListEnvelope {
    records: Vec<Record>,
    total_pages: u32,
}

/// `reqwest`-backed [`ResourceClient`] with optional bearer-token auth.
pub struct HttpResourceClient {
    kind: EntityKind,
    base_url: String,
    api_token: Option<String>,
    http: reqwest::Client,
}

impl HttpResourceClient {
    /// Create a client for one resource.
    ///
    /// `base_url` is the backend origin without a trailing slash
    /// (e.g. `"https://api.example.com"`).
    pub fn new(
        kind: EntityKind,
        base_url: impl Into<String>,
        api_token: Option<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::NetworkError {
                resource: kind.descriptor().path.to_string(),
                detail: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            kind,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token,
            http,
        })
    }

    fn resource(&self) -> &'static str {
        self.kind.descriptor().path
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/api/{}{}", self.base_url, self.resource(), suffix)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and return `(status, body)`, mapping transport
    /// failures to [`ApiError::Timeout`] / [`ApiError::NetworkError`].
    async fn execute(&self, builder: RequestBuilder, action: &str) -> Result<(StatusCode, String)> {
        let resource = self.resource();
        log::debug!("[{resource}] {action}");

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    resource: resource.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ApiError::NetworkError {
                    resource: resource.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        log::debug!("[{resource}] {action} -> HTTP {}", status.as_u16());

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkError {
                resource: resource.to_string(),
                detail: format!("failed to read response body: {e}"),
            })?;

        Ok((status, body))
    }

    /// Map a non-success status to an [`ApiError`]. `id` names the record
    /// for 404 reporting, when the request targets one.
    fn triage(&self, status: StatusCode, body: String, id: Option<&str>) -> ApiError {
        let resource = self.resource().to_string();
        let raw = if body.is_empty() { None } else { Some(body.clone()) };
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized {
                resource,
                raw_message: raw,
            },
            StatusCode::NOT_FOUND => ApiError::NotFound {
                resource,
                id: id.unwrap_or("<unknown>").to_string(),
                raw_message: raw,
            },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::InvalidRequest {
                    resource,
                    detail: body,
                }
            }
            // Anything else (5xx, unexpected 3xx) is reported with its status.
            s => ApiError::ServerError {
                resource,
                status: s.as_u16(),
                detail: body,
            },
        }
    }

    fn parse_json<T: DeserializeOwned>(&self, body: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|e| {
            log::error!("[{}] JSON parse failed: {e}", self.resource());
            ApiError::ParseError {
                resource: self.resource().to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Execute, triage the status, and decode the body as JSON.
    async fn execute_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        action: &str,
        id: Option<&str>,
    ) -> Result<T> {
        let (status, body) = self.execute(builder, action).await?;
        if !status.is_success() {
            return Err(self.triage(status, body, id));
        }
        self.parse_json(&body)
    }
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    async fn list(&self, query: &ListQuery) -> Result<RecordPage> {
        let mut url = format!(
            "{}?page={}&pageSize={}",
            self.url(""),
            query.page,
            query.page_size
        );
        if let Some(search) = query.search.as_deref() {
            if !search.is_empty() {
                url.push_str(&format!("&search={}", urlencoding::encode(search)));
            }
        }

        let envelope: ListEnvelope = self
            .execute_json(self.request(Method::GET, &url), "GET list", None)
            .await?;

        Ok(RecordPage {
            records: envelope.records,
            page: query.page,
            page_size: query.page_size,
            total_pages: envelope.total_pages.max(1),
        })
    }

    async fn get(&self, id: &str) -> Result<Record> {
        let url = self.url(&format!("/{id}"));
        self.execute_json(self.request(Method::GET, &url), "GET record", Some(id))
            .await
    }

    async fn create(&self, fields: &RecordFields) -> Result<Record> {
        let url = self.url("");
        let builder = self.request(Method::POST, &url).json(fields);
        self.execute_json(builder, "POST create", None).await
    }

    async fn update(&self, id: &str, fields: &RecordFields) -> Result<Record> {
        let url = self.url(&format!("/{id}"));
        let builder = self.request(Method::PUT, &url).json(fields);
        self.execute_json(builder, "PUT update", Some(id)).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.url(&format!("/{id}"));
        let (status, body) = self
            .execute(self.request(Method::DELETE, &url), "DELETE record")
            .await?;
        if !status.is_success() {
            return Err(self.triage(status, body, Some(id)));
        }
        Ok(())
    }

    async fn upload(&self, request: &UploadRequest) -> Result<Record> {
        if !self.kind.descriptor().supports_upload {
            return Err(ApiError::UploadUnsupported {
                resource: self.resource().to_string(),
            });
        }

        let part = reqwest::multipart::Part::bytes(request.bytes.clone())
            .file_name(request.file_name.clone())
            .mime_str(&request.content_type)
            .map_err(|e| ApiError::SerializationError {
                resource: self.resource().to_string(),
                detail: format!("invalid content type '{}': {e}", request.content_type),
            })?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = self.url("/upload");
        let builder = self.request(Method::POST, &url).multipart(form);
        self.execute_json(builder, "POST upload", None).await
    }
}
