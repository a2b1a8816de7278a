//! HTTP client for the dealership admin REST API.

use std::path::Path;
use std::time::Duration;

use reqwest::{multipart, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    query::Query,
    types::{ActionResult, BulkDeleteRequest, Entity, EntityId, ListResult},
    Error,
};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the dealership admin REST API.
///
/// Every entity is reached through the same verbs on its own sub-path:
/// `GET` list and by id, `POST` create, `PUT` update, `DELETE` single or bulk.
#[derive(Clone)]
pub struct Client {
    /// Base URL for the API, without a trailing slash.
    base_api_url: String,
    /// Bearer token attached to every request, when set.
    token: Option<String>,
    http: reqwest::Client,
}

impl Client {
    /// Creates a new client for the given base URL with the default timeout.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a new client with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed(e.to_string())
            })?;
        Ok(Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            http,
        })
    }

    /// Attaches a bearer token to every subsequent request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(format!("{}{}: {}", self.base_api_url, path, e))
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header("accept", "application/json, text/plain, */*");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, Error> {
        let resp = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::RequestFailed(e.to_string())
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed(e.to_string())
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Parse(e.to_string())
        })
    }

    /// Generic GET with query parameters.
    pub async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, Some(query))?;
        tracing::debug!("GET {}", url);
        self.execute(self.request(Method::GET, url)).await
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.get_url(path, None::<&crate::ListQuery>)?;
        tracing::debug!("{} {}", method, url);
        self.execute(self.request(method, url).json(body)).await
    }

    /// Fetches one page of `E` records.
    pub async fn list<E: Entity>(
        &self,
        query: &crate::ListQuery,
    ) -> Result<ListResult<E>, Error> {
        self.get_json::<ListResult<E>, _>(E::PATH, query).await
    }

    /// Fetches a single record by id.
    pub async fn get_by_id<E: Entity>(&self, id: EntityId) -> Result<ActionResult<E>, Error> {
        let url = self.get_url(&format!("{}/{}", E::PATH, id), None::<&crate::ListQuery>)?;
        tracing::debug!("GET {}", url);
        self.execute(self.request(Method::GET, url)).await
    }

    /// Creates a record.
    pub async fn create<E: Entity>(&self, input: &E::Input) -> Result<ActionResult<E>, Error> {
        self.send_json(Method::POST, E::PATH, input).await
    }

    /// Replaces a record.
    pub async fn update<E: Entity>(
        &self,
        id: EntityId,
        input: &E::Input,
    ) -> Result<ActionResult<E>, Error> {
        self.send_json(Method::PUT, &format!("{}/{}", E::PATH, id), input)
            .await
    }

    /// Deletes a single record.
    pub async fn delete<E: Entity>(
        &self,
        id: EntityId,
    ) -> Result<ActionResult<serde_json::Value>, Error> {
        let url = self.get_url(&format!("{}/{}", E::PATH, id), None::<&crate::ListQuery>)?;
        tracing::debug!("DELETE {}", url);
        self.execute(self.request(Method::DELETE, url)).await
    }

    /// Deletes every listed record in one request.
    pub async fn bulk_delete<E: Entity>(
        &self,
        ids: &[EntityId],
    ) -> Result<ActionResult<serde_json::Value>, Error> {
        let body = BulkDeleteRequest { ids: ids.to_vec() };
        self.send_json(Method::DELETE, E::PATH, &body).await
    }

    /// Uploads a file as multipart form data under the `file` field.
    pub async fn upload(
        &self,
        endpoint: &str,
        file: &Path,
    ) -> Result<ActionResult<serde_json::Value>, Error> {
        let bytes = tokio::fs::read(file).await.map_err(|e| Error::File {
            path: file.display().to_string(),
            reason: e.to_string(),
        })?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let form = multipart::Form::new()
            .part("file", multipart::Part::bytes(bytes).file_name(file_name));

        let url = self.get_url(endpoint, None::<&crate::ListQuery>)?;
        tracing::debug!("POST {} (multipart)", url);
        self.execute(self.request(Method::POST, url).multipart(form))
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
