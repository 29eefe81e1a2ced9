//! HTTP client for the clinic backend.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{CredentialProvider, NoCredentials, StaticToken};
use crate::config::ClientConfig;
use crate::error::ApiError;

/// Backend client.
///
/// Cheap to clone: the underlying `reqwest::Client` and the credential
/// provider are shared.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// Create a client for `base_url` using the given credential provider.
    pub fn new(base_url: &str, credentials: Arc<dyn CredentialProvider>) -> Result<Self, ApiError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: normalize_base(base_url)?,
            credentials,
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let credentials: Arc<dyn CredentialProvider> = match &config.api_token {
            Some(token) => Arc::new(StaticToken::new(token.clone())),
            None => Arc::new(NoCredentials),
        };

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: normalize_base(&config.api_url)?,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an API path against the base URL.
    ///
    /// Leading slashes are ignored so `/doctors/` stays under the base path.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Raw HTTP client, without credentials attached.
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Build an authenticated request for an API path.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.credentials.bearer_token() {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Send an API request and turn non-success statuses into
    /// [`ApiError::Status`]. A 401 tells the credential provider the
    /// session is gone.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.credentials.on_unauthorized();
        }
        check_status(response).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)?).await?;
        decode(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path)?.json(body))
            .await?;
        decode(response).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::PUT, path)?.json(body))
            .await?;
        decode(response).await
    }

    /// DELETE with an optional JSON body; the response body is ignored.
    pub async fn delete<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let mut builder = self.request(Method::DELETE, path)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder).await?;
        Ok(())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// Parse the base URL and make sure its path ends with `/` so joins append.
fn normalize_base(base_url: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Turn a non-success response into [`ApiError::Status`].
///
/// Does not involve the credential provider, so it is also used for
/// requests that carry their own authorization.
pub(crate) async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = loggable_url(response.url());
    let body = response.text().await.unwrap_or_default();
    let detail = error_detail(&body);
    warn!(
        status = status.as_u16(),
        url = %url,
        detail = detail.as_deref().unwrap_or(""),
        "request failed"
    );

    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

/// Drop the query string, which holds the signature on presigned URLs.
fn loggable_url(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_query(None);
    url
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    let value = serde_json::from_slice(&bytes)?;
    debug!(size = bytes.len(), "decoded backend response");
    Ok(value)
}

/// Pull `detail` out of an error body.
///
/// Handles both `{"detail": "message"}` and the validation form
/// `{"detail": [{"msg": "..."}, ...]}`.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
