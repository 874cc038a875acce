//
//  azure-devops-rest
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Dispatch Client
//!
//! [`DevOpsClient`] is the single dispatch component every resource binding
//! goes through. For each call it:
//!
//! 1. builds the request from a [`RequestDescriptor`] (route template, query,
//!    API version, body),
//! 2. attaches the configured credential,
//! 3. hands the request to its [`Transport`] exactly once,
//! 4. maps 4xx/5xx statuses to [`ApiError::Api`],
//! 5. decodes the body, or returns the raw response when asked to.
//!
//! There is no retry, caching or shared mutable state. The client is
//! `Send + Sync` and can be shared across tasks; concurrent calls are
//! independent of each other.
//!
//! ## Example
//!
//! ```rust,no_run
//! use azure_devops_rest::api::{DevOpsClient, RequestDescriptor};
//! use azure_devops_rest::auth::AuthCredential;
//! use serde_json::Value;
//!
//! # async fn example() -> Result<(), azure_devops_rest::api::ApiError> {
//! let client = DevOpsClient::new("https://dev.azure.com/fabrikam")?
//!     .with_auth(AuthCredential::pat("my-pat"));
//!
//! let descriptor = RequestDescriptor::new("7.1", "_apis/projects/{projectId}")
//!     .route("projectId", "Fabrikam-Fiber");
//! let project: Value = client.request_json(&descriptor).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::AuthCredential;
use crate::config::ClientConfig;

use super::common::{ApiError, PagedList, CONTINUATION_TOKEN_PARAM};
use super::decode::{self, Decoded};
use super::request::{ApiVersionMode, BuiltRequest, RequestBuilder, RequestDescriptor};
use super::transport::{RawResponse, ReqwestTransport, Transport};

/// Upper bound on pages fetched by [`DevOpsClient::request_all`].
pub const MAX_PAGES: usize = 100;

/// The shared dispatch client.
#[derive(Clone)]
pub struct DevOpsClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
    builder: RequestBuilder,
    auth: Option<AuthCredential>,
}

impl std::fmt::Debug for DevOpsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevOpsClient")
            .field("base_url", &self.base_url.as_str())
            .field("version_mode", &self.builder.version_mode())
            .field("auth", &self.auth)
            .finish()
    }
}

/// Default `User-Agent` header value.
pub fn default_user_agent() -> String {
    format!("azdo/{}", crate::VERSION)
}

impl DevOpsClient {
    /// Creates a client for `organization_url` using the reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the URL does not parse and
    /// [`ApiError::Transport`] if the HTTP client cannot be created.
    pub fn new(organization_url: &str) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&default_user_agent(), None)?;
        Self::with_transport(organization_url, Arc::new(transport))
    }

    /// Creates a client that sends through `transport`.
    pub fn with_transport(
        organization_url: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(organization_url.trim()).map_err(|e| {
            ApiError::InvalidRequest(format!(
                "invalid organization URL '{organization_url}': {e}"
            ))
        })?;

        Ok(Self {
            transport,
            base_url,
            builder: RequestBuilder::default(),
            auth: None,
        })
    }

    /// Creates a client from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] when no organization URL is
    /// configured.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let organization_url = config.organization_url.as_deref().ok_or_else(|| {
            ApiError::InvalidRequest(
                "no organization URL configured (set AZDO_ORG_URL or run 'azdo config set organization_url <url>')"
                    .to_string(),
            )
        })?;

        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(default_user_agent);
        let transport = ReqwestTransport::new(&user_agent, config.timeout())?;

        Ok(Self::with_transport(organization_url, Arc::new(transport))?
            .with_api_version_mode(config.api_version_mode))
    }

    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_api_version_mode(mut self, mode: ApiVersionMode) -> Self {
        self.builder = RequestBuilder::new(mode);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the request for `descriptor` with credentials attached.
    pub fn build(&self, descriptor: &RequestDescriptor) -> Result<BuiltRequest, ApiError> {
        let mut request = self.builder.build(&self.base_url, descriptor)?;
        if let Some(auth) = &self.auth {
            auth.apply_to_headers(&mut request.headers)?;
        }
        Ok(request)
    }

    /// Issues one request and returns the raw response of a successful exchange.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Template`] / [`ApiError::InvalidRequest`] before any I/O
    /// - [`ApiError::Transport`] when the exchange fails
    /// - [`ApiError::Api`] for a 4xx/5xx status
    pub async fn send(&self, descriptor: &RequestDescriptor) -> Result<RawResponse, ApiError> {
        let request = self.build(descriptor)?;
        debug!("{} {}", request.method, request.url);

        let response = self.transport.send(request).await?;
        trace!(status = %response.status, headers = ?response.headers, "response received");

        if !response.status.is_client_error() && !response.status.is_server_error() {
            return Ok(response);
        }

        debug!("request failed with status {}", response.status);
        Err(ApiError::from_response(response.status, &response.body))
    }

    /// Sends `descriptor` and decodes according to its `raw_response` flag.
    pub async fn dispatch(&self, descriptor: &RequestDescriptor) -> Result<Decoded, ApiError> {
        let response = self.send(descriptor).await?;
        decode::decode(response, descriptor.raw_response)
    }

    /// Returns the undecoded response, e.g. to read custom headers.
    pub async fn request_raw(&self, descriptor: &RequestDescriptor) -> Result<RawResponse, ApiError> {
        self.send(descriptor).await
    }

    /// Sends `descriptor` and decodes the body into `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<T, ApiError> {
        let response = self.send(descriptor).await?;
        decode::decode_json(&response)
    }

    /// Sends `descriptor` and decodes one page of a list endpoint.
    pub async fn request_list<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<PagedList<T>, ApiError> {
        let response = self.send(descriptor).await?;
        decode::decode_list(&response)
    }

    /// Follows continuation tokens and returns every item.
    ///
    /// Each follow-up request is `descriptor` with `continuationToken` set to
    /// the previous page's token. Stops when a page has no token or after
    /// [`MAX_PAGES`] pages.
    pub async fn request_all<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut page = self.request_list::<T>(descriptor).await?;

        for fetched in 1.. {
            let token = page.continuation_token.take();
            items.extend(page.items);

            let Some(token) = token else {
                break;
            };
            if fetched >= MAX_PAGES {
                debug!("stopping after {} pages", MAX_PAGES);
                break;
            }

            let mut next = descriptor.clone();
            next.query.set(CONTINUATION_TOKEN_PARAM, token);
            page = self.request_list::<T>(&next).await?;
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, AUTHORIZATION};
    use reqwest::StatusCode;
    use std::sync::Mutex;

    /// Records every request and answers from a script.
    struct ScriptedTransport {
        responses: Mutex<Vec<RawResponse>>,
        seen: Mutex<Vec<BuiltRequest>>,
    }

    impl ScriptedTransport {
        fn new(mut responses: Vec<RawResponse>) -> Arc<Self> {
            responses.reverse();
            Arc::new(Self {
                responses: Mutex::new(responses),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: BuiltRequest) -> Result<RawResponse, ApiError> {
            self.seen.lock().unwrap().push(request);
            Ok(self.responses.lock().unwrap().pop().expect("no scripted response left"))
        }
    }

    fn page(body: &str, token: Option<&str>) -> RawResponse {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            headers.insert("x-ms-continuationtoken", token.parse().unwrap());
        }
        RawResponse::new(StatusCode::OK, headers, body)
    }

    #[test]
    fn test_not_found_is_api_error_without_retry() {
        let transport = ScriptedTransport::new(vec![RawResponse::new(
            StatusCode::NOT_FOUND,
            HeaderMap::new(),
            r#"{"message": "missing"}"#,
        )]);
        let client = DevOpsClient::with_transport("https://dev.azure.com/org", transport.clone()).unwrap();

        let result = tokio_test::block_on(
            client.request_json::<serde_json::Value>(&RequestDescriptor::new("7.1", "_apis/projects/{id}").route("id", "x")),
        );

        match result {
            Err(ApiError::Api { status, message, .. }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "missing");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(transport.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_template_error_skips_transport() {
        let transport = ScriptedTransport::new(vec![]);
        let client = DevOpsClient::with_transport("https://dev.azure.com/org", transport.clone()).unwrap();

        let result = tokio_test::block_on(client.send(&RequestDescriptor::new("7.1", "{*a}/{b}")));

        assert!(matches!(result, Err(ApiError::Template(_))));
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_auth_and_version_applied() {
        let transport = ScriptedTransport::new(vec![page("{}", None)]);
        let client = DevOpsClient::with_transport("https://dev.azure.com/org", transport.clone())
            .unwrap()
            .with_auth(AuthCredential::bearer("tok"))
            .with_api_version_mode(ApiVersionMode::Query);

        tokio_test::block_on(client.request_json::<serde_json::Value>(&RequestDescriptor::new("7.1", "_apis/connectionData")))
            .unwrap();

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].headers.get(AUTHORIZATION).unwrap(), "Bearer tok");
        assert_eq!(
            seen[0].url.as_str(),
            "https://dev.azure.com/org/_apis/connectionData?api-version=7.1"
        );
    }

    #[test]
    fn test_request_all_follows_tokens() {
        let transport = ScriptedTransport::new(vec![
            page(r#"{"count": 2, "value": [1, 2]}"#, Some("t1")),
            page(r#"{"count": 1, "value": [3]}"#, Some("t2")),
            page(r#"{"count": 0, "value": []}"#, None),
        ]);
        let client = DevOpsClient::with_transport("https://dev.azure.com/org", transport.clone()).unwrap();
        let descriptor = RequestDescriptor::new("7.1", "_apis/projects").query("$top", 2);

        let all: Vec<u32> = tokio_test::block_on(client.request_all(&descriptor)).unwrap();

        assert_eq!(all, vec![1, 2, 3]);
        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].url.query(), Some("%24top=2"));
        assert_eq!(seen[1].url.query(), Some("%24top=2&continuationToken=t1"));
        assert_eq!(seen[2].url.query(), Some("%24top=2&continuationToken=t2"));
    }

    #[test]
    fn test_request_all_stops_at_page_cap() {
        let responses = (0..MAX_PAGES + 5)
            .map(|i| page(&format!(r#"{{"count": 1, "value": [{i}]}}"#), Some("more")))
            .collect();
        let transport = ScriptedTransport::new(responses);
        let client = DevOpsClient::with_transport("https://dev.azure.com/org", transport.clone()).unwrap();

        let all: Vec<usize> =
            tokio_test::block_on(client.request_all(&RequestDescriptor::new("7.1", "_apis/projects"))).unwrap();

        assert_eq!(all.len(), MAX_PAGES);
        assert_eq!(all.last(), Some(&(MAX_PAGES - 1)));
        assert_eq!(transport.seen.lock().unwrap().len(), MAX_PAGES);
    }

    #[test]
    fn test_dispatch_raw_mode() {
        let transport = ScriptedTransport::new(vec![page("[\"a\"]", Some("abc123"))]);
        let client = DevOpsClient::with_transport("https://dev.azure.com/org", transport).unwrap();

        let decoded = tokio_test::block_on(client.dispatch(&RequestDescriptor::new("7.1", "_apis/x").raw())).unwrap();
        let raw = decoded.into_raw().unwrap();

        assert_eq!(decode::continuation_token(&raw).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_from_config_requires_organization() {
        let err = DevOpsClient::from_config(&ClientConfig::default()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
