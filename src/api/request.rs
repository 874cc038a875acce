//
//  azure-devops-rest
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Descriptors and the Request Builder
//!
//! A [`RequestDescriptor`] is the unit of work for one API call: API version,
//! HTTP method, route template, route values, query parameters and an
//! optional JSON body. The [`RequestBuilder`] turns it into a [`BuiltRequest`]
//! (absolute URL, headers, serialized body) without performing any I/O.
//!
//! ## Query Values
//!
//! | Value | Rendered as |
//! |-------|-------------|
//! | string | as-is |
//! | number / bool | `to_string()` |
//! | list | elements rendered, joined with `,` |
//! | JSON object | `serde_json::to_string` |
//!
//! Parameter names are kept verbatim, so OData-style names such as `$top`
//! reach the service unchanged (encoded as `%24top` on the wire).
//!
//! ## Example
//!
//! ```rust
//! use azure_devops_rest::api::request::{ApiVersionMode, RequestBuilder, RequestDescriptor};
//! use url::Url;
//!
//! let descriptor = RequestDescriptor::new("7.1", "_apis/projects/{projectId}")
//!     .query("$top", 50)
//!     .query_opt("$skip", None::<u32>);
//!
//! let base = Url::parse("https://dev.azure.com/fabrikam/").unwrap();
//! let built = RequestBuilder::new(ApiVersionMode::Header).build(&base, &descriptor).unwrap();
//!
//! assert_eq!(built.url.as_str(), "https://dev.azure.com/fabrikam/_apis/projects?%24top=50");
//! ```

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::common::ApiError;
use super::route::{RouteTemplate, RouteValues};

/// Media type for JSON bodies and responses.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Media type for JSON Patch documents (work items, feature flags).
pub const JSON_PATCH_MEDIA_TYPE: &str = "application/json-patch+json";

/// How the API version is communicated to the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersionMode {
    /// `Accept: application/json;api-version=<v>`
    #[default]
    Header,
    /// `?api-version=<v>` with a plain `Accept: application/json`
    Query,
}

impl std::str::FromStr for ApiVersionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "header" => Ok(Self::Header),
            "query" => Ok(Self::Query),
            other => Err(format!(
                "invalid api version mode '{other}'. Valid values: header, query"
            )),
        }
    }
}

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    List(Vec<QueryValue>),
    Json(Value),
}

impl QueryValue {
    /// Renders the value as it appears in the query string, before encoding.
    pub fn render(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::List(items) => items
                .iter()
                .map(QueryValue::render)
                .collect::<Vec<_>>()
                .join(","),
            Self::Json(Value::String(s)) => s.clone(),
            Self::Json(value) => value.to_string(),
        }
    }

    /// Converts a JSON value; `null` has no query representation.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::String(s)),
            Value::Number(n) => Some(Self::Number(n)),
            Value::Bool(b) => Some(Self::Bool(b)),
            Value::Array(items) => Some(Self::List(
                items.into_iter().filter_map(Self::from_json).collect(),
            )),
            object @ Value::Object(_) => Some(Self::Json(object)),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Self::Number)
            .unwrap_or_else(|| Self::String(value.to_string()))
    }
}

macro_rules! query_value_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    Self::Number(serde_json::Number::from(value))
                }
            }
        )*
    };
}

query_value_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// JSON `null` converts to `Json(Null)`, which [`QueryParams`] stores as absent.
impl From<Value> for QueryValue {
    fn from(value: Value) -> Self {
        Self::from_json(value).unwrap_or(Self::Json(Value::Null))
    }
}

/// Ordered query parameters.
///
/// Insertion order is the order on the wire. Entries pushed as `None` or as
/// JSON `null` are kept in the list but never rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    params: Vec<(String, Option<QueryValue>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<QueryValue>) {
        self.push_opt(name, Some(value));
    }

    pub fn push_opt<V: Into<QueryValue>>(&mut self, name: impl Into<String>, value: Option<V>) {
        let value = value
            .map(Into::into)
            .filter(|v| !matches!(v, QueryValue::Json(Value::Null)));
        self.params.push((name.into(), value));
    }

    /// Replaces every entry named `name` with a single value.
    pub fn set(&mut self, name: &str, value: impl Into<QueryValue>) {
        self.params.retain(|(n, _)| n != name);
        self.push(name, value);
    }

    /// Name/value pairs that will be sent, in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, String)> {
        self.params
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name.as_str(), v.render())))
    }

    pub fn is_empty(&self) -> bool {
        self.params.iter().all(|(_, v)| v.is_none())
    }
}

/// Everything needed to issue one API call.
///
/// Built fresh per call and borrowed by the client; nothing is retained after
/// the call completes.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub api_version: String,
    pub method: Method,
    pub route_template: String,
    pub route_values: RouteValues,
    pub query: QueryParams,
    pub body: Option<Value>,
    pub content_type: String,
    pub headers: Vec<(String, String)>,
    /// Return the undecoded response instead of parsed JSON.
    pub raw_response: bool,
}

impl RequestDescriptor {
    /// A `GET` request for `route_template` pinned to `api_version`.
    pub fn new(api_version: impl Into<String>, route_template: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            method: Method::GET,
            route_template: route_template.into(),
            route_values: RouteValues::new(),
            query: QueryParams::new(),
            body: None,
            content_type: JSON_MEDIA_TYPE.to_string(),
            headers: Vec::new(),
            raw_response: false,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn route(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.route_values.insert(name, value);
        self
    }

    pub fn route_opt<V: ToString>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.route_values.insert(name, value);
        }
        self
    }

    pub fn route_values(mut self, values: RouteValues) -> Self {
        self.route_values = values;
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push(name, value);
        self
    }

    pub fn query_opt<V: Into<QueryValue>>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        self.query.push_opt(name, value);
        self
    }

    /// Attaches a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("body serialization failed: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn body_value(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Requests the raw response (used to read custom headers).
    pub fn raw(mut self) -> Self {
        self.raw_response = true;
        self
    }
}

/// A fully assembled HTTP request, ready for a transport.
#[derive(Debug, Clone)]
pub struct BuiltRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Turns descriptors into [`BuiltRequest`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBuilder {
    version_mode: ApiVersionMode,
}

impl RequestBuilder {
    pub fn new(version_mode: ApiVersionMode) -> Self {
        Self { version_mode }
    }

    pub fn version_mode(&self) -> ApiVersionMode {
        self.version_mode
    }

    /// Assembles the request for `descriptor` against `base_url`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Template`] for a malformed route template or a dot-segment route value
    /// - [`ApiError::InvalidRequest`] for an unusable URL, header or body
    pub fn build(
        &self,
        base_url: &Url,
        descriptor: &RequestDescriptor,
    ) -> Result<BuiltRequest, ApiError> {
        let template = RouteTemplate::parse(&descriptor.route_template)?;
        let path = template.render(&descriptor.route_values)?;

        let joined = format!(
            "{}/{}",
            base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid URL '{joined}': {e}")))?;

        let mut pairs: Vec<(&str, String)> = descriptor.query.pairs().collect();
        if self.version_mode == ApiVersionMode::Query {
            pairs.push(("api-version", descriptor.api_version.clone()));
        }
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (name, value) in &pairs {
                query.append_pair(name, value);
            }
        }

        let mut headers = HeaderMap::new();
        let accept = match self.version_mode {
            ApiVersionMode::Header => {
                format!("{JSON_MEDIA_TYPE};api-version={}", descriptor.api_version)
            }
            ApiVersionMode::Query => JSON_MEDIA_TYPE.to_string(),
        };
        headers.insert(ACCEPT, header_value(&accept)?);

        let body = match &descriptor.body {
            Some(value) => {
                headers.insert(CONTENT_TYPE, header_value(&descriptor.content_type)?);
                Some(serde_json::to_vec(value).map_err(|e| {
                    ApiError::InvalidRequest(format!("body serialization failed: {e}"))
                })?)
            }
            None => None,
        };

        for (name, value) in &descriptor.headers {
            let name = HeaderName::from_bytes(name.trim().as_bytes())
                .map_err(|e| ApiError::InvalidRequest(format!("invalid header name '{name}': {e}")))?;
            headers.append(name, header_value(value.trim())?);
        }

        Ok(BuiltRequest {
            method: descriptor.method.clone(),
            url,
            headers,
            body,
        })
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value)
        .map_err(|e| ApiError::InvalidRequest(format!("invalid header value '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Url {
        Url::parse("https://dev.azure.com/fabrikam").unwrap()
    }

    #[test]
    fn test_null_values_are_skipped() {
        let descriptor = RequestDescriptor::new("7.1", "_apis/projects")
            .query_opt("stateFilter", None::<String>)
            .query("$top", 50)
            .query_opt("$skip", None::<u32>)
            .query("getDefaultTeamImageUrl", true);

        let built = RequestBuilder::default().build(&base(), &descriptor).unwrap();
        let query = built.url.query().unwrap();

        assert_eq!(query, "%24top=50&getDefaultTeamImageUrl=true");
        assert!(!query.contains("stateFilter"));
        assert!(!query.contains("skip"));
    }

    #[test]
    fn test_json_null_values_are_skipped() {
        let descriptor = RequestDescriptor::new("7.1", "_apis/projects")
            .query("stateFilter", Value::Null)
            .query("$top", 5)
            .query_opt("continuationToken", Some(json!(null)));

        let built = RequestBuilder::default().build(&base(), &descriptor).unwrap();
        assert_eq!(built.url.query(), Some("%24top=5"));
        assert!(descriptor.query.pairs().all(|(name, _)| name == "$top"));
    }

    #[test]
    fn test_query_round_trip() {
        let descriptor = RequestDescriptor::new("7.1", "{project}/_apis/policy/configurations")
            .route("project", "P")
            .query("$top", 50)
            .query("scope", "refs/heads/main & more")
            .query("ids", vec![1, 2, 3])
            .query("searchCriteria", json!({"status": "active", "top": 5}));

        let built = RequestBuilder::default().build(&base(), &descriptor).unwrap();
        let decoded: Vec<(String, String)> = built.url.query_pairs().into_owned().collect();

        assert_eq!(
            decoded,
            vec![
                ("$top".to_string(), "50".to_string()),
                ("scope".to_string(), "refs/heads/main & more".to_string()),
                ("ids".to_string(), "1,2,3".to_string()),
                (
                    "searchCriteria".to_string(),
                    r#"{"status":"active","top":5}"#.to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_api_version_in_accept_header() {
        let descriptor = RequestDescriptor::new("7.1-preview.2", "_apis/FeatureFlags");
        let built = RequestBuilder::new(ApiVersionMode::Header)
            .build(&base(), &descriptor)
            .unwrap();

        assert_eq!(
            built.headers.get(ACCEPT).unwrap(),
            "application/json;api-version=7.1-preview.2"
        );
        assert_eq!(built.url.query(), None);
        assert_eq!(built.url.as_str(), "https://dev.azure.com/fabrikam/_apis/FeatureFlags");
    }

    #[test]
    fn test_api_version_in_query() {
        let descriptor = RequestDescriptor::new("7.1", "_apis/projects").query("$top", 1);
        let built = RequestBuilder::new(ApiVersionMode::Query)
            .build(&base(), &descriptor)
            .unwrap();

        assert_eq!(built.url.query(), Some("%24top=1&api-version=7.1"));
        assert_eq!(built.headers.get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn test_body_sets_content_type() {
        let descriptor = RequestDescriptor::new("7.1", "_apis/FeatureFlags/{name}")
            .method(Method::PATCH)
            .route("name", "my.feature")
            .json(&json!({"state": "on"}))
            .unwrap();

        let built = RequestBuilder::default().build(&base(), &descriptor).unwrap();

        assert_eq!(built.method, Method::PATCH);
        assert_eq!(built.headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(built.body.as_deref(), Some(br#"{"state":"on"}"#.as_slice()));
    }

    #[test]
    fn test_no_body_no_content_type() {
        let built = RequestBuilder::default()
            .build(&base(), &RequestDescriptor::new("7.1", "_apis/projects"))
            .unwrap();
        assert!(built.headers.get(CONTENT_TYPE).is_none());
        assert!(built.body.is_none());
        assert_eq!(built.method, Method::GET);
    }

    #[test]
    fn test_bad_template_fails_before_io() {
        let descriptor = RequestDescriptor::new("7.1", "{*path}/_apis/{id}");
        let err = RequestBuilder::default().build(&base(), &descriptor).unwrap_err();
        assert!(matches!(err, ApiError::Template(_)));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let descriptor = RequestDescriptor::new("7.1", "_apis/projects").header("bad header", "x");
        let err = RequestBuilder::default().build(&base(), &descriptor).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn test_wildcard_tail_joined_onto_base() {
        let descriptor = RequestDescriptor::new(
            "7.1",
            "{project}/_apis/wit/classificationnodes/{structureGroup}/{*path}",
        )
        .route("project", "P")
        .route("structureGroup", "areas")
        .route("path", "Team A/Sub");

        let built = RequestBuilder::default().build(&base(), &descriptor).unwrap();
        assert_eq!(
            built.url.path(),
            "/fabrikam/P/_apis/wit/classificationnodes/areas/Team%20A/Sub"
        );
    }

    #[test]
    fn test_wildcard_special_characters_stay_in_path() {
        let descriptor = RequestDescriptor::new("7.1", "{project}/_apis/git/items/{*path}")
            .route("project", "P")
            .route("path", "docs/C#/what?.md")
            .query("$top", 1);

        let built = RequestBuilder::default().build(&base(), &descriptor).unwrap();
        assert_eq!(built.url.path(), "/fabrikam/P/_apis/git/items/docs/C%23/what%3F.md");
        assert_eq!(built.url.query(), Some("%24top=1"));
        assert_eq!(built.url.fragment(), None);
    }

    #[test]
    fn test_wildcard_dot_segments_fail_before_io() {
        let descriptor = RequestDescriptor::new("7.1", "{project}/_apis/git/items/{*path}")
            .route("project", "P")
            .route("path", "docs/../../secret");

        let err = RequestBuilder::default().build(&base(), &descriptor).unwrap_err();
        assert!(matches!(err, ApiError::Template(_)));
    }

    #[test]
    fn test_query_value_rendering() {
        assert_eq!(QueryValue::from(vec!["a", "b"]).render(), "a,b");
        assert_eq!(QueryValue::from(2.5).render(), "2.5");
        assert_eq!(QueryValue::from(json!("x")).render(), "x");
        assert_eq!(QueryValue::from_json(json!(null)), None);
        assert_eq!(QueryValue::from(json!({"a": [1]})).render(), r#"{"a":[1]}"#);
    }
}
