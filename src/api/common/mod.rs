//
//  azure-devops-rest
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Azure DevOps REST surface
//!
//! This module provides the types shared by every resource binding: the
//! error taxonomy, the paged list wrapper and the opaque JSON container used
//! for loosely typed payload fields.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all dispatch operations
//! - [`PagedList`] - A decoded list plus its out-of-band continuation token
//! - [`CollectionEnvelope`] - The service's `{ "count", "value" }` list wrapper
//! - [`OpaqueJson`] - A JSON value whose shape is decided by the caller
//!
//! # Example
//!
//! ```rust
//! use azure_devops_rest::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(e) if e.is_not_found() => println!("Nothing there"),
//!         Err(ApiError::Transport(e)) => println!("Network trouble: {}", e),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Unified error type for all dispatch operations.
///
/// None of these variants are recovered by the client itself: retry,
/// backoff and circuit breaking belong to the caller.
///
/// # Variants
///
/// | Variant | Raised when | Before I/O |
/// |---------|-------------|------------|
/// | `Template` | Route template is malformed | Yes |
/// | `InvalidRequest` | Header, body or base URL cannot be built | Yes |
/// | `Transport` | The HTTP exchange could not complete | No |
/// | `Api` | The exchange completed with a 4xx/5xx status | No |
/// | `Decode` | A success body is not valid JSON for the target type | No |
#[derive(Error, Debug)]
pub enum ApiError {
    /// The route template is malformed (unbalanced braces, empty placeholder
    /// name, or a wildcard that is not the final segment), or a route value
    /// would render as a `.` / `..` segment.
    #[error("Invalid route template: {0}")]
    Template(String),

    /// The request could not be assembled from its descriptor.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The underlying HTTP transport failed (connection, DNS, TLS, timeout).
    ///
    /// The `reqwest::Error` is carried unmodified.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a failure status.
    ///
    /// # Fields
    ///
    /// * `status` - The HTTP status code
    /// * `message` - Message extracted from the error payload, or the raw body
    /// * `body` - The error payload, when it was valid JSON
    #[error("API error ({status}): {message}")]
    Api {
        status: StatusCode,
        message: String,
        body: Option<Value>,
    },

    /// A success response whose body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds an [`ApiError::Api`] from a failed response.
    ///
    /// The service reports failures as:
    /// ```json
    /// {"$id": "1", "message": "TF200016: ...", "typeKey": "ProjectDoesNotExistException", "errorCode": 0}
    /// ```
    ///
    /// Some gateway errors use `{"error": {"message": "..."}}` or
    /// `{"errors": [{"message": "..."}]}` instead; both are recognised.
    /// If nothing matches, the raw body becomes the message.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let json = serde_json::from_slice::<Value>(body).ok();

        let message = json
            .as_ref()
            .and_then(extract_error_message)
            .unwrap_or_else(|| {
                if text.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    text.trim().to_string()
                }
            });

        Self::Api {
            status,
            message,
            body: json,
        }
    }

    /// Returns the HTTP status for [`ApiError::Api`], or the transport's
    /// status when reqwest recorded one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Returns `true` for a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// The service's exception type key (e.g. `ProjectDoesNotExistException`),
    /// when the error payload carried one.
    pub fn type_key(&self) -> Option<&str> {
        match self {
            Self::Api {
                body: Some(body), ..
            } => body.get("typeKey").and_then(Value::as_str),
            _ => None,
        }
    }
}

fn extract_error_message(json: &Value) -> Option<String> {
    // Service format: {"message": "...", "typeKey": "..."}
    if let Some(message) = json.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    // Gateway format: {"error": {"message": "..."}}
    if let Some(message) = json
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
    {
        return Some(message.to_string());
    }

    // Validation format: {"errors": [{"message": "..."}]}
    json.get("errors")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// A JSON value whose shape is not fixed by the API contract.
///
/// Several resources carry property bags (account `properties`, profile
/// attribute containers, classification node `attributes`). They are kept
/// as raw JSON and decoded on demand with [`OpaqueJson::deserialize_as`].
///
/// # Example
///
/// ```rust
/// use azure_devops_rest::api::common::OpaqueJson;
/// use std::collections::HashMap;
///
/// let bag: OpaqueJson = serde_json::from_str(r#"{"region": "westeurope"}"#).unwrap();
/// let map: HashMap<String, String> = bag.deserialize_as().unwrap();
/// assert_eq!(map["region"], "westeurope");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpaqueJson(pub Value);

impl OpaqueJson {
    /// Decodes the value into a caller-chosen type.
    pub fn deserialize_as<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_value(self.0.clone()).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Looks up a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for OpaqueJson {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Identity reference embedded in many resources (creators, owners, members).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRef {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub unique_name: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub descriptor: Option<String>,
}
