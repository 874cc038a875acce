//
//  azure-devops-rest
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credentials are attached to each request as an `Authorization` header.
//! How a token is obtained (interactive sign-in, managed identity, secret
//! store) is up to the caller.
//!
//! ## Supported Credentials
//!
//! - **Personal Access Token (PAT)**: sent as Basic auth with an empty user
//!   name, which is what the service expects for PATs.
//! - **Bearer**: OAuth / Entra ID access tokens.
//! - **Basic**: explicit user name and password.
//!
//! ## Example
//!
//! ```rust
//! use azure_devops_rest::auth::AuthCredential;
//!
//! let credential = AuthCredential::pat("my-token");
//! assert!(credential.authorization_header().starts_with("Basic "));
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::api::ApiError;

/// Environment variable consulted by [`AuthCredential::from_env`].
pub const TOKEN_ENV: &str = "AZDO_TOKEN";

/// Credential attached to every request.
#[derive(Clone)]
pub enum AuthCredential {
    PersonalAccessToken { token: String },
    Bearer { token: String },
    Basic { username: String, password: String },
}

impl AuthCredential {
    pub fn pat(token: impl Into<String>) -> Self {
        Self::PersonalAccessToken {
            token: token.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Reads a PAT from `AZDO_TOKEN`, if set and non-empty.
    pub fn from_env() -> Option<Self> {
        std::env::var(TOKEN_ENV)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(Self::pat)
    }

    /// The full `Authorization` header value.
    pub fn authorization_header(&self) -> String {
        match self {
            Self::PersonalAccessToken { token } => {
                format!("Basic {}", STANDARD.encode(format!(":{token}")))
            }
            Self::Bearer { token } => format!("Bearer {token}"),
            Self::Basic { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
            }
        }
    }

    /// Sets the `Authorization` header, replacing any existing value.
    pub fn apply_to_headers(&self, headers: &mut HeaderMap) -> Result<(), ApiError> {
        let mut value = HeaderValue::from_str(&self.authorization_header())
            .map_err(|_| ApiError::InvalidRequest("credential contains invalid characters".into()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::PersonalAccessToken { .. } => "PersonalAccessToken",
            Self::Bearer { .. } => "Bearer",
            Self::Basic { .. } => "Basic",
        }
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthCredential")
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pat_uses_empty_username() {
        let header = AuthCredential::pat("secret").authorization_header();
        assert_eq!(header, format!("Basic {}", STANDARD.encode(":secret")));
    }

    #[test]
    fn test_bearer_header() {
        let mut headers = HeaderMap::new();
        AuthCredential::bearer("tok").apply_to_headers(&mut headers).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer tok");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
    }

    #[test]
    fn test_debug_hides_secret() {
        let credential = AuthCredential::Basic {
            username: "me".into(),
            password: "hunter2".into(),
        };
        let debug = format!("{credential:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("Basic"));
    }

    #[test]
    fn test_newline_in_token_rejected() {
        let mut headers = HeaderMap::new();
        let err = AuthCredential::bearer("a\nb")
            .apply_to_headers(&mut headers)
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
