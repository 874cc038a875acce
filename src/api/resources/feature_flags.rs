//
//  azure-devops-rest
//  api/resources/feature_flags.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Feature availability flags.
//!
//! Flags can be read for the calling user or on behalf of another user by
//! e-mail, and switched on or off with a PATCH carrying only the new state.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::ApiError;
use crate::api::{DevOpsClient, RequestDescriptor};

pub const API_VERSION: &str = "7.1-preview.1";

const FEATURE_FLAGS_ROUTE: &str = "_apis/FeatureFlags/{name}";

/// State of a feature flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureFlagState {
    On,
    Off,
    Undefined,
}

impl std::str::FromStr for FeatureFlagState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "undefined" => Ok(Self::Undefined),
            _ => Err(format!("invalid feature flag state '{s}' (expected on or off)")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlag {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub uri: Option<String>,

    /// State after applying user and application level overrides.
    #[serde(default)]
    pub effective_state: Option<String>,

    /// State set at the requested level.
    #[serde(default)]
    pub actual_state: Option<String>,
}

impl FeatureFlag {
    pub fn is_enabled(&self) -> bool {
        self.effective_state
            .as_deref()
            .is_some_and(|state| state.eq_ignore_ascii_case("on"))
    }
}

/// Body of a feature flag update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureFlagPatch {
    pub state: FeatureFlagState,
}

/// Options for [`FeatureFlagsApi::update_feature_flag`].
#[derive(Debug, Clone, Default)]
pub struct FeatureFlagUpdate<'s> {
    /// Change the flag for this user instead of the caller.
    pub user_email: Option<&'s str>,
    /// Fail if the flag does not exist.
    pub check_feature_exists: Option<bool>,
    /// Apply the state at the application level too.
    pub set_at_application_level_also: Option<bool>,
}

pub struct FeatureFlagsApi<'a> {
    client: &'a DevOpsClient,
}

impl<'a> FeatureFlagsApi<'a> {
    pub fn new(client: &'a DevOpsClient) -> Self {
        Self { client }
    }

    pub async fn list_feature_flags(&self) -> Result<Vec<FeatureFlag>, ApiError> {
        let descriptor = RequestDescriptor::new(API_VERSION, FEATURE_FLAGS_ROUTE);
        Ok(self.client.request_list(&descriptor).await?.into_items())
    }

    /// Gets a flag for the caller.
    pub async fn get_feature_flag(&self, name: &str) -> Result<FeatureFlag, ApiError> {
        let descriptor = RequestDescriptor::new(API_VERSION, FEATURE_FLAGS_ROUTE).route("name", name);
        self.client.request_json(&descriptor).await
    }

    /// Gets a flag as seen by the user with `user_email`.
    pub async fn get_feature_flag_by_email(
        &self,
        name: &str,
        user_email: &str,
        check_feature_exists: Option<bool>,
    ) -> Result<FeatureFlag, ApiError> {
        let descriptor = RequestDescriptor::new(API_VERSION, FEATURE_FLAGS_ROUTE)
            .route("name", name)
            .query("userEmail", user_email)
            .query_opt("checkFeatureExists", check_feature_exists);
        self.client.request_json(&descriptor).await
    }

    /// Changes the state of a flag.
    pub async fn update_feature_flag(
        &self,
        name: &str,
        state: FeatureFlagState,
        options: &FeatureFlagUpdate<'_>,
    ) -> Result<FeatureFlag, ApiError> {
        let descriptor = RequestDescriptor::new(API_VERSION, FEATURE_FLAGS_ROUTE)
            .method(Method::PATCH)
            .route("name", name)
            .query_opt("userEmail", options.user_email)
            .query_opt("checkFeatureExists", options.check_feature_exists)
            .query_opt("setAtApplicationLevelAlso", options.set_at_application_level_also)
            .json(&FeatureFlagPatch { state })?;

        self.client.request_json(&descriptor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_parsing() {
        assert_eq!("ON".parse::<FeatureFlagState>().unwrap(), FeatureFlagState::On);
        assert_eq!("off".parse::<FeatureFlagState>().unwrap(), FeatureFlagState::Off);
        assert!("maybe".parse::<FeatureFlagState>().is_err());
    }

    #[test]
    fn test_patch_body() {
        let body = serde_json::to_string(&FeatureFlagPatch {
            state: FeatureFlagState::Off,
        })
        .unwrap();
        assert_eq!(body, r#"{"state":"off"}"#);
    }

    #[test]
    fn test_update_request_shape() {
        let client = DevOpsClient::new("https://dev.azure.com/org").unwrap();
        let descriptor = RequestDescriptor::new(API_VERSION, FEATURE_FLAGS_ROUTE)
            .method(Method::PATCH)
            .route("name", "ms.feed.feature")
            .query_opt("userEmail", Some("dev@fabrikam.com"))
            .query_opt("checkFeatureExists", None::<bool>)
            .json(&FeatureFlagPatch {
                state: FeatureFlagState::On,
            })
            .unwrap();

        let built = client.build(&descriptor).unwrap();
        assert_eq!(
            built.url.as_str(),
            "https://dev.azure.com/org/_apis/FeatureFlags/ms.feed.feature?userEmail=dev%40fabrikam.com"
        );
        assert_eq!(built.method, Method::PATCH);
        assert_eq!(built.body.as_deref(), Some(br#"{"state":"on"}"#.as_slice()));
    }

    #[test]
    fn test_is_enabled() {
        let flag: FeatureFlag =
            serde_json::from_str(r#"{"name": "f", "effectiveState": "On", "actualState": "undefined"}"#).unwrap();
        assert!(flag.is_enabled());
    }
}
