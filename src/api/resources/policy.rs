//
//  azure-devops-rest
//  api/resources/policy.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Policy configurations.
//!
//! A policy configuration binds a policy type (minimum reviewers, build
//! validation, comment resolution, ...) to a scope such as a branch of a
//! repository. Settings differ per policy type and are kept as opaque JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, IdentityRef, OpaqueJson, PagedList, CONTINUATION_TOKEN_PARAM};
use crate::api::{DevOpsClient, RequestDescriptor};

pub const API_VERSION: &str = "7.1";

const CONFIGURATIONS_ROUTE: &str = "{project}/_apis/policy/configurations/{configurationId}";
const TYPES_ROUTE: &str = "{project}/_apis/policy/types/{typeId}";

/// Reference to a policy type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyTypeRef {
    pub id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

/// A policy type with its description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyType {
    #[serde(flatten)]
    pub reference: PolicyTypeRef,

    #[serde(default)]
    pub description: Option<String>,
}

/// A configured policy.
///
/// # Example
///
/// ```rust
/// use azure_devops_rest::api::resources::policy::PolicyConfiguration;
///
/// let json = r#"{
///     "id": 4,
///     "revision": 1,
///     "isEnabled": true,
///     "isBlocking": true,
///     "type": {"id": "fa4e907d-c16b-4a4c-9dfa-4906e5d171dd", "displayName": "Minimum number of reviewers"},
///     "settings": {"minimumApproverCount": 2, "scope": [{"repositoryId": null}]}
/// }"#;
///
/// let policy: PolicyConfiguration = serde_json::from_str(json).unwrap();
/// assert_eq!(policy.settings.get("minimumApproverCount").unwrap(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfiguration {
    pub id: u32,

    #[serde(rename = "type")]
    pub policy_type: PolicyTypeRef,

    #[serde(default)]
    pub revision: Option<u32>,

    #[serde(default)]
    pub is_enabled: bool,

    #[serde(default)]
    pub is_blocking: bool,

    #[serde(default)]
    pub is_deleted: bool,

    /// Type-specific settings.
    #[serde(default)]
    pub settings: OpaqueJson,

    #[serde(default)]
    pub created_by: Option<IdentityRef>,

    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub url: Option<String>,
}

/// Filters for [`PolicyApi::list_configurations`].
#[derive(Debug, Clone, Default)]
pub struct PolicyConfigurationQuery<'s> {
    /// Scope filter, e.g. `refs/heads/main` within a repository.
    pub scope: Option<&'s str>,
    /// Only configurations of this policy type id.
    pub policy_type: Option<&'s str>,
    pub top: Option<u32>,
    pub continuation_token: Option<&'s str>,
}

pub struct PolicyApi<'a> {
    client: &'a DevOpsClient,
}

impl<'a> PolicyApi<'a> {
    pub fn new(client: &'a DevOpsClient) -> Self {
        Self { client }
    }

    /// Lists one page of policy configurations in a project.
    pub async fn list_configurations(
        &self,
        project: &str,
        filter: &PolicyConfigurationQuery<'_>,
    ) -> Result<PagedList<PolicyConfiguration>, ApiError> {
        let descriptor = configurations_descriptor(project, filter);
        self.client.request_list(&descriptor).await
    }

    pub async fn get_configuration(
        &self,
        project: &str,
        configuration_id: u32,
    ) -> Result<PolicyConfiguration, ApiError> {
        let descriptor = RequestDescriptor::new(API_VERSION, CONFIGURATIONS_ROUTE)
            .route("project", project)
            .route("configurationId", configuration_id);

        self.client.request_json(&descriptor).await
    }

    pub async fn list_types(&self, project: &str) -> Result<Vec<PolicyType>, ApiError> {
        let descriptor = RequestDescriptor::new(API_VERSION, TYPES_ROUTE).route("project", project);
        Ok(self.client.request_list(&descriptor).await?.into_items())
    }
}

fn configurations_descriptor(project: &str, filter: &PolicyConfigurationQuery<'_>) -> RequestDescriptor {
    RequestDescriptor::new(API_VERSION, CONFIGURATIONS_ROUTE)
        .route("project", project)
        .query_opt("scope", filter.scope)
        .query_opt("policyType", filter.policy_type)
        .query_opt("$top", filter.top)
        .query_opt(CONTINUATION_TOKEN_PARAM, filter.continuation_token)
}
