//
//  azure-devops-rest
//  api/resources/core.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Core area: projects and teams.
//!
//! # Overview
//!
//! Projects are the top-level container for repositories, work items and
//! pipelines inside an organization. Each project has one or more teams.
//!
//! ```text
//! Organization
//! └── Project
//!     ├── Teams
//!     └── Repositories, boards, pipelines, ...
//! ```
//!
//! The project list is paged with a continuation token carried in the
//! `x-ms-continuationtoken` header; pass it back through `list_projects` to
//! read the next page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, PagedList, CONTINUATION_TOKEN_PARAM};
use crate::api::{DevOpsClient, RequestDescriptor};

pub const API_VERSION: &str = "7.1";

const PROJECTS_ROUTE: &str = "_apis/projects/{projectId}";
const TEAMS_ROUTE: &str = "_apis/projects/{projectId}/teams/{teamId}";

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectState {
    Deleting,
    New,
    WellFormed,
    CreatePending,
    All,
    Unchanged,
    Deleted,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectVisibility {
    Private,
    Public,
    Organization,
    Unchanged,
    #[serde(other)]
    Unknown,
}

/// A project as returned by list endpoints.
///
/// # Example
///
/// ```rust
/// use azure_devops_rest::api::resources::core::{ProjectState, TeamProjectReference};
///
/// let json = r#"{
///     "id": "eb6e4656-77fc-42a1-9181-4c6d8e9da5d1",
///     "name": "Fabrikam-Fiber-TFVC",
///     "state": "wellFormed",
///     "revision": 411,
///     "visibility": "private",
///     "lastUpdateTime": "2024-02-19T09:00:00Z"
/// }"#;
///
/// let project: TeamProjectReference = serde_json::from_str(json).unwrap();
/// assert_eq!(project.state, Some(ProjectState::WellFormed));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProjectReference {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub state: Option<ProjectState>,

    #[serde(default)]
    pub revision: Option<u64>,

    #[serde(default)]
    pub visibility: Option<ProjectVisibility>,

    #[serde(default)]
    pub last_update_time: Option<DateTime<Utc>>,
}

/// Minimal team reference embedded in a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebApiTeamRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// A project with its full details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProject {
    #[serde(flatten)]
    pub reference: TeamProjectReference,

    /// Capability name to settings, e.g. `versioncontrol.sourceControlType`.
    #[serde(default)]
    pub capabilities: std::collections::BTreeMap<String, std::collections::BTreeMap<String, String>>,

    #[serde(default)]
    pub default_team: Option<WebApiTeamRef>,
}

/// A team within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebApiTeam {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub identity_url: Option<String>,

    #[serde(default)]
    pub project_name: Option<String>,

    #[serde(default)]
    pub project_id: Option<String>,
}

/// Projects and teams.
pub struct CoreApi<'a> {
    client: &'a DevOpsClient,
}

impl<'a> CoreApi<'a> {
    pub fn new(client: &'a DevOpsClient) -> Self {
        Self { client }
    }

    /// Lists one page of projects.
    ///
    /// # Parameters
    ///
    /// * `top` - Page size (`$top`)
    /// * `skip` - Items to skip (`$skip`)
    /// * `continuation_token` - Token from the previous page
    pub async fn list_projects(
        &self,
        top: Option<u32>,
        skip: Option<u32>,
        continuation_token: Option<&str>,
    ) -> Result<PagedList<TeamProjectReference>, ApiError> {
        let descriptor = RequestDescriptor::new(API_VERSION, PROJECTS_ROUTE)
            .query_opt("$top", top)
            .query_opt("$skip", skip)
            .query_opt(CONTINUATION_TOKEN_PARAM, continuation_token);

        self.client.request_list(&descriptor).await
    }

    /// Lists every project, following continuation tokens.
    pub async fn list_all_projects(&self) -> Result<Vec<TeamProjectReference>, ApiError> {
        let descriptor = RequestDescriptor::new(API_VERSION, PROJECTS_ROUTE);
        self.client.request_all(&descriptor).await
    }

    /// Gets a project by id or name.
    pub async fn get_project(
        &self,
        project_id: &str,
        include_capabilities: bool,
    ) -> Result<TeamProject, ApiError> {
        let descriptor = RequestDescriptor::new(API_VERSION, PROJECTS_ROUTE)
            .route("projectId", project_id)
            .query_opt("includeCapabilities", include_capabilities.then_some(true));

        self.client.request_json(&descriptor).await
    }

    /// Lists the teams of a project.
    pub async fn list_teams(
        &self,
        project_id: &str,
        mine: Option<bool>,
        top: Option<u32>,
        skip: Option<u32>,
    ) -> Result<Vec<WebApiTeam>, ApiError> {
        let descriptor = RequestDescriptor::new(API_VERSION, TEAMS_ROUTE)
            .route("projectId", project_id)
            .query_opt("$mine", mine)
            .query_opt("$top", top)
            .query_opt("$skip", skip);

        Ok(self.client.request_list(&descriptor).await?.into_items())
    }

    /// Gets a single team.
    pub async fn get_team(&self, project_id: &str, team_id: &str) -> Result<WebApiTeam, ApiError> {
        let descriptor = RequestDescriptor::new(API_VERSION, TEAMS_ROUTE)
            .route("projectId", project_id)
            .route("teamId", team_id);

        self.client.request_json(&descriptor).await
    }
}
