//
//  azure-devops-rest
//  api/resources/work_item_tracking.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Work item classification nodes (areas and iterations).
//!
//! Nodes form two trees per project. A node is addressed by its path below
//! the tree root, which is passed through the `{*path}` wildcard so that its
//! slashes stay path separators:
//!
//! ```text
//! {project}/_apis/wit/classificationnodes/{structureGroup}/{*path}
//!
//! Fabrikam/_apis/wit/classificationnodes                              (both roots)
//! Fabrikam/_apis/wit/classificationnodes/iterations                   (iteration root)
//! Fabrikam/_apis/wit/classificationnodes/iterations/Release 1/Sprint 2
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, OpaqueJson};
use crate::api::{DevOpsClient, RequestDescriptor};

pub const API_VERSION: &str = "7.1";

const CLASSIFICATION_NODES_ROUTE: &str =
    "{project}/_apis/wit/classificationnodes/{structureGroup}/{*path}";

/// Which classification tree a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TreeStructureGroup {
    Areas,
    Iterations,
}

impl TreeStructureGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Areas => "areas",
            Self::Iterations => "iterations",
        }
    }
}

impl std::fmt::Display for TreeStructureGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An area or iteration node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemClassificationNode {
    pub id: i64,

    #[serde(default)]
    pub identifier: Option<String>,

    pub name: String,

    /// `area` or `iteration`.
    #[serde(default)]
    pub structure_type: Option<String>,

    #[serde(default)]
    pub has_children: bool,

    #[serde(default)]
    pub children: Vec<WorkItemClassificationNode>,

    /// Backslash-separated path including the project, e.g. `\Fabrikam\Iteration\Sprint 1`.
    #[serde(default)]
    pub path: Option<String>,

    /// Node attributes; iterations carry `startDate` and `finishDate`.
    #[serde(default)]
    pub attributes: OpaqueJson,

    #[serde(default)]
    pub url: Option<String>,
}

/// Dates of an iteration node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationDates {
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub finish_date: Option<DateTime<Utc>>,
}

impl WorkItemClassificationNode {
    /// Decodes iteration dates from `attributes`.
    pub fn iteration_dates(&self) -> Result<IterationDates, ApiError> {
        if self.attributes.is_null() {
            return Ok(IterationDates::default());
        }
        self.attributes.deserialize_as()
    }

    /// Depth-first walk over this node and its loaded descendants.
    pub fn walk(&self) -> Vec<&WorkItemClassificationNode> {
        let mut nodes = vec![self];
        for child in &self.children {
            nodes.extend(child.walk());
        }
        nodes
    }
}

pub struct WorkItemTrackingApi<'a> {
    client: &'a DevOpsClient,
}

impl<'a> WorkItemTrackingApi<'a> {
    pub fn new(client: &'a DevOpsClient) -> Self {
        Self { client }
    }

    /// Gets the area and iteration roots of a project.
    pub async fn get_root_nodes(
        &self,
        project: &str,
        depth: Option<u32>,
    ) -> Result<Vec<WorkItemClassificationNode>, ApiError> {
        let descriptor = nodes_descriptor(project, None, None, depth);
        Ok(self.client.request_list(&descriptor).await?.into_items())
    }

    /// Gets a classification node.
    ///
    /// # Parameters
    ///
    /// * `project` - Project id or name
    /// * `group` - Areas or iterations tree
    /// * `path` - Path below the root such as `Release 1/Sprint 2`; `None` for the root
    /// * `depth` - Levels of children to include (`$depth`)
    pub async fn get_classification_node(
        &self,
        project: &str,
        group: TreeStructureGroup,
        path: Option<&str>,
        depth: Option<u32>,
    ) -> Result<WorkItemClassificationNode, ApiError> {
        let descriptor = nodes_descriptor(project, Some(group), path, depth);
        self.client.request_json(&descriptor).await
    }
}

fn nodes_descriptor(
    project: &str,
    group: Option<TreeStructureGroup>,
    path: Option<&str>,
    depth: Option<u32>,
) -> RequestDescriptor {
    RequestDescriptor::new(API_VERSION, CLASSIFICATION_NODES_ROUTE)
        .route("project", project)
        .route_opt("structureGroup", group)
        .route_opt("path", group.and(path))
        .query_opt("$depth", depth)
}
