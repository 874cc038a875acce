//
//  azure-devops-rest
//  api/resources/dashboard.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Dashboard widgets.
//!
//! Widgets live on a dashboard, which belongs to a project and optionally to a
//! team. When no team is given the team segment is dropped from the route:
//!
//! ```text
//! {project}/{team}/_apis/Dashboard/Dashboards/{dashboardId}/Widgets/{widgetId}
//!
//! Fabrikam/_apis/Dashboard/Dashboards/d1/Widgets          (project dashboard)
//! Fabrikam/Web/_apis/Dashboard/Dashboards/d1/Widgets/w1   (team dashboard)
//! ```
//!
//! Widget writes are guarded by an ETag. The list endpoint returns it in the
//! `ETag` response header, which is why [`DashboardApi::list_widgets`] reads
//! the raw response instead of decoding the body directly.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::common::ApiError;
use crate::api::decode;
use crate::api::{DevOpsClient, RequestDescriptor};

pub const API_VERSION: &str = "7.1-preview.2";

const WIDGETS_ROUTE: &str =
    "{project}/{team}/_apis/Dashboard/Dashboards/{dashboardId}/Widgets/{widgetId}";

/// Grid position of a widget, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WidgetPosition {
    pub row: u32,
    pub column: u32,
}

/// Size of a widget in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSize {
    pub row_span: u32,
    pub column_span: u32,
}

impl Default for WidgetSize {
    fn default() -> Self {
        Self {
            row_span: 1,
            column_span: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SemanticVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// A widget on a dashboard.
///
/// `settings` is an opaque string owned by the widget's contribution, usually
/// serialized JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default)]
    pub position: WidgetPosition,

    #[serde(default)]
    pub size: WidgetSize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_version: Option<SemanticVersion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,

    #[serde(rename = "eTag", default, skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Widgets of a dashboard together with the dashboard's ETag.
#[derive(Debug, Clone, Default)]
pub struct WidgetsVersionedList {
    pub widgets: Vec<Widget>,
    pub e_tag: Option<String>,
}

/// Identifies the dashboard a widget operation targets.
#[derive(Debug, Clone, Copy)]
pub struct DashboardScope<'s> {
    pub project: &'s str,
    pub team: Option<&'s str>,
    pub dashboard_id: &'s str,
}

impl<'s> DashboardScope<'s> {
    pub fn project(project: &'s str, dashboard_id: &'s str) -> Self {
        Self {
            project,
            team: None,
            dashboard_id,
        }
    }

    pub fn team(project: &'s str, team: &'s str, dashboard_id: &'s str) -> Self {
        Self {
            project,
            team: Some(team),
            dashboard_id,
        }
    }

    fn descriptor(&self, widget_id: Option<&str>) -> RequestDescriptor {
        RequestDescriptor::new(API_VERSION, WIDGETS_ROUTE)
            .route("project", self.project)
            .route_opt("team", self.team)
            .route("dashboardId", self.dashboard_id)
            .route_opt("widgetId", widget_id)
    }
}

/// Dashboard widget operations.
pub struct DashboardApi<'a> {
    client: &'a DevOpsClient,
}

impl<'a> DashboardApi<'a> {
    pub fn new(client: &'a DevOpsClient) -> Self {
        Self { client }
    }

    /// Lists the widgets of a dashboard along with its ETag.
    pub async fn list_widgets(
        &self,
        scope: DashboardScope<'_>,
    ) -> Result<WidgetsVersionedList, ApiError> {
        let response = self.client.request_raw(&scope.descriptor(None)).await?;

        let e_tag = response.header("etag").map(str::to_string);
        let widgets = decode::decode_list::<Widget>(&response)?.into_items();

        debug!("dashboard {} has {} widgets", scope.dashboard_id, widgets.len());
        Ok(WidgetsVersionedList { widgets, e_tag })
    }

    pub async fn get_widget(
        &self,
        scope: DashboardScope<'_>,
        widget_id: &str,
    ) -> Result<Widget, ApiError> {
        self.client
            .request_json(&scope.descriptor(Some(widget_id)))
            .await
    }

    /// Adds `widget` to the dashboard and returns it as stored.
    pub async fn create_widget(
        &self,
        scope: DashboardScope<'_>,
        widget: &Widget,
    ) -> Result<Widget, ApiError> {
        let descriptor = scope.descriptor(None).method(Method::POST).json(widget)?;
        self.client.request_json(&descriptor).await
    }

    /// Replaces a widget. The widget's `e_tag` must match the stored one.
    pub async fn replace_widget(
        &self,
        scope: DashboardScope<'_>,
        widget_id: &str,
        widget: &Widget,
    ) -> Result<Widget, ApiError> {
        let descriptor = scope
            .descriptor(Some(widget_id))
            .method(Method::PUT)
            .json(widget)?;
        self.client.request_json(&descriptor).await
    }

    pub async fn delete_widget(
        &self,
        scope: DashboardScope<'_>,
        widget_id: &str,
    ) -> Result<(), ApiError> {
        let descriptor = scope.descriptor(Some(widget_id)).method(Method::DELETE);
        self.client.send(&descriptor).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_scope_drops_team_segment() {
        let client = DevOpsClient::new("https://dev.azure.com/org").unwrap();
        let built = client
            .build(&DashboardScope::project("Fabrikam", "d1").descriptor(Some("w1")))
            .unwrap();

        assert_eq!(
            built.url.as_str(),
            "https://dev.azure.com/org/Fabrikam/_apis/Dashboard/Dashboards/d1/Widgets/w1"
        );
    }

    #[test]
    fn test_team_scope_encodes_team_name() {
        let client = DevOpsClient::new("https://dev.azure.com/org").unwrap();
        let built = client
            .build(&DashboardScope::team("Fabrikam", "Web Team", "d1").descriptor(None))
            .unwrap();

        assert_eq!(
            built.url.path(),
            "/org/Fabrikam/Web%20Team/_apis/Dashboard/Dashboards/d1/Widgets"
        );
    }

    #[test]
    fn test_widget_serialization_skips_unset_fields() {
        let widget = Widget {
            name: "Burndown".to_string(),
            contribution_id: Some("ms.vss-dashboards-web.Microsoft.VisualStudioOnline.Dashboards.BurndownWidget".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&widget).unwrap();
        assert_eq!(json["size"]["rowSpan"], 1);
        assert!(json.get("id").is_none());
        assert!(json.get("eTag").is_none());
    }
}
