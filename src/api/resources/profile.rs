//
//  azure-devops-rest
//  api/resources/profile.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User profiles.
//!
//! `me` is accepted as the profile id for the authenticated user. Core
//! attributes (display name, e-mail, avatar, ...) and application attribute
//! containers are free-form and kept as opaque JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, OpaqueJson};
use crate::api::{DevOpsClient, RequestDescriptor};

pub const API_VERSION: &str = "7.1-preview.3";

const PROFILES_ROUTE: &str = "_apis/profile/profiles/{id}";

/// Profile id of the authenticated user.
pub const ME: &str = "me";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub public_alias: Option<String>,

    #[serde(default)]
    pub email_address: Option<String>,

    #[serde(default)]
    pub time_stamp: Option<DateTime<Utc>>,

    #[serde(default)]
    pub revision: Option<i64>,

    #[serde(default)]
    pub core_revision: Option<i64>,

    /// Attribute name to attribute descriptor and value.
    #[serde(default)]
    pub core_attributes: OpaqueJson,

    #[serde(default)]
    pub application_container: OpaqueJson,

    #[serde(default)]
    pub profile_state: Option<String>,
}

impl Profile {
    /// Reads the value of a core attribute, e.g. `DisplayName`.
    pub fn core_attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.core_attributes.get(name).and_then(|attr| attr.get("value"))
    }
}

/// Options for [`ProfileApi::get_profile`].
#[derive(Debug, Clone, Default)]
pub struct ProfileQuery<'s> {
    /// Return the full profile instead of the summary fields.
    pub details: Option<bool>,
    pub with_attributes: Option<bool>,
    /// Attribute partition, e.g. `Core`.
    pub partition: Option<&'s str>,
    /// Comma-separated core attribute names.
    pub core_attributes: Option<&'s str>,
    /// Bypass the server-side profile cache.
    pub force_refresh: Option<bool>,
}

pub struct ProfileApi<'a> {
    client: &'a DevOpsClient,
}

impl<'a> ProfileApi<'a> {
    pub fn new(client: &'a DevOpsClient) -> Self {
        Self { client }
    }

    /// Gets a profile by id, or the caller's with [`ME`].
    pub async fn get_profile(&self, id: &str, options: &ProfileQuery<'_>) -> Result<Profile, ApiError> {
        self.client.request_json(&profile_descriptor(id, options)).await
    }
}

fn profile_descriptor(id: &str, options: &ProfileQuery<'_>) -> RequestDescriptor {
    RequestDescriptor::new(API_VERSION, PROFILES_ROUTE)
        .route("id", id)
        .query_opt("details", options.details)
        .query_opt("withAttributes", options.with_attributes)
        .query_opt("partition", options.partition)
        .query_opt("coreAttributes", options.core_attributes)
        .query_opt("forceRefresh", options.force_refresh)
}
