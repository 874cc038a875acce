//
//  azure-devops-rest
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Typed bindings for individual resource areas.
//!
//! Each area is a thin borrowing wrapper around a [`DevOpsClient`]: it owns
//! the route templates and API versions for its operations and the data
//! shapes they exchange, and delegates everything else to the client.
//!
//! # Module Organization
//!
//! - [`core`](self::core) - Projects and teams
//! - [`dashboard`] - Dashboard widgets
//! - [`feature_flags`] - Feature availability flags
//! - [`policy`] - Branch and repository policy configurations
//! - [`accounts`] - Organization accounts
//! - [`profile`] - User profiles
//! - [`work_item_tracking`] - Area and iteration classification nodes
//!
//! # Example
//!
//! ```rust,no_run
//! use azure_devops_rest::api::DevOpsClient;
//!
//! # async fn example() -> Result<(), azure_devops_rest::api::ApiError> {
//! let client = DevOpsClient::new("https://dev.azure.com/fabrikam")?;
//! let page = client.core().list_projects(Some(50), None, None).await?;
//! for project in &page.items {
//!     println!("{}", project.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod accounts;
pub mod core;
pub mod dashboard;
pub mod feature_flags;
pub mod policy;
pub mod profile;
pub mod work_item_tracking;

use super::DevOpsClient;

impl DevOpsClient {
    pub fn accounts(&self) -> accounts::AccountsApi<'_> {
        accounts::AccountsApi::new(self)
    }

    pub fn core(&self) -> self::core::CoreApi<'_> {
        self::core::CoreApi::new(self)
    }

    pub fn dashboard(&self) -> dashboard::DashboardApi<'_> {
        dashboard::DashboardApi::new(self)
    }

    pub fn feature_flags(&self) -> feature_flags::FeatureFlagsApi<'_> {
        feature_flags::FeatureFlagsApi::new(self)
    }

    pub fn policy(&self) -> policy::PolicyApi<'_> {
        policy::PolicyApi::new(self)
    }

    pub fn profile(&self) -> profile::ProfileApi<'_> {
        profile::ProfileApi::new(self)
    }

    pub fn work_item_tracking(&self) -> work_item_tracking::WorkItemTrackingApi<'_> {
        work_item_tracking::WorkItemTrackingApi::new(self)
    }
}
