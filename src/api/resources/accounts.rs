//
//  azure-devops-rest
//  api/resources/accounts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organization accounts.
//!
//! Lists the organizations a user owns or belongs to. The endpoint requires
//! either an owner or a member id; the `me` profile gives the caller's id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, OpaqueJson};
use crate::api::{DevOpsClient, RequestDescriptor};

pub const API_VERSION: &str = "7.1";

const ACCOUNTS_ROUTE: &str = "_apis/accounts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    Personal,
    Organization,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountStatus {
    None,
    Enabled,
    Disabled,
    Deleted,
    Moved,
    #[serde(other)]
    Unknown,
}

/// An organization account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: String,

    pub account_name: String,

    #[serde(default)]
    pub account_uri: Option<String>,

    #[serde(default)]
    pub organization_name: Option<String>,

    #[serde(default)]
    pub account_type: Option<AccountType>,

    #[serde(default)]
    pub account_owner: Option<String>,

    #[serde(default)]
    pub account_status: Option<AccountStatus>,

    #[serde(default)]
    pub status_reason: Option<String>,

    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_updated_by: Option<String>,

    #[serde(default)]
    pub last_updated_date: Option<DateTime<Utc>>,

    /// Extended properties requested through `properties`.
    #[serde(default)]
    pub properties: OpaqueJson,
}

/// Whose accounts to list.
#[derive(Debug, Clone, Copy)]
pub enum AccountFilter<'s> {
    Owner(&'s str),
    Member(&'s str),
}

pub struct AccountsApi<'a> {
    client: &'a DevOpsClient,
}

impl<'a> AccountsApi<'a> {
    pub fn new(client: &'a DevOpsClient) -> Self {
        Self { client }
    }

    /// Lists accounts for an owner or member.
    ///
    /// # Parameters
    ///
    /// * `filter` - Owner or member id
    /// * `properties` - Extended property names to include, sent comma-joined
    pub async fn list_accounts(
        &self,
        filter: AccountFilter<'_>,
        properties: &[&str],
    ) -> Result<Vec<Account>, ApiError> {
        self.client
            .request_list(&list_descriptor(filter, properties))
            .await
            .map(|page| page.into_items())
    }
}

fn list_descriptor(filter: AccountFilter<'_>, properties: &[&str]) -> RequestDescriptor {
    let (name, id) = match filter {
        AccountFilter::Owner(id) => ("ownerId", id),
        AccountFilter::Member(id) => ("memberId", id),
    };

    RequestDescriptor::new(API_VERSION, ACCOUNTS_ROUTE)
        .query(name, id)
        .query_opt("properties", (!properties.is_empty()).then(|| properties.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_are_comma_joined() {
        let client = DevOpsClient::new("https://dev.azure.com/org").unwrap();
        let built = client
            .build(&list_descriptor(
                AccountFilter::Member("42"),
                &["Microsoft.VisualStudio.Services.Account.ServiceUrl.00025394-6065-48ca-87d9-7f5672854ef7", "region"],
            ))
            .unwrap();

        let pairs: Vec<(String, String)> = built.url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("memberId".to_string(), "42".to_string()));
        assert_eq!(pairs[1].0, "properties");
        assert!(pairs[1].1.ends_with(",region"));
    }

    #[test]
    fn test_no_properties_no_parameter() {
        let client = DevOpsClient::new("https://dev.azure.com/org").unwrap();
        let built = client.build(&list_descriptor(AccountFilter::Owner("7"), &[])).unwrap();
        assert_eq!(built.url.query(), Some("ownerId=7"));
    }

    #[test]
    fn test_properties_kept_opaque() {
        let account: Account = serde_json::from_str(
            r#"{"accountId": "a", "accountName": "fabrikam", "accountStatus": "enabled",
                "properties": {"region": {"$type": "System.String", "$value": "weu"}}}"#,
        )
        .unwrap();

        assert_eq!(account.account_status, Some(AccountStatus::Enabled));
        assert_eq!(account.properties.get("region").unwrap()["$value"], "weu");
    }
}
