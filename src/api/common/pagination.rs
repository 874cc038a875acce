//
//  azure-devops-rest
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for Azure DevOps List Responses
//!
//! List endpoints return their items in the JSON body but signal further pages
//! out of band, through the `x-ms-continuationtoken` response header. The
//! token is passed back as the `continuationToken` query parameter to fetch
//! the next page.
//!
//! | Type | Source |
//! |------|--------|
//! | [`CollectionEnvelope`] | JSON body: `{ "count": n, "value": [...] }` |
//! | [`PagedList`] | Decoded items plus the header token |
//!
//! # Example
//!
//! ```rust
//! use azure_devops_rest::api::common::PagedList;
//!
//! let page = PagedList::new(vec![1, 2, 3], Some("abc123".to_string()));
//! assert!(page.has_next());
//! assert_eq!(page.next_token(), Some("abc123"));
//! ```

use serde::{Deserialize, Serialize};

/// Name of the response header carrying the continuation token.
pub const CONTINUATION_TOKEN_HEADER: &str = "x-ms-continuationtoken";

/// Name of the query parameter used to request the next page.
pub const CONTINUATION_TOKEN_PARAM: &str = "continuationToken";

/// The service's standard list wrapper.
///
/// # Example
///
/// ```rust
/// use azure_devops_rest::api::common::CollectionEnvelope;
///
/// let json = r#"{"count": 2, "value": ["a", "b"]}"#;
/// let envelope: CollectionEnvelope<String> = serde_json::from_str(json).unwrap();
/// assert_eq!(envelope.value.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionEnvelope<T> {
    /// Number of items in `value`, when the service reports it.
    #[serde(default)]
    pub count: Option<u32>,

    /// The items of this page.
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// One page of a list endpoint.
///
/// `continuation_token` is populated from the `x-ms-continuationtoken`
/// response header, never from the JSON body. `None` means there are no
/// more pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedList<T> {
    /// Items decoded from the response body.
    pub items: Vec<T>,

    /// Opaque token for the next page.
    #[serde(default)]
    pub continuation_token: Option<String>,
}

impl<T> PagedList<T> {
    pub fn new(items: Vec<T>, continuation_token: Option<String>) -> Self {
        Self {
            items,
            continuation_token,
        }
    }

    /// Checks if the service reported more pages.
    pub fn has_next(&self) -> bool {
        self.continuation_token.is_some()
    }

    /// Returns the token to send as `continuationToken` for the next page.
    pub fn next_token(&self) -> Option<&str> {
        self.continuation_token.as_deref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops the token and keeps the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for PagedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_without_count() {
        let envelope: CollectionEnvelope<u32> = serde_json::from_str(r#"{"value": [1, 2]}"#).unwrap();
        assert_eq!(envelope.count, None);
        assert_eq!(envelope.value, vec![1, 2]);
    }

    #[test]
    fn test_last_page() {
        let page: PagedList<u32> = PagedList::new(vec![7], None);
        assert!(!page.has_next());
        assert_eq!(page.next_token(), None);
        assert_eq!(page.into_items(), vec![7]);
    }
}
