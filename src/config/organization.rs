//
//  azure-devops-rest
//  config/organization.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Organization URLs
//!
//! Requests are resolved against an organization (collection) URL. The
//! hosted service uses `https://dev.azure.com/{organization}`; older
//! organizations still answer on `https://{organization}.visualstudio.com`,
//! and on-premises servers use their own host and collection path.
//!
//! ```rust
//! use azure_devops_rest::config::normalize_organization_url;
//!
//! assert_eq!(
//!     normalize_organization_url("fabrikam").unwrap(),
//!     "https://dev.azure.com/fabrikam"
//! );
//! assert_eq!(
//!     normalize_organization_url("https://fabrikam.visualstudio.com/").unwrap(),
//!     "https://fabrikam.visualstudio.com"
//! );
//! ```

use anyhow::Result;
use url::Url;

/// Host of the hosted service.
pub const HOSTED_HOST: &str = "dev.azure.com";

/// Suffix of legacy hosted organization hosts.
pub const LEGACY_HOST_SUFFIX: &str = ".visualstudio.com";

/// Returns `true` for `dev.azure.com` and `*.visualstudio.com` hosts.
pub fn is_hosted(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == HOSTED_HOST || host.ends_with(LEGACY_HOST_SUFFIX)
}

/// Turns user input into a canonical organization URL.
///
/// A bare name becomes `https://dev.azure.com/<name>`. Full URLs are parsed,
/// lower-cased in the host and stripped of a trailing slash.
///
/// # Errors
///
/// Fails for empty input, unparseable URLs and non-HTTP schemes.
pub fn normalize_organization_url(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        anyhow::bail!("Organization URL cannot be empty");
    }

    if !input.contains("://") && !input.contains('/') && !input.contains('.') {
        return Ok(format!("https://{}/{}", HOSTED_HOST, input));
    }

    let with_scheme = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| anyhow::anyhow!("Invalid organization URL '{}': {}", input, e))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        anyhow::bail!("Organization URL must use http or https: {}", input);
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name() {
        assert_eq!(
            normalize_organization_url("  contoso ").unwrap(),
            "https://dev.azure.com/contoso"
        );
    }

    #[test]
    fn test_full_urls() {
        assert_eq!(
            normalize_organization_url("https://DEV.AZURE.COM/contoso/").unwrap(),
            "https://dev.azure.com/contoso"
        );
        assert_eq!(
            normalize_organization_url("tfs.contoso.local/tfs/DefaultCollection").unwrap(),
            "https://tfs.contoso.local/tfs/DefaultCollection"
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(normalize_organization_url("").is_err());
        assert!(normalize_organization_url("ftp://dev.azure.com/x").is_err());
    }

    #[test]
    fn test_hosted_detection() {
        assert!(is_hosted("dev.azure.com"));
        assert!(is_hosted("Fabrikam.VisualStudio.com"));
        assert!(!is_hosted("tfs.contoso.local"));
    }
}
