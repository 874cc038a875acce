//
//  azure-devops-rest
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the request-dispatch contract shared by every
//! resource area of the Azure DevOps REST API, plus typed bindings for a set
//! of those areas.
//!
//! ## Architecture
//!
//! ```text
//! resource binding ──► RequestDescriptor ──► RequestBuilder ──► Transport ──► decode
//!   (templates,         (route values,        (URL, headers,     (one HTTP     (JSON, dates,
//!    typed shapes)       query, body)          api-version)       exchange)     continuation)
//! ```
//!
//! - [`route`]: `{name}` / `{*name}` route template engine
//! - [`request`]: query values, request descriptors and the request builder
//! - [`transport`]: the transport seam and the reqwest implementation
//! - [`decode`]: JSON decoding, date normalization, continuation tokens
//! - [`client`]: [`DevOpsClient`], the dispatcher tying the pieces together
//! - [`common`]: error taxonomy and shared response types
//! - [`resources`]: per-area bindings (core, dashboard, feature flags, ...)
//! - [`areas`]: static resource-area identifiers
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]:
//!
//! - `Template`: malformed route template, raised before any I/O
//! - `Transport`: the HTTP exchange could not complete
//! - `Api`: the service answered 4xx/5xx
//! - `Decode`: a success body could not be decoded

pub mod areas;
pub mod client;
pub mod common;
pub mod decode;
pub mod request;
pub mod resources;
pub mod route;
pub mod transport;

pub use client::DevOpsClient;
pub use common::{ApiError, PagedList};
pub use request::{ApiVersionMode, QueryValue, RequestDescriptor};
pub use route::{RouteTemplate, RouteValues};
pub use transport::{RawResponse, Transport};
