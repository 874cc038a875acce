//
//  azure-devops-rest
//  api/route.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Route Templates
//!
//! Every REST operation is addressed by a path template such as
//! `{project}/_apis/wit/classificationnodes/{structureGroup}/{*path}`.
//! This module parses those templates and renders them against a set of
//! route values.
//!
//! ## Placeholder Kinds
//!
//! | Token | Present value | Absent value |
//! |-------|---------------|--------------|
//! | `{name}` | Percent-encoded as one path segment | Removed with one adjoining `/` |
//! | `{*name}` | Split on `/`, each piece percent-encoded | Removed with the separator before it |
//!
//! A template may hold at most one wildcard and it must be the last segment.
//! Values that would render as a `.` or `..` segment are rejected.
//!
//! ## Example
//!
//! ```rust
//! use azure_devops_rest::api::route::{render, RouteValues};
//!
//! let values = RouteValues::new().with("project", "P").with("widgetId", "W1");
//! let path = render("{project}/_apis/widgets/{widgetId}", &values).unwrap();
//! assert_eq!(path, "P/_apis/widgets/W1");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use super::common::ApiError;

/// A single piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied as-is.
    Literal(String),
    /// `{name}` placeholder.
    Param(String),
    /// `{*name}` catch-all placeholder.
    Wildcard(String),
}

/// A parsed route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    segments: Vec<Segment>,
}

impl RouteTemplate {
    /// Parses a template string.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Template`] when:
    /// - a `{` is never closed, or a `}` has no opening brace
    /// - a placeholder name is empty
    /// - a wildcard is followed by anything else
    pub fn parse(template: &str) -> Result<Self, ApiError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.char_indices();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        match inner {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(ApiError::Template(format!(
                                    "nested '{{' in placeholder at offset {pos} of '{template}'"
                                )))
                            }
                            other => name.push(other),
                        }
                    }
                    if !closed {
                        return Err(ApiError::Template(format!(
                            "unclosed placeholder at offset {pos} of '{template}'"
                        )));
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }

                    let segment = match name.strip_prefix('*') {
                        Some(wildcard) => Segment::Wildcard(wildcard.trim().to_string()),
                        None => Segment::Param(name.trim().to_string()),
                    };
                    if matches!(&segment, Segment::Param(n) | Segment::Wildcard(n) if n.is_empty())
                    {
                        return Err(ApiError::Template(format!(
                            "empty placeholder name at offset {pos} of '{template}'"
                        )));
                    }
                    segments.push(segment);
                }
                '}' => {
                    return Err(ApiError::Template(format!(
                        "unmatched '}}' at offset {pos} of '{template}'"
                    )))
                }
                other => literal.push(other),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        if let Some(idx) = segments
            .iter()
            .position(|s| matches!(s, Segment::Wildcard(_)))
        {
            if idx + 1 != segments.len() {
                return Err(ApiError::Template(format!(
                    "wildcard placeholder must be the last segment of '{template}'"
                )));
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of all placeholders, in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) | Segment::Wildcard(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Renders the template against `values`.
    ///
    /// Empty values are treated as absent. The result never contains a brace,
    /// an empty segment or a trailing slash produced by a missing value.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Template`] when a value would produce a `.` or
    /// `..` path segment.
    pub fn render(&self, values: &RouteValues) -> Result<String, ApiError> {
        let mut head = String::new();
        let mut tail: Option<(&str, &str)> = None;

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => head.push_str(text),
                Segment::Param(name) => {
                    if let Some(value) = values.get(name) {
                        head.push_str(&encode_segment(name, value)?);
                    }
                }
                Segment::Wildcard(name) => tail = values.get(name).map(|v| (name.as_str(), v)),
            }
        }

        let mut path = collapse_separators(&head);

        if let Some((name, tail)) = tail {
            let pieces = tail
                .split('/')
                .filter(|piece| !piece.is_empty())
                .map(|piece| encode_segment(name, piece))
                .collect::<Result<Vec<_>, _>>()?;

            if !pieces.is_empty() {
                if !path.is_empty()
                    && !path.ends_with('/')
                    && wildcard_follows_separator(&self.segments)
                {
                    path.push('/');
                }
                path.push_str(&pieces.join("/"));
            }
        }

        Ok(path)
    }
}

impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Param(name) => write!(f, "{{{name}}}")?,
                Segment::Wildcard(name) => write!(f, "{{*{name}}}")?,
            }
        }
        Ok(())
    }
}

/// Drops empty path segments while keeping a leading `/`.
fn collapse_separators(path: &str) -> String {
    let joined = path
        .split('/')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if path.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Percent-encodes one path segment, refusing dot segments.
fn encode_segment(name: &str, value: &str) -> Result<String, ApiError> {
    if value == "." || value == ".." {
        return Err(ApiError::Template(format!(
            "route value '{name}' contains the dot segment '{value}'"
        )));
    }
    Ok(urlencoding::encode(value).into_owned())
}

// `{a}{*b}` and `prefix-{*b}` join the tail directly.
fn wildcard_follows_separator(segments: &[Segment]) -> bool {
    matches!(
        segments,
        [.., Segment::Literal(text), Segment::Wildcard(_)] if text.ends_with('/')
    )
}

/// Values substituted into a [`RouteTemplate`].
///
/// Anything implementing `ToString` can be used: strings, integers, UUIDs.
///
/// # Example
///
/// ```rust
/// use azure_devops_rest::api::route::RouteValues;
///
/// let values = RouteValues::new()
///     .with("project", "Fabrikam")
///     .with("id", 42)
///     .with_opt("teamId", None::<String>);
///
/// assert_eq!(values.get("id"), Some("42"));
/// assert_eq!(values.get("teamId"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteValues {
    values: BTreeMap<String, String>,
}

impl RouteValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, replacing any previous value for `name`.
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a value only when one is supplied.
    pub fn with_opt<V: ToString>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(name, value);
        }
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        self.values.insert(name.into(), value.to_string());
    }

    /// Returns the value for `name`; empty strings count as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for RouteValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}

/// Parses `template` and renders it in one step.
pub fn render(template: &str, values: &RouteValues) -> Result<String, ApiError> {
    RouteTemplate::parse(template)?.render(values)
}
