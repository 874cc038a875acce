//
//  azure-devops-rest
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Sends one request through the same dispatch path the typed bindings use,
//! so route templates, API versions and date normalization behave the same.
//! Useful for endpoints without a typed binding and for debugging.
//!
//! ## Examples
//!
//! ```bash
//! # List projects
//! azdo api _apis/projects -q '$top=10'
//!
//! # Expand a route template
//! azdo api '{project}/_apis/wit/classificationnodes/{structureGroup}/{*path}' \
//!     -p project=Fabrikam -p structureGroup=iterations -p 'path=Release 1/Sprint 2'
//!
//! # Update a feature flag
//! azdo api -X PATCH _apis/FeatureFlags/my.feature --api-version 7.1-preview.1 -F state=on
//!
//! # Follow continuation tokens
//! azdo api _apis/projects --paginate
//! ```

use std::fs;

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use reqwest::Method;
use serde_json::Value;

use crate::api::decode;
use crate::api::request::{ApiVersionMode, QueryValue, RequestDescriptor};
use crate::api::RouteValues;

use super::GlobalOptions;

/// Make direct API requests
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// Route template relative to the organization (e.g. _apis/projects/{projectId})
    pub route: String,

    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Route values for template tokens (name=value, can be specified multiple times)
    #[arg(long = "param", short = 'p', action = clap::ArgAction::Append)]
    pub params: Vec<String>,

    /// Query parameters (name=value; JSON arrays are sent comma-joined)
    #[arg(long, short = 'q', action = clap::ArgAction::Append)]
    pub query: Vec<String>,

    /// Request headers (can be specified multiple times)
    #[arg(long, short = 'H', action = clap::ArgAction::Append)]
    pub header: Vec<String>,

    /// Request body fields as JSON (key=value, can be nested with dots)
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Raw field values (not JSON-encoded, strings only)
    #[arg(long, action = clap::ArgAction::Append)]
    pub raw_field: Vec<String>,

    /// Read request body from file (- for stdin)
    #[arg(long, short = 'f')]
    pub input: Option<String>,

    /// Body content type
    #[arg(long)]
    pub content_type: Option<String>,

    /// API version (defaults to the configured one)
    #[arg(long)]
    pub api_version: Option<String>,

    /// Send the API version in the query string instead of the Accept header
    #[arg(long)]
    pub version_in_query: bool,

    /// Follow continuation tokens and print every item
    #[arg(long)]
    pub paginate: bool,

    /// Include response headers in output
    #[arg(long, short = 'i')]
    pub include: bool,

    /// Suppress output (only show status)
    #[arg(long)]
    pub silent: bool,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let mut config = global.load_config()?;
        if self.version_in_query {
            config.api_version_mode = ApiVersionMode::Query;
        }
        let client = global.client(&config)?;

        let api_version = self
            .api_version
            .clone()
            .unwrap_or_else(|| config.api_version().to_string());
        let descriptor = self.build_descriptor(&api_version)?;

        if self.paginate {
            let items: Vec<Value> = client.request_all(&descriptor).await?;
            if !self.silent {
                let result = serde_json::json!({
                    "count": items.len(),
                    "value": items,
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            return Ok(());
        }

        let response = client.request_raw(&descriptor).await?;

        if self.include {
            println!("{} {}", style("HTTP").dim(), response.status);
            for (name, value) in response.headers.iter() {
                println!("{}: {}", name, value.to_str().unwrap_or(""));
            }
            println!();
        }

        if self.silent {
            return Ok(());
        }

        match decode::decode_value(&response) {
            Ok(Value::Null) => {}
            Ok(json) if global.json => println!("{}", json),
            Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
            Err(_) => println!("{}", response.text()),
        }

        if let Some(token) = decode::continuation_token(&response) {
            eprintln!(
                "{} More results available: -q continuationToken={}",
                style("!").yellow(),
                token
            );
        }

        Ok(())
    }

    fn build_descriptor(&self, api_version: &str) -> Result<RequestDescriptor> {
        let mut descriptor = RequestDescriptor::new(api_version, self.route.as_str())
            .method(self.parse_method()?)
            .route_values(self.route_values()?);

        for pair in &self.query {
            let (name, value) = self.parse_field(pair)?;
            descriptor = descriptor.query_opt(name, QueryValue::from_json(value));
        }

        for header in &self.header {
            let Some((name, value)) = header.split_once(':') else {
                bail!("Invalid header format: {}. Expected 'Name: Value'", header);
            };
            descriptor = descriptor.header(name.trim(), value.trim());
        }

        if let Some(body) = self.build_body()? {
            descriptor = descriptor.body_value(body);
        }
        if let Some(content_type) = &self.content_type {
            descriptor = descriptor.content_type(content_type.as_str());
        }

        Ok(descriptor)
    }

    fn route_values(&self) -> Result<RouteValues> {
        let mut values = RouteValues::new();
        for param in &self.params {
            let (name, value) = self.parse_raw_field(param)?;
            values.insert(name, value);
        }
        Ok(values)
    }

    fn parse_method(&self) -> Result<Method> {
        match self.method.to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            "HEAD" => Ok(Method::HEAD),
            "OPTIONS" => Ok(Method::OPTIONS),
            _ => bail!("Unsupported HTTP method: {}", self.method),
        }
    }

    fn build_body(&self) -> Result<Option<Value>> {
        if let Some(input) = &self.input {
            let content = if input == "-" {
                let mut buffer = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
                buffer
            } else {
                fs::read_to_string(input)?
            };

            let value: Value = serde_json::from_str(&content)?;
            return Ok(Some(value));
        }

        if self.field.is_empty() && self.raw_field.is_empty() {
            return Ok(None);
        }

        let mut body = serde_json::Map::new();

        for field in &self.field {
            let (key, value) = self.parse_field(field)?;
            set_nested_value(&mut body, &key, value);
        }

        for field in &self.raw_field {
            let (key, value) = self.parse_raw_field(field)?;
            set_nested_value(&mut body, &key, Value::String(value));
        }

        Ok(Some(Value::Object(body)))
    }

    /// Parses `key=value`, reading the value as JSON where it looks like JSON.
    fn parse_field(&self, field: &str) -> Result<(String, Value)> {
        let (key, value_str) = self.parse_raw_field(field)?;

        let value = if value_str == "true" {
            Value::Bool(true)
        } else if value_str == "false" {
            Value::Bool(false)
        } else if value_str == "null" {
            Value::Null
        } else if let Ok(n) = value_str.parse::<i64>() {
            Value::Number(n.into())
        } else if let Ok(n) = value_str.parse::<f64>() {
            serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::String(value_str.clone()))
        } else if value_str.starts_with('[') || value_str.starts_with('{') {
            serde_json::from_str(&value_str).unwrap_or(Value::String(value_str))
        } else {
            Value::String(value_str)
        };

        Ok((key, value))
    }

    fn parse_raw_field(&self, field: &str) -> Result<(String, String)> {
        match field.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => bail!("Invalid field format: {}. Expected key=value", field),
        }
    }
}

fn set_nested_value(obj: &mut serde_json::Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let nested = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(serde_json::Map::new()));
            if let Value::Object(nested) = nested {
                set_nested_value(nested, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        api: ApiCommand,
    }

    fn command(args: &[&str]) -> ApiCommand {
        let mut argv = vec!["azdo"];
        argv.extend_from_slice(args);
        TestCli::parse_from(argv).api
    }

    #[test]
    fn test_parse_field_types() {
        let cmd = command(&["_apis/x"]);
        assert_eq!(cmd.parse_field("a=5").unwrap().1, Value::from(5));
        assert_eq!(cmd.parse_field("a=true").unwrap().1, Value::Bool(true));
        assert_eq!(cmd.parse_field("a=[1,2]").unwrap().1, serde_json::json!([1, 2]));
        assert_eq!(cmd.parse_field("a=b=c").unwrap(), ("a".to_string(), Value::from("b=c")));
        assert!(cmd.parse_field("novalue").is_err());
    }

    #[test]
    fn test_nested_body_fields() {
        let cmd = command(&[
            "_apis/x",
            "-F",
            "position.row=1",
            "-F",
            "position.column=2",
            "--raw-field",
            "name=007",
        ]);

        let body = cmd.build_body().unwrap().unwrap();
        assert_eq!(
            body,
            serde_json::json!({"position": {"row": 1, "column": 2}, "name": "007"})
        );
    }

    #[test]
    fn test_descriptor_from_arguments() {
        let cmd = command(&[
            "{project}/_apis/policy/configurations/{configurationId}",
            "-X",
            "delete",
            "-p",
            "project=Fabrikam",
            "-q",
            "$top=5",
            "-q",
            "ids=[1,2]",
            "-H",
            "X-TFS-FedAuthRedirect: Suppress",
        ]);

        let descriptor = cmd.build_descriptor("7.1").unwrap();
        assert_eq!(descriptor.method, Method::DELETE);
        assert_eq!(descriptor.route_values.get("project"), Some("Fabrikam"));
        assert_eq!(descriptor.route_values.get("configurationId"), None);
        let query: Vec<(&str, String)> = descriptor.query.pairs().collect();
        assert_eq!(
            query,
            vec![("$top", "5".to_string()), ("ids", "1,2".to_string())]
        );
        assert_eq!(
            descriptor.headers,
            vec![("X-TFS-FedAuthRedirect".to_string(), "Suppress".to_string())]
        );
        assert!(descriptor.body.is_none());
    }

    #[test]
    fn test_invalid_method() {
        let cmd = command(&["_apis/x", "-X", "BREW"]);
        assert!(cmd.build_descriptor("7.1").is_err());
    }
}
