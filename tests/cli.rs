//
//  azure-devops-rest
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use tempfile::TempDir;

/// `azdo` with an isolated config directory and no ambient credentials.
fn azdo(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("azdo").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("AZDO_ORG_URL")
        .env_remove("AZDO_TOKEN")
        .env_remove("AZDO_API_VERSION")
        .env_remove("AZDO_DEBUG");
    cmd
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    azdo(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    azdo(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("api"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_api_without_organization_fails() {
    let home = TempDir::new().unwrap();
    azdo(&home)
        .args(["api", "_apis/projects"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no organization URL configured"));
}

#[test]
fn test_api_renders_route_and_normalizes_dates() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/org/_apis/projects/Fabrikam")
        .match_query(Matcher::Any)
        .match_header("authorization", "Basic Ong=")
        .match_header("accept", "application/json;api-version=7.1")
        .with_status(200)
        .with_body(r#"{"id": "1", "name": "Fabrikam", "lastUpdateTime": "/Date(1700000000000)/"}"#)
        .expect(1)
        .create();

    azdo(&home)
        .env("AZDO_ORG_URL", format!("{}/org", server.url()))
        .env("AZDO_TOKEN", "x")
        .args(["api", "_apis/projects/{projectId}", "-p", "projectId=Fabrikam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2023-11-14T22:13:20.000Z"));

    mock.assert();
}

#[test]
fn test_api_not_found_exit_code() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/org/_apis/projects/nope")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message": "project does not exist"}"#)
        .create();

    azdo(&home)
        .args(["--org", &format!("{}/org", server.url())])
        .args(["api", "_apis/projects/nope"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("project does not exist"));
}

#[test]
fn test_api_bad_route_is_usage_error() {
    let home = TempDir::new().unwrap();
    azdo(&home)
        .args(["--org", "http://127.0.0.1:1/org"])
        .args(["api", "_apis/items/{*path}", "-p", "path=docs/../secret"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("dot segment"));
}

#[test]
fn test_token_flag_overrides_environment() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/org/_apis/projects")
        .match_query(Matcher::Any)
        .match_header("authorization", "Basic OmZsYWc=")
        .with_status(200)
        .with_body(r#"{"count": 0, "value": []}"#)
        .expect(1)
        .create();

    azdo(&home)
        .env("AZDO_TOKEN", "env")
        .args(["--org", &format!("{}/org", server.url())])
        .args(["--token", "flag", "api", "_apis/projects"])
        .assert()
        .success();

    mock.assert();
}

#[test]
fn test_config_set_then_get() {
    let home = TempDir::new().unwrap();

    azdo(&home)
        .args(["config", "set", "organization_url", "fabrikam"])
        .assert()
        .success();

    azdo(&home)
        .args(["config", "get", "organization_url"])
        .assert()
        .success()
        .stdout(predicate::str::diff("https://dev.azure.com/fabrikam\n"));
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    azdo(&home)
        .args(["config", "set", "editor", "vim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}
