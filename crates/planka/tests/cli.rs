#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `planka` with a private credential file and no credentials in the environment
fn planka_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("planka"));
    cmd.env_remove("PLANKA_URL")
        .env_remove("PLANKA_USERNAME")
        .env_remove("PLANKA_PASSWORD")
        .env_remove("PLANKA_VERBOSE")
        .env(
            "PLANKA_CREDENTIALS_FILE",
            temp.path().join("credentials.env").as_os_str(),
        );
    cmd
}

/// `planka` pointed at `server` through environment credentials
fn planka_against(temp: &TempDir, server: &MockServer) -> Command {
    let mut cmd = planka_cmd(temp);
    cmd.env("PLANKA_URL", server.uri())
        .env("PLANKA_USERNAME", "jane")
        .env("PLANKA_PASSWORD", "pw");
    cmd
}

async fn mount_card(server: &MockServer, card: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/cards/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "item": card })))
        .mount(server)
        .await;
}

async fn mock_planka() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/access-tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "item": "token" })))
        .mount(&server)
        .await;
    server
}

#[test]
fn test_help_lists_resource_groups() {
    let temp = TempDir::new().unwrap();

    planka_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("projects"))
        .stdout(predicate::str::contains("notifications"))
        .stdout(predicate::str::contains("login"));
}

#[test]
fn test_no_subcommand_prints_help() {
    let temp = TempDir::new().unwrap();

    planka_cmd(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_subcommand_prints_help_and_exits_2() {
    let temp = TempDir::new().unwrap();

    planka_cmd(&temp)
        .arg("bogus")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("cards"));
}

#[test]
fn test_unknown_nested_subcommand_prints_group_help() {
    let temp = TempDir::new().unwrap();

    planka_cmd(&temp)
        .args(["cards", "bogus"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_login_requires_options() {
    let temp = TempDir::new().unwrap();

    planka_cmd(&temp)
        .arg("login")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--url"));
}

#[test]
fn test_logout_without_credentials() {
    let temp = TempDir::new().unwrap();

    planka_cmd(&temp)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("No stored credentials found at"));
}

#[test]
fn test_login_logout_round_trip() {
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.env");

    // 1. Login writes the credential file
    planka_cmd(&temp)
        .args([
            "login",
            "--url",
            "https://planka.example.com/",
            "--username",
            "jane",
            "--password",
            "s3cr'et",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved credentials to"));

    let contents = fs::read_to_string(&credentials).unwrap();
    assert!(contents.contains("PLANKA_URL=\"https://planka.example.com\""));
    assert!(contents.contains("PLANKA_PASSWORD=\"s3cr'et\""));

    // 2. Logout removes it
    planka_cmd(&temp)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));
    assert!(!credentials.exists());

    // 3. Commands now fail before any request
    planka_cmd(&temp)
        .args(["projects", "list"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error:"))
        .stdout(predicate::str::contains("Missing credentials"));
}

#[test]
fn test_conflicting_update_flags_fail_without_credentials() {
    let temp = TempDir::new().unwrap();

    planka_cmd(&temp)
        .args([
            "cards",
            "update",
            "c1",
            "--description",
            "new",
            "--clear-description",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Use either --description or --clear-description.",
        ));

    planka_cmd(&temp)
        .args([
            "cards",
            "update",
            "c1",
            "--due-date",
            "2025-01-31",
            "--clear-due-date",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Use either --due-date or --clear-due-date.",
        ));
}

#[test]
fn test_bad_literals_fail_without_credentials() {
    let temp = TempDir::new().unwrap();

    planka_cmd(&temp)
        .args(["cards", "update", "c1", "--position", "middle"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Position must be"));

    planka_cmd(&temp)
        .args(["cards", "create", "l1", "Ship", "--due-date", "tomorrow"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Invalid datetime"));
}

#[test]
fn test_update_without_options_is_a_no_op() {
    let temp = TempDir::new().unwrap();

    planka_cmd(&temp)
        .args(["cards", "update", "c1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No updates provided."));
}

#[test]
fn test_verbose_adds_no_command_banner() {
    let temp = TempDir::new().unwrap();

    planka_cmd(&temp)
        .args(["--verbose", "cards", "update", "c1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No updates provided."))
        .stdout(predicate::str::contains("Running").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_against_server() {
    // Arrange
    let server = mock_planka().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": { "id": "u1", "username": "jane", "name": "Jane", "email": "jane@example.com" }
        })))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();

    // Act / Assert
    planka_cmd(&temp)
        .env("PLANKA_URL", server.uri())
        .env("PLANKA_USERNAME", "jane")
        .env("PLANKA_PASSWORD", "pw")
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Connected! Logged in as: jane (ID: u1)",
        ))
        .stdout(predicate::str::contains("Email: jane@example.com"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_card_is_reported_not_failed() {
    let server = mock_planka().await;
    Mock::given(method("GET"))
        .and(path("/api/cards/c404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("E_NOT_FOUND"))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();

    planka_cmd(&temp)
        .env("PLANKA_URL", server.uri())
        .env("PLANKA_USERNAME", "jane")
        .env("PLANKA_PASSWORD", "pw")
        .args(["cards", "show", "c404"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Card c404 not found."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_error_exits_1() {
    let server = mock_planka().await;
    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();

    planka_cmd(&temp)
        .env("PLANKA_URL", server.uri())
        .env("PLANKA_USERNAME", "jane")
        .env("PLANKA_PASSWORD", "pw")
        .args(["notifications", "unread"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Error: Failed to fetch notifications [500 Internal Server Error]: boom",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_to_unknown_list_changes_nothing() {
    // Arrange
    let server = mock_planka().await;
    mount_card(
        &server,
        json!({ "id": "c1", "boardId": "b1", "listId": "l1", "name": "Ship", "position": 65536 }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [],
            "included": { "boards": [] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();

    // Act / Assert
    planka_against(&temp, &server)
        .args(["cards", "update", "c1", "--list-id", "l404", "--name", "Renamed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("List l404 not found."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reposition_without_current_list_changes_nothing() {
    let server = mock_planka().await;
    mount_card(&server, json!({ "id": "c1", "name": "Loose" })).await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();

    planka_against(&temp, &server)
        .args(["cards", "update", "c1", "--position", "top"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Card c1 is not in a list"))
        .stdout(predicate::str::contains("List  not found.").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cross_board_move_patches_before_field_update() {
    // Arrange
    let server = mock_planka().await;
    mount_card(
        &server,
        json!({ "id": "c1", "boardId": "b1", "listId": "l1", "name": "Ship", "position": 65536 }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "p1", "name": "Apollo" }],
            "included": { "boards": [
                { "id": "b1", "projectId": "p1", "name": "Roadmap" },
                { "id": "b2", "projectId": "p1", "name": "Bugs" }
            ] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/boards/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": { "id": "b1", "projectId": "p1", "name": "Roadmap" },
            "included": {
                "lists": [{ "id": "l1", "boardId": "b1", "name": "Todo", "position": 65536 }],
                "cards": [{ "id": "c1", "listId": "l1", "boardId": "b1", "name": "Ship", "position": 65536 }]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/boards/b2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": { "id": "b2", "projectId": "p1", "name": "Bugs" },
            "included": {
                "lists": [{ "id": "l2", "boardId": "b2", "name": "Triage", "position": 65536 }],
                "cards": [{ "id": "c9", "listId": "l2", "boardId": "b2", "name": "Crash", "position": 65536 }]
            }
        })))
        .mount(&server)
        .await;
    let move_body = json!({ "listId": "l2", "boardId": "b2", "position": 32768.0 });
    let field_body = json!({ "name": "Renamed" });
    Mock::given(method("PATCH"))
        .and(path("/api/cards/c1"))
        .and(body_json(&move_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": { "id": "c1", "boardId": "b2", "listId": "l2", "name": "Ship" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/cards/c1"))
        .and(body_json(&field_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": { "id": "c1", "boardId": "b2", "listId": "l2", "name": "Renamed" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();

    // Act
    planka_against(&temp, &server)
        .args(["cards", "update", "c1", "--list-id", "l2", "--name", "Renamed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated card"))
        .stdout(predicate::str::contains("(ID: c1)"));

    // Assert
    let patches: Vec<serde_json::Value> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|request| request.method.to_string() == "PATCH")
        .map(|request| serde_json::from_slice(&request.body).unwrap())
        .collect();
    assert_eq!(patches, vec![move_body, field_body]);
}
