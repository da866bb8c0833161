#![allow(clippy::unwrap_used, clippy::expect_used)]

use ieodp_auth::{
    auth::{HttpAuthService, DEFAULT_TIMEOUT},
    form::{controller::USERNAME_EXISTS, Field, FormController, Mode, Status, SubmitOutcome},
    redirect::{follow_session, Navigator},
    role::Role,
    session::{FileStorage, SessionPort, SessionStore, StorageSession},
};
use serde_json::json;
use std::net::TcpListener;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

#[derive(Default)]
struct RecordingNavigator {
    visited: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn replace(&mut self, path: &str) {
        self.visited.push(path.to_string());
    }
}

fn login_body(role: &str) -> serde_json::Value {
    json!({
        "data": {
            "id": 42,
            "accessToken": "access-token",
            "refreshToken": "refresh-token",
            "role": role,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "username": "ada@ieodp.io",
            "email": "ada@ieodp.io"
        }
    })
}

async fn server_with_login(role: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body(role)))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn session_at(file: &std::path::Path) -> StorageSession<FileStorage> {
    StorageSession::new(FileStorage::new(file), SessionStore::new())
}

#[tokio::test]
async fn login_persists_session_and_redirects_by_role() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = server_with_login("admin").await;
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("session.json");

    let auth = HttpAuthService::new(&format!("{}/api", server.uri()), DEFAULT_TIMEOUT)
        .expect("client");
    let mut controller = FormController::new(auth, session_at(&file));
    controller.set_field(Field::Username, "ada@ieodp.io");
    controller.set_field(Field::Password, "Secret1@3");

    assert_eq!(controller.submit().await, SubmitOutcome::Completed);
    assert_eq!(controller.state().status(), &Status::Idle);

    let mut navigator = RecordingNavigator::default();
    let landed = follow_session(controller.session(), &mut navigator);
    assert_eq!(landed, Some("/admin-dashboard"));
    assert_eq!(navigator.visited, vec!["/admin-dashboard".to_string()]);

    // a fresh process sees the same session on disk
    let reloaded = session_at(&file);
    assert!(reloaded.restore().expect("restore"));
    assert_eq!(reloaded.current_role(), Some(Role::Admin));
    let user = reloaded.stored_user().expect("user").expect("present");
    assert_eq!(user.id, "42");
    assert_eq!(user.first_name, "Ada");
}

#[tokio::test]
async fn unknown_role_lands_on_default_dashboard() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = server_with_login("contractor").await;
    let dir = tempfile::tempdir().expect("tempdir");

    let auth = HttpAuthService::new(&format!("{}/api", server.uri()), DEFAULT_TIMEOUT)
        .expect("client");
    let mut controller = FormController::new(auth, session_at(&dir.path().join("s.json")));
    controller.set_field(Field::Username, "ada");
    controller.set_field(Field::Password, "anything");

    controller.submit_login().await;

    assert_eq!(controller.session().stored_role().as_deref(), Some("CONTRACTOR"));
    let mut navigator = RecordingNavigator::default();
    assert_eq!(
        follow_session(controller.session(), &mut navigator),
        Some("/dashboard")
    );
}

#[tokio::test]
async fn long_duplicate_message_still_maps_to_username_exists() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let message = format!(
        "{} - this email already exists",
        "Validation failed for request payload. ".repeat(6)
    );
    assert!(message.chars().count() > 200);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": message })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let auth = HttpAuthService::new(&format!("{}/api", server.uri()), DEFAULT_TIMEOUT)
        .expect("client");
    let mut controller = FormController::new(auth, session_at(&dir.path().join("s.json")));
    controller.switch_mode(Mode::Register);
    controller.set_field(Field::FirstName, "Grace");
    controller.set_field(Field::LastName, "Hopper");
    controller.set_field(Field::Username, "grace@ieodp.io");
    controller.set_field(Field::Password, "Secret1@3");
    controller.set_field(Field::ConfirmPassword, "Secret1@3");
    controller.set_field(Field::SelectedRole, "reviewer");

    assert_eq!(controller.submit().await, SubmitOutcome::Completed);
    assert_eq!(controller.state().status().error(), Some(USERNAME_EXISTS));
}

#[tokio::test]
async fn duplicate_registration_keeps_the_form() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Conflict"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");

    let auth = HttpAuthService::new(&format!("{}/api", server.uri()), DEFAULT_TIMEOUT)
        .expect("client");
    let mut controller = FormController::new(auth, session_at(&dir.path().join("s.json")));
    controller.switch_mode(Mode::Register);
    controller.set_field(Field::FirstName, "Grace");
    controller.set_field(Field::LastName, "Hopper");
    controller.set_field(Field::Username, "grace@ieodp.io");
    controller.set_field(Field::Password, "Secret1@3");
    controller.set_field(Field::ConfirmPassword, "Secret1@3");
    controller.set_field(Field::SelectedRole, "viewer");
    assert!(controller.can_submit());

    assert_eq!(controller.submit().await, SubmitOutcome::Completed);
    assert_eq!(controller.state().status().error(), Some(USERNAME_EXISTS));
    assert_eq!(controller.state().mode(), Mode::Register);
    assert!(!controller.session().is_authenticated());
}
