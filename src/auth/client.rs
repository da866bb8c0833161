//! HTTP client for the authentication API. Requests share one timeout policy
//! and one error mapping so the controller only ever sees [`ServiceError`].

use super::{
    errors::ServiceError,
    types::{ErrorBody, LoginEnvelope, LoginPayload, LoginRequest, RegisterRequest},
};
use reqwest::{Client, Response};
use secrecy::ExposeSecret;
use serde_json::json;
use std::{future::Future, time::Duration};
use tracing::{debug, info_span, Instrument};
use url::Url;

/// Default request timeout applied when the caller does not configure one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum number of raw error body characters written to the debug log.
const MAX_ERROR_CHARS: usize = 200;

/// Remote authentication operations consumed by the form controller.
pub trait AuthService {
    /// Exchanges credentials for a token pair and the user's profile.
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<LoginPayload, ServiceError>> + Send;

    /// Creates an account; any success is an acknowledgement.
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpAuthService {
    client: Client,
    base_url: String,
}

impl HttpAuthService {
    /// Build a client for the API rooted at `base_url`.
    ///
    /// # Errors
    /// Returns `ServiceError::Request` if the URL is not `http`/`https` or the
    /// underlying client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let url = Url::parse(base_url.trim())
            .map_err(|err| ServiceError::Request(format!("invalid API URL: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ServiceError::Request(format!(
                "unsupported API URL scheme: {}",
                url.scheme()
            )));
        }

        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| ServiceError::Request(format!("failed to build client: {err}")))?;

        Ok(Self {
            client,
            base_url: url.as_str().to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<Response, ServiceError> {
        let url = self.endpoint(path);
        let span = info_span!("auth.request", http.method = "POST", url = %url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .instrument(span)
            .await
            .map_err(map_request_error)?;

        debug!(status = response.status().as_u16(), "auth response");

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(rejection(response).await)
        }
    }
}

impl AuthService for HttpAuthService {
    async fn login(&self, request: &LoginRequest) -> Result<LoginPayload, ServiceError> {
        let body = json!({
            "username": request.username,
            "password": request.password.expose_secret(),
        });

        let response = self.post("/auth/login", body).await?;
        let envelope: LoginEnvelope = response
            .json()
            .await
            .map_err(|err| ServiceError::Decode(format!("failed to decode login response: {err}")))?;

        Ok(envelope.data.into())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ServiceError> {
        let body = json!({
            "firstName": request.first_name,
            "lastName": request.last_name,
            "username": request.username,
            "email": request.email,
            "password": request.password.expose_secret(),
            "role": request.role,
        });

        self.post("/auth/register", body).await.map(|_| ())
    }
}

/// Joins a base URL and a path with exactly one slash between them.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

fn map_request_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout
    } else if err.is_decode() {
        ServiceError::Decode(err.to_string())
    } else {
        ServiceError::Transport(err.to_string())
    }
}

/// Turns a non-success response into `ServiceError::Http`, keeping the body's
/// `message` field untouched when the body is JSON. An empty message counts
/// as absent.
async fn rejection(response: Response) -> ServiceError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty());

    if message.is_none() {
        debug!(status, body = %sanitize_body(&body), "rejection without message");
    }

    ServiceError::Http { status, message }
}

fn sanitize_body(body: &str) -> String {
    body.trim().chars().take(MAX_ERROR_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;
    use anyhow::Result;
    use secrecy::SecretString;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn login_request() -> LoginRequest {
        LoginRequest {
            username: "ada@ieodp.io".to_string(),
            password: SecretString::from("Secret1@3".to_string()),
        }
    }

    #[test]
    fn build_url_with_base_joins_single_slash() {
        assert_eq!(
            build_url_with_base("https://api.ieodp.io/api/", "/auth/login"),
            "https://api.ieodp.io/api/auth/login"
        );
        assert_eq!(build_url_with_base("", "/auth/login"), "/auth/login");
    }

    #[test]
    fn new_rejects_unsupported_scheme() {
        let result = HttpAuthService::new("ftp://api.ieodp.io", DEFAULT_TIMEOUT);
        assert!(matches!(result, Err(ServiceError::Request(_))));
    }

    #[test]
    fn sanitize_body_trims_and_truncates() {
        assert_eq!(sanitize_body("   "), "");
        assert_eq!(sanitize_body(" <html>502</html> "), "<html>502</html>");
        let long = "x".repeat(500);
        assert_eq!(sanitize_body(&long).len(), MAX_ERROR_CHARS);
    }

    #[tokio::test]
    async fn rejection_keeps_long_message_whole() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let message = format!("{} - this email already exists", "x".repeat(222));
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "message": message
            })))
            .mount(&server)
            .await;

        let client = HttpAuthService::new(&server.uri(), DEFAULT_TIMEOUT)?;
        let request = RegisterRequest {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            username: "grace@ieodp.io".to_string(),
            email: "grace@ieodp.io".to_string(),
            password: SecretString::from("Secret1@3".to_string()),
            role: Role::Viewer,
        };
        let err = client.register(&request).await.err();
        assert_eq!(err.as_ref().and_then(ServiceError::service_message), Some(message.as_str()));
        assert_eq!(err.as_ref().and_then(ServiceError::status), Some(400));
        Ok(())
    }

    #[tokio::test]
    async fn login_unwraps_data_envelope() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "username": "ada@ieodp.io",
                "password": "Secret1@3"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "id": 1,
                    "accessToken": "access-token",
                    "refreshToken": "refresh-token",
                    "role": "manager",
                    "firstName": "Ada",
                    "lastName": "Lovelace",
                    "username": "ada@ieodp.io",
                    "email": "ada@ieodp.io"
                }
            })))
            .mount(&server)
            .await;

        let client = HttpAuthService::new(&format!("{}/api", server.uri()), DEFAULT_TIMEOUT)?;
        let payload = client.login(&login_request()).await?;
        assert_eq!(payload.role, "manager");
        assert_eq!(payload.user.first_name, "Ada");
        assert_eq!(payload.refresh_token.expose_secret(), "refresh-token");
        Ok(())
    }

    #[tokio::test]
    async fn login_rejection_keeps_status_and_message() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials"
            })))
            .mount(&server)
            .await;

        let client = HttpAuthService::new(&server.uri(), DEFAULT_TIMEOUT)?;
        let result = client.login(&login_request()).await;
        assert_eq!(
            result.err(),
            Some(ServiceError::Http {
                status: 401,
                message: Some("Bad credentials".to_string()),
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn login_with_malformed_body_is_decode_error() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&server)
            .await;

        let client = HttpAuthService::new(&server.uri(), DEFAULT_TIMEOUT)?;
        let result = client.login(&login_request()).await;
        assert!(matches!(result, Err(ServiceError::Decode(_))));
        Ok(())
    }

    #[tokio::test]
    async fn register_sends_email_and_role() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .and(body_json(json!({
                "firstName": "Grace",
                "lastName": "Hopper",
                "username": "grace@ieodp.io",
                "email": "grace@ieodp.io",
                "password": "Secret1@3",
                "role": "REVIEWER"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpAuthService::new(&server.uri(), DEFAULT_TIMEOUT)?;
        let request = RegisterRequest {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            username: "grace@ieodp.io".to_string(),
            email: "grace@ieodp.io".to_string(),
            password: SecretString::from("Secret1@3".to_string()),
            role: Role::Reviewer,
        };
        client.register(&request).await?;
        Ok(())
    }

    #[tokio::test]
    async fn register_conflict_without_json_body_has_no_message() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(ResponseTemplate::new(409).set_body_string("conflict"))
            .mount(&server)
            .await;

        let client = HttpAuthService::new(&server.uri(), DEFAULT_TIMEOUT)?;
        let request = RegisterRequest {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            username: "grace@ieodp.io".to_string(),
            email: "grace@ieodp.io".to_string(),
            password: SecretString::from("Secret1@3".to_string()),
            role: Role::Viewer,
        };
        let result = client.register(&request).await;
        assert_eq!(
            result.err(),
            Some(ServiceError::Http {
                status: 409,
                message: None,
            })
        );
        Ok(())
    }
}
