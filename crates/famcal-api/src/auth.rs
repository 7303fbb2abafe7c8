//! Credential and session lifecycle
//!
//! Login exchanges form-encoded credentials for a bearer token; the
//! forgot/reset flows deliberately report success whether or not the
//! account exists, so nothing here can be used to enumerate members.

use famcal_core::{Session, User};
use tracing::{debug, info};

use crate::client::FamilyApi;
use crate::error::Result;
use crate::types::{
    Acknowledgement, EmailPayload, PasswordResetPayload, RegisterPayload, TokenResponse,
};

impl FamilyApi {
    /// Exchange credentials for a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let url = self.url("/api/auth/token");
        debug!("Logging in: {}", email);

        let response = self
            .client
            .post(&url)
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;
        let token: TokenResponse = Self::parse_json(response).await?;

        info!("Login succeeded for {}", email);
        Ok(Session::new(token.access_token))
    }

    /// Register a new member account.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<User> {
        let url = self.url("/api/auth/register");
        let response = self.client.post(&url).json(payload).send().await?;
        Self::parse_json(response).await
    }

    /// Request a password reset mail.
    ///
    /// Succeeds regardless of whether the address is known.
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        let url = self.url("/api/auth/forgot-password");
        let response = self
            .client
            .post(&url)
            .json(&EmailPayload {
                email: email.to_string(),
            })
            .send()
            .await?;
        let ack: Acknowledgement = Self::parse_json(response).await?;
        debug!("Password reset requested: {:?}", ack.message);
        Ok(())
    }

    /// Complete a password reset with the mailed token.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<()> {
        let url = self.url("/api/auth/reset-password");
        let response = self
            .client
            .post(&url)
            .json(&PasswordResetPayload {
                token: token.to_string(),
                new_password: new_password.to_string(),
            })
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Claim an invite: set credentials for a pre-created member.
    pub async fn setup_invite(&self, token: &str, payload: &RegisterPayload) -> Result<User> {
        let url = self.url("/api/auth/setup-invite");
        let response = self
            .client
            .post(&url)
            .query(&[("token", token)])
            .json(payload)
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Obtain a session for a member by email alone (development only).
    pub async fn dev_login(&self, email: &str) -> Result<Session> {
        let url = self.url("/api/auth/dev-login");
        debug!("Dev login: {}", email);

        let response = self
            .client
            .post(&url)
            .json(&EmailPayload {
                email: email.to_string(),
            })
            .send()
            .await?;
        let token: TokenResponse = Self::parse_json(response).await?;

        Ok(Session::new(token.access_token))
    }

    /// Resolve the member behind the attached session.
    pub async fn me(&self) -> Result<User> {
        let url = self.url("/api/auth/me");
        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::parse_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use famcal_core::config::ApiConfig;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ApiConfig {
        ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_login_posts_form_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/token"))
            .and(body_string_contains("username=alice%40example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok-abc",
                "token_type": "bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = FamilyApi::new(&config_for(&server)).unwrap();
        let session = api.login("alice@example.com", "hunter2").await.unwrap();
        assert_eq!(session.token, "tok-abc");
    }

    #[tokio::test]
    async fn test_me_requires_session_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "name": "Alice", "email": "alice@example.com"
            })))
            .mount(&server)
            .await;

        let api = FamilyApi::new(&config_for(&server))
            .unwrap()
            .with_session(Session::new("tok"));
        let me = api.me().await.unwrap();
        assert_eq!(me.name, "Alice");
    }

    #[tokio::test]
    async fn test_forgot_password_ok_for_unknown_account() {
        let server = MockServer::start().await;
        // backend answers 200 even for addresses it has never seen
        Mock::given(method("POST"))
            .and(path("/api/auth/forgot-password"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "If the account exists, a reset mail was sent"
            })))
            .mount(&server)
            .await;

        let api = FamilyApi::new(&config_for(&server)).unwrap();
        assert!(api.forgot_password("nobody@example.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_dev_login_returns_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/dev-login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "dev-tok"
            })))
            .mount(&server)
            .await;

        let api = FamilyApi::new(&config_for(&server)).unwrap();
        let session = api.dev_login("bob@example.com").await.unwrap();
        assert_eq!(session.token, "dev-tok");
    }
}
