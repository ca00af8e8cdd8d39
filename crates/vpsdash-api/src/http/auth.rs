// HTTP backend authentication
//
// Bearer-token login/logout plus the register and password-reset flows.
// The token from a successful login is held in the backend's session slot
// and attached to every later request.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::Error;
use crate::http::client::HttpBackend;
use crate::types::{ActionResponse, LoginResponse};

impl HttpBackend {
    /// `POST /auth/login`. A 401 here means bad credentials, not an
    /// expired session.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, Error> {
        debug!(email, "logging in");

        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let resp: LoginResponse = self
            .post("auth/login", &body)
            .await
            .map_err(|e| match e {
                Error::SessionExpired | Error::Forbidden => Error::Authentication {
                    message: "incorrect email or password".into(),
                },
                Error::Rejected { message, .. } => Error::Authentication { message },
                other => other,
            })?;

        self.session
            .set(SecretString::from(resp.token.clone()));
        debug!(user_id = resp.user.id, "login successful");
        Ok(resp)
    }

    /// `POST /auth/logout`. The local token is dropped even when the
    /// backend call fails.
    pub async fn logout(&self) -> Result<(), Error> {
        debug!("logging out");
        let result: Result<Value, Error> = self.post("auth/logout", &json!({})).await;
        self.session.clear();
        result.map(|_| ())
    }

    /// `POST /auth/register`.
    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
        invite_code: Option<&str>,
    ) -> Result<ActionResponse, Error> {
        debug!(email, "registering");

        let mut body = json!({
            "email": email,
            "password": password.expose_secret(),
        });
        if let Some(code) = invite_code {
            body["inviteCode"] = Value::String(code.to_owned());
        }

        self.post("auth/register", &body).await
    }

    /// `POST /auth/reset-code`.
    pub async fn send_reset_code(&self, email: &str) -> Result<ActionResponse, Error> {
        debug!(email, "requesting password reset code");
        self.post("auth/reset-code", &json!({ "email": email }))
            .await
    }

    /// `POST /auth/reset-password`.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &SecretString,
    ) -> Result<ActionResponse, Error> {
        debug!(email, "resetting password");

        let body = json!({
            "email": email,
            "code": code,
            "password": new_password.expose_secret(),
        });

        self.post("auth/reset-password", &body).await
    }

    /// `POST /user/change-password`. The server ends the session on
    /// success, so the local token goes with it.
    pub async fn change_password(
        &self,
        current_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<ActionResponse, Error> {
        debug!("changing password");

        let body = json!({
            "oldPassword": current_password.expose_secret(),
            "newPassword": new_password.expose_secret(),
        });

        let resp: ActionResponse = self.post("user/change-password", &body).await?;
        self.session.clear();
        Ok(resp)
    }
}
