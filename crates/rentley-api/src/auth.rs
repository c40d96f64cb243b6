// Authentication endpoints
//
// Token-based login/logout and profile retrieval. A successful login
// installs the returned bearer token on the client; persistence of the
// token across processes is the caller's concern.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{LoginRequest, LoginResponse, RegisterRequest, UserDto};

impl ApiClient {
    /// Authenticate with username and password.
    ///
    /// `POST /auth/login` -- on success the returned token is installed
    /// on this client for subsequent requests. Rejections (401/403/400)
    /// surface as [`Error::Authentication`] rather than session expiry,
    /// since there is no session to expire yet.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, Error> {
        let url = self.api_url("auth/login")?;
        debug!(username, "logging in");

        let body = LoginRequest {
            username,
            password: password.expose_secret(),
        };

        // Bespoke response handling: the shared helpers treat 401 as an
        // expired session, which is the wrong diagnosis for a login.
        let resp = self
            .http_post_raw(url, &body)
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: if text.is_empty() {
                    format!("login rejected (HTTP {status})")
                } else {
                    text
                },
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let login: LoginResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;

        self.set_token(SecretString::from(login.token.clone()));
        debug!("login successful");
        Ok(login)
    }

    /// End the current session.
    ///
    /// `POST /auth/logout` -- the in-memory token is dropped regardless
    /// of whether the server call succeeds.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.api_url("auth/logout")?;
        debug!("logging out");

        let result = self.post_unit(url).await;
        self.clear_token();
        result
    }

    /// Fetch the authenticated user's profile.
    ///
    /// `GET /auth/profile`
    pub async fn profile(&self) -> Result<UserDto, Error> {
        let url = self.api_url("auth/profile")?;
        self.get(url).await
    }

    /// Register a new customer account.
    ///
    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), Error> {
        let url = self.api_url("auth/register")?;
        debug!(username = %request.username, "registering account");
        self.post_body_unit(url, request).await
    }

    /// Change the authenticated user's password.
    ///
    /// `POST /auth/change-password` -- form-encoded, matching the
    /// backend's parameter binding.
    pub async fn change_password(
        &self,
        old_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), Error> {
        let url = self.api_url("auth/change-password")?;
        let form = [
            ("oldPassword", old_password.expose_secret()),
            ("newPassword", new_password.expose_secret()),
        ];
        self.post_form_unit(url, &form).await
    }
}
