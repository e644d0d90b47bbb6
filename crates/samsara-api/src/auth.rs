// Record store authentication
//
// Password login against an auth collection. The returned token is stored
// on the client and attached as a bearer header to every later request.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::RecordClient;
use crate::error::Error;
use crate::types::AuthResponse;

impl RecordClient {
    /// Authenticate with identity (username or e-mail) and password.
    ///
    /// `POST collections/{collection}/auth-with-password`. On success the
    /// token is stored on this client.
    pub async fn authenticate(
        &self,
        collection: &str,
        identity: &str,
        password: &SecretString,
    ) -> Result<AuthResponse, Error> {
        debug!(collection, identity, "authenticating");

        let body = json!({
            "identity": identity,
            "password": password.expose_secret(),
        });

        let resp: AuthResponse = self
            .post_json(
                &format!("collections/{collection}/auth-with-password"),
                &body,
            )
            .await
            .map_err(|e| match e {
                Error::Api {
                    status, message, ..
                } if status == 400 || status == 403 => Error::Authentication {
                    message: format!("login failed (HTTP {status}): {message}"),
                },
                other => other,
            })?;

        self.set_token(SecretString::from(resp.token.clone()));
        debug!("authentication successful");
        Ok(resp)
    }

    /// Exchange the current token for a fresh one.
    ///
    /// `POST collections/{collection}/auth-refresh`
    pub async fn refresh_auth(&self, collection: &str) -> Result<AuthResponse, Error> {
        if !self.has_token() {
            return Err(Error::SessionExpired);
        }
        let resp: AuthResponse = self
            .post_json(
                &format!("collections/{collection}/auth-refresh"),
                &json!({}),
            )
            .await?;
        self.set_token(SecretString::from(resp.token.clone()));
        Ok(resp)
    }

    /// Ask the store to e-mail a password reset link.
    ///
    /// `POST collections/{collection}/request-password-reset`. The store
    /// answers 204 whether or not the address exists.
    pub async fn request_password_reset(&self, collection: &str, email: &str) -> Result<(), Error> {
        debug!(collection, email, "requesting password reset");
        self.post_empty(
            &format!("collections/{collection}/request-password-reset"),
            &json!({ "email": email }),
        )
        .await
    }

    /// Drop the local token. The store keeps no server-side session.
    pub fn logout(&self) {
        self.clear_token();
        debug!("session token cleared");
    }
}
