use serde::Deserialize;
use serde_json::{json, Value};

use super::{
    client::ApiClient,
    events::AuthChangeEvent,
    types::{ApiError, ApiErrorKind, AuthResponse, AuthUser, Session},
};
use crate::utils::time::now_utc;

/// The signup endpoint answers with a full session when the account is usable
/// right away, or with the bare user while email confirmation is pending.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    Session(Session),
    User(AuthUser),
}

impl ApiClient {
    async fn auth_post(&self, path: &str, body: &Value) -> Result<reqwest::Response, ApiError> {
        let cfg = self.resolved_config().await;
        let headers = self.headers(&cfg)?;
        self.execute(
            self.http_client()
                .post(format!("{}/auth/v1/{}", cfg.supabase_url, path))
                .headers(headers)
                .json(body),
        )
        .await
    }

    async fn token_grant(&self, grant_type: &str, body: &Value) -> Result<Session, ApiError> {
        let response = self
            .auth_post(&format!("token?grant_type={}", grant_type), body)
            .await?;
        let session: Session = Self::parse_json(response).await?;
        Ok(session.stamp_expiry(now_utc()))
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let response = self
            .auth_post("signup", &json!({ "email": email, "password": password }))
            .await?;
        match Self::parse_json::<SignUpBody>(response).await? {
            SignUpBody::Session(session) => {
                let session = session.stamp_expiry(now_utc());
                self.set_session(Some(session.clone()), AuthChangeEvent::SignedIn);
                Ok(AuthResponse {
                    user: Some(session.user.clone()),
                    session: Some(session),
                })
            }
            SignUpBody::User(user) => Ok(AuthResponse {
                user: Some(user),
                session: None,
            }),
        }
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        let session = self
            .token_grant(
                "password",
                &json!({ "email": email, "password": password }),
            )
            .await?;
        self.set_session(Some(session.clone()), AuthChangeEvent::SignedIn);
        Ok(session)
    }

    pub async fn refresh_session(&self) -> Result<Session, ApiError> {
        let refresh_token = self
            .current_session()
            .map(|s| s.refresh_token)
            .ok_or_else(|| ApiError::validation("No refresh token"))?;
        let session = self
            .token_grant("refresh_token", &json!({ "refresh_token": refresh_token }))
            .await?;
        self.set_session(Some(session.clone()), AuthChangeEvent::TokenRefreshed);
        Ok(session)
    }

    /// Ends the session. The local session is always cleared; the remote
    /// failure, if any, is still returned.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        let result = match self.access_token() {
            Some(_) => match self.auth_post("logout", &json!({})).await {
                Ok(response) => Self::expect_success(response).await,
                Err(err) => Err(err),
            },
            None => Ok(()),
        };
        self.set_session(None, AuthChangeEvent::SignedOut);
        result
    }

    /// User behind the current session, refreshing an expired token first.
    pub async fn get_user(&self) -> Result<Option<AuthUser>, ApiError> {
        let Some(session) = self.restore_session() else {
            return Ok(None);
        };
        if session.is_expired(now_utc()) {
            log::debug!("Access token expired, refreshing session");
            if let Err(err) = self.refresh_session().await {
                self.discard_rejected_session(&err);
                return Err(err);
            }
        }

        let cfg = self.resolved_config().await;
        let headers = self.headers(&cfg)?;
        let response = self
            .execute(
                self.http_client()
                    .get(format!("{}/auth/v1/user", cfg.supabase_url))
                    .headers(headers),
            )
            .await?;
        let user = Self::parse_json::<AuthUser>(response).await;
        if let Err(err) = &user {
            self.discard_rejected_session(err);
        }
        user.map(Some)
    }

    /// Signs out locally when the backend refuses the stored tokens, so later
    /// requests fall back to the anon key. Transient failures keep the session.
    fn discard_rejected_session(&self, err: &ApiError) {
        if err.kind == ApiErrorKind::InvalidCredentials {
            log::warn!("Stored session rejected, clearing it: {}", err);
            self.set_session(None, AuthChangeEvent::SignedOut);
        }
    }

    pub async fn reset_password_for_email(&self, email: &str) -> Result<(), ApiError> {
        let response = self.auth_post("recover", &json!({ "email": email })).await?;
        Self::expect_success(response).await
    }

    pub async fn sign_in_with_otp(&self, email: &str) -> Result<(), ApiError> {
        let response = self
            .auth_post("otp", &json!({ "email": email, "create_user": true }))
            .await?;
        Self::expect_success(response).await
    }
}
