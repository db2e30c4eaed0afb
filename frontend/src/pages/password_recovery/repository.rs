use super::utils::RecoveryMode;
use crate::api::{ApiClient, ApiError};
use crate::services::auth;

pub async fn request_recovery(
    api: &ApiClient,
    mode: RecoveryMode,
    email: &str,
) -> Result<(), ApiError> {
    match mode {
        RecoveryMode::ResetPassword => auth::reset_password(api, email).await,
        RecoveryMode::MagicLink => auth::send_magic_link(api, email).await,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::ApiErrorKind;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn each_mode_hits_its_endpoint() {
        let server = MockServer::start_async().await;
        let recover = server.mock(|when, then| {
            when.method(POST).path("/auth/v1/recover");
            then.status(200).json_body(json!({}));
        });
        let otp = server.mock(|when, then| {
            when.method(POST).path("/auth/v1/otp");
            then.status(200).json_body(json!({}));
        });
        let api = ApiClient::new_with_config(&server.base_url(), "anon-key");

        request_recovery(&api, RecoveryMode::ResetPassword, "ana@example.pt")
            .await
            .unwrap();
        assert_eq!(recover.hits_async().await, 1);
        assert_eq!(otp.hits_async().await, 0);

        request_recovery(&api, RecoveryMode::MagicLink, "ana@example.pt")
            .await
            .unwrap();
        assert_eq!(otp.hits_async().await, 1);
    }

    #[tokio::test]
    async fn rate_limited_request_is_an_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/auth/v1/recover");
            then.status(429)
                .json_body(json!({ "msg": "For security purposes, you can only request this once every 60 seconds" }));
        });
        let api = ApiClient::new_with_config(&server.base_url(), "anon-key");

        let err = request_recovery(&api, RecoveryMode::ResetPassword, "ana@example.pt")
            .await
            .unwrap_err();
        assert_ne!(err.kind, ApiErrorKind::Network);
    }
}
