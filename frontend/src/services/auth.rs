use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::api::{
    ApiClient, ApiError, AuthResponse, AuthUser, NewUserProfile, ProfileType, Query, Session,
    UserRole,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationFields {
    pub full_name: String,
    pub phone: String,
    pub nif: String,
    pub role: UserRole,
    pub profile: ProfileType,
}

/// Creates the auth account and mirrors it into a `users` profile row.
pub async fn register(
    api: &ApiClient,
    email: &str,
    password: &str,
    fields: &RegistrationFields,
) -> Result<AuthResponse, ApiError> {
    let response = api.sign_up(email, password).await?;

    if let Some(user) = &response.user {
        let now = Utc::now();
        let row = NewUserProfile {
            id: user.id.clone(),
            email: email.to_string(),
            full_name: fields.full_name.clone(),
            phone: fields.phone.clone(),
            nif: fields.nif.clone(),
            role: fields.role,
            profile: fields.profile,
            rgpd_consent: true,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        api.insert("users", &row).await?;
    }

    Ok(response)
}

/// Password sign-in. Stamping `lastLogin` is best-effort.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<Session, ApiError> {
    let session = api.sign_in_with_password(email, password).await?;

    let stamp = json!({ "lastLogin": Utc::now() });
    if let Err(err) = api
        .update("users", &Query::new().eq("id", &session.user.id), &stamp)
        .await
    {
        log::warn!("Failed to record last login for {}: {}", session.user.id, err);
    }

    Ok(session)
}

pub async fn send_magic_link(api: &ApiClient, email: &str) -> Result<(), ApiError> {
    api.sign_in_with_otp(email).await
}

pub async fn reset_password(api: &ApiClient, email: &str) -> Result<(), ApiError> {
    api.reset_password_for_email(email).await
}

pub async fn current_user(api: &ApiClient) -> Result<Option<AuthUser>, ApiError> {
    api.get_user().await
}

pub async fn logout(api: &ApiClient) -> Result<(), ApiError> {
    api.sign_out().await
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::fixtures::session_json;
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use serde_json::json;

    fn api_for(server: &MockServer) -> ApiClient {
        ApiClient::new_with_config(&server.base_url(), "anon-key")
    }

    #[tokio::test]
    async fn register_mirrors_account_into_users_table() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/auth/v1/signup");
            then.status(200)
                .json_body(json!({ "id": "u1", "email": "ana@example.pt" }));
        });
        let insert = server.mock(|when, then| {
            when.method(POST).path("/rest/v1/users").json_body_partial(
                r#"{"id":"u1","email":"ana@example.pt","fullName":"Ana Silva","profile":"empresa","role":"utilizador_empresa","rgpdConsent":true,"isActive":true}"#,
            );
            then.status(201);
        });

        let fields = RegistrationFields {
            full_name: "Ana Silva".into(),
            phone: "912345678".into(),
            nif: "123456789".into(),
            role: UserRole::UtilizadorEmpresa,
            profile: ProfileType::Empresa,
        };
        let response = register(&api_for(&server), "ana@example.pt", "secret1", &fields)
            .await
            .unwrap();

        insert.assert_async().await;
        assert!(response.session.is_none());
    }

    #[tokio::test]
    async fn login_survives_last_login_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/auth/v1/token");
            then.status(200).json_body(session_json("u1"));
        });
        let stamp = server.mock(|when, then| {
            when.method(PATCH)
                .path("/rest/v1/users")
                .query_param("id", "eq.u1");
            then.status(500).json_body(json!({ "message": "down" }));
        });

        let session = login(&api_for(&server), "ana@example.pt", "secret1")
            .await
            .unwrap();

        stamp.assert_async().await;
        assert_eq!(session.user.id, "u1");
    }
}
