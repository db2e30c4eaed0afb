use crate::api::{ApiError, ApiErrorKind};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Preencha todos os campos";
pub const REGISTERED_NOTICE: &str =
    "Conta criada com sucesso. Verifique o seu email para confirmar (se aplicável).";

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(REQUIRED_FIELDS_MESSAGE.into());
    }
    Ok(())
}

/// Connectivity problems get their own text; anything else reads as bad
/// credentials.
pub fn login_error_message(err: &ApiError) -> String {
    match err.kind {
        ApiErrorKind::Network => err.user_message(),
        _ => ApiError::invalid_credentials(err.error.clone()).user_message(),
    }
}

pub fn just_registered(flag: Option<&str>) -> bool {
    matches!(flag, Some("1") | Some("true"))
}
