use chrono::{DateTime, Utc};
use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    /// Unix timestamp (seconds). Filled from `expires_in` when the server omits it.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

fn default_token_type() -> String {
    "bearer".into()
}

impl Session {
    pub(crate) fn stamp_expiry(mut self, now: DateTime<Utc>) -> Self {
        if self.expires_at.is_none() && self.expires_in > 0 {
            self.expires_at = Some(now.timestamp() + self.expires_in);
        }
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .map(|at| at <= now.timestamp())
            .unwrap_or(false)
    }
}

/// Result of a sign-up call. `session` stays empty while the account waits for
/// email confirmation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthResponse {
    pub user: Option<AuthUser>,
    pub session: Option<Session>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    AdminEmpresa,
    GestorEmpresa,
    UtilizadorEmpresa,
    ClienteParticular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    Particular,
    Empresa,
}

impl ProfileType {
    /// Role granted to self-registered accounts of this profile type.
    pub fn default_role(self) -> UserRole {
        match self {
            ProfileType::Particular => UserRole::ClienteParticular,
            ProfileType::Empresa => UserRole::UtilizadorEmpresa,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub full_name: String,
    pub nif: String,
    #[serde(default)]
    pub profile_photo: Option<String>,
    pub role: UserRole,
    pub profile: ProfileType,
    #[serde(default)]
    pub company_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub rgpd_consent: bool,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserProfile {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub nif: String,
    pub role: UserRole,
    pub profile: ProfileType,
    pub rgpd_consent: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a profile row; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nif: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub user_id: String,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub color: String,
    #[serde(default)]
    pub vehicle_photo: String,
    #[serde(default)]
    pub document_photo: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub user_id: String,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub vehicle_photo: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub user_id: String,
    pub vehicle_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: ReservationStatus,
    #[serde(default)]
    pub spot_id: Option<String>,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub discount_percentage: f64,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Active status and `now` strictly inside the reserved window.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status == ReservationStatus::Active && self.start_date < now && self.end_date > now
    }

    pub fn amount_due(&self) -> f64 {
        self.discount_price.unwrap_or(0.0)
    }
}

/// Sum of the discounted price of every reservation still awaiting payment.
pub fn total_pending<'a>(reservations: impl IntoIterator<Item = &'a Reservation>) -> f64 {
    reservations
        .into_iter()
        .filter(|r| r.payment_status == PaymentStatus::Pending)
        .map(Reservation::amount_due)
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    Network,
    InvalidCredentials,
    NotFound,
    Validation,
    Backend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.user_message().into_view()
    }
}

/// Union of the error bodies returned by the auth, table and storage services.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    details: Option<Value>,
}

const NETWORK_MESSAGE: &str =
    "Falha de ligação ao servidor. Verifique sua internet e tente novamente.";
const INVALID_CREDENTIALS_MESSAGE: &str = "Email ou palavra-passe incorretos";
const NOT_FOUND_MESSAGE: &str = "Registo não encontrado.";
const GENERIC_MESSAGE: &str = "Ocorreu um erro. Tente novamente.";

impl ApiError {
    fn new(kind: ApiErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            error: msg.into(),
            code: None,
            details: None,
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, msg)
    }

    pub fn invalid_credentials(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidCredentials, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound, msg)
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, msg)
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Backend, msg)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is(&self, kind: ApiErrorKind) -> bool {
        self.kind == kind
    }

    /// Builds an error from a non-success response of any backend service.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

        let code = parsed.error_code.clone().or_else(|| match &parsed.code {
            Some(Value::String(code)) => Some(code.clone()),
            _ => None,
        });
        let code = code.or_else(|| parsed.error.clone());

        let message = parsed
            .error_description
            .or(parsed.msg)
            .or(parsed.message)
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        let kind = classify(status, code.as_deref(), &message);
        Self {
            kind,
            error: message,
            code,
            details: parsed.details,
        }
    }

    /// Localized text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self.kind {
            ApiErrorKind::Network => NETWORK_MESSAGE.into(),
            ApiErrorKind::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.into(),
            ApiErrorKind::Validation => self.error.clone(),
            ApiErrorKind::NotFound => NOT_FOUND_MESSAGE.into(),
            ApiErrorKind::Backend => GENERIC_MESSAGE.into(),
        }
    }
}

fn classify(status: u16, code: Option<&str>, message: &str) -> ApiErrorKind {
    match code {
        Some("invalid_grant")
        | Some("invalid_credentials")
        | Some("bad_jwt")
        | Some("session_not_found")
        | Some("refresh_token_not_found") => return ApiErrorKind::InvalidCredentials,
        Some("PGRST116") => return ApiErrorKind::NotFound,
        Some("validation_failed") | Some("weak_password") => return ApiErrorKind::Validation,
        _ => {}
    }
    match status {
        400 if message.contains("Invalid login credentials") => ApiErrorKind::InvalidCredentials,
        401 => ApiErrorKind::InvalidCredentials,
        404 | 406 => ApiErrorKind::NotFound,
        422 => ApiErrorKind::Validation,
        _ => ApiErrorKind::Backend,
    }
}
