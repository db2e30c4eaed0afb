use crate::api::ProfileType;
use crate::services::auth::RegistrationFields;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Preencha todos os campos";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "As palavras-passe não coincidem";
pub const PASSWORD_TOO_SHORT_MESSAGE: &str = "A palavra-passe deve ter pelo menos 6 caracteres";
pub const INVALID_EMAIL_MESSAGE: &str = "Email inválido";
pub const REGISTER_FAILED_MESSAGE: &str = "Erro ao criar conta. Tente novamente.";

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegisterStep {
    #[default]
    ChooseProfile,
    Details,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub nif: String,
    pub password: String,
    pub confirm_password: String,
}

/// Checks run in order; the first failing one decides the message.
pub fn validate_registration(form: &RegisterForm) -> Result<(), String> {
    let required = [
        &form.full_name,
        &form.email,
        &form.phone,
        &form.nif,
        &form.password,
        &form.confirm_password,
    ];
    if required.iter().any(|value| value.trim().is_empty()) {
        return Err(REQUIRED_FIELDS_MESSAGE.into());
    }
    if form.password != form.confirm_password {
        return Err(PASSWORD_MISMATCH_MESSAGE.into());
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PASSWORD_TOO_SHORT_MESSAGE.into());
    }
    if !is_valid_email(form.email.trim()) {
        return Err(INVALID_EMAIL_MESSAGE.into());
    }
    Ok(())
}

/// `local@domain.tld` shape: one `@`, no whitespace, a dot inside the domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn registration_fields(form: &RegisterForm, profile: ProfileType) -> RegistrationFields {
    RegistrationFields {
        full_name: form.full_name.trim().to_string(),
        phone: form.phone.trim().to_string(),
        nif: form.nif.trim().to_string(),
        role: profile.default_role(),
        profile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UserRole;

    fn valid_form() -> RegisterForm {
        RegisterForm {
            full_name: "Ana Silva".into(),
            email: "ana@example.pt".into(),
            phone: "912345678".into(),
            nif: "123456789".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(validate_registration(&valid_form()).is_ok());
    }

    #[test]
    fn checks_apply_in_order() {
        let mut form = valid_form();
        form.nif.clear();
        form.confirm_password = "other".into();
        assert_eq!(validate_registration(&form).unwrap_err(), REQUIRED_FIELDS_MESSAGE);

        let mut form = valid_form();
        form.password = "abc".into();
        form.confirm_password = "abd".into();
        assert_eq!(validate_registration(&form).unwrap_err(), PASSWORD_MISMATCH_MESSAGE);

        let mut form = valid_form();
        form.password = "abc".into();
        form.confirm_password = "abc".into();
        form.email = "not-an-email".into();
        assert_eq!(validate_registration(&form).unwrap_err(), PASSWORD_TOO_SHORT_MESSAGE);

        let mut form = valid_form();
        form.email = "not-an-email".into();
        assert_eq!(validate_registration(&form).unwrap_err(), INVALID_EMAIL_MESSAGE);
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.pt"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.pt"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a b@c.pt"));
        assert!(!is_valid_email("@c.pt"));
        assert!(!is_valid_email("a@b@c.pt"));
    }

    #[test]
    fn role_follows_profile_type() {
        let fields = registration_fields(&valid_form(), ProfileType::Particular);
        assert_eq!(fields.role, UserRole::ClienteParticular);
        let fields = registration_fields(&valid_form(), ProfileType::Empresa);
        assert_eq!(fields.role, UserRole::UtilizadorEmpresa);
    }
}
