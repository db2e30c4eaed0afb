pub const EMAIL_REQUIRED_MESSAGE: &str = "Insira seu email";
pub const RECOVERY_FAILED_MESSAGE: &str = "Erro ao enviar email de recuperação. Tente novamente.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecoveryMode {
    #[default]
    ResetPassword,
    MagicLink,
}

impl RecoveryMode {
    pub fn label(self) -> &'static str {
        match self {
            RecoveryMode::ResetPassword => "Redefinir palavra-passe",
            RecoveryMode::MagicLink => "Entrar com link mágico",
        }
    }

    pub fn success_message(self, email: &str) -> String {
        match self {
            RecoveryMode::ResetPassword => format!(
                "Enviámos um email para {} com instruções para redefinir a palavra-passe.",
                email
            ),
            RecoveryMode::MagicLink => {
                format!("Enviámos um link de acesso para {}.", email)
            }
        }
    }
}

pub fn validate_email(raw: &str) -> Result<String, String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(EMAIL_REQUIRED_MESSAGE.into());
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_email_is_rejected() {
        assert_eq!(validate_email("   ").unwrap_err(), EMAIL_REQUIRED_MESSAGE);
        assert_eq!(validate_email(" Ana@Example.pt ").unwrap(), "ana@example.pt");
    }

    #[test]
    fn success_message_names_the_address() {
        let msg = RecoveryMode::MagicLink.success_message("ana@example.pt");
        assert!(msg.contains("ana@example.pt"));
        assert_ne!(
            RecoveryMode::ResetPassword.success_message("a@b.pt"),
            RecoveryMode::MagicLink.success_message("a@b.pt")
        );
    }
}
