use super::repository::request_recovery;
use super::utils::{validate_email, RecoveryMode, RECOVERY_FAILED_MESSAGE};
use crate::api::ApiError;
use crate::state::auth::use_api_client;
use leptos::*;

#[derive(Clone, Copy)]
pub struct PasswordRecoveryViewModel {
    pub email: RwSignal<String>,
    pub mode: RwSignal<RecoveryMode>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
    pub send_action: Action<(RecoveryMode, String), Result<(), ApiError>>,
}

impl PasswordRecoveryViewModel {
    pub fn submit(&self) {
        self.success.set(None);
        match validate_email(&self.email.get_untracked()) {
            Ok(email) => {
                self.error.set(None);
                self.send_action
                    .dispatch((self.mode.get_untracked(), email));
            }
            Err(msg) => self.error.set(Some(msg)),
        }
    }
}

pub fn use_password_recovery_view_model() -> PasswordRecoveryViewModel {
    let api = use_api_client();
    let email = create_rw_signal(String::new());
    let mode = create_rw_signal(RecoveryMode::default());
    let error = create_rw_signal(None::<String>);
    let success = create_rw_signal(None::<String>);

    let send_action = create_action(move |(mode, email): &(RecoveryMode, String)| {
        let api = api.clone();
        let mode = *mode;
        let email = email.clone();
        async move { request_recovery(&api, mode, &email).await }
    });

    create_effect(move |_| {
        if let Some(result) = send_action.value().get() {
            match result {
                Ok(()) => {
                    let sent_to = send_action
                        .input()
                        .get_untracked()
                        .map(|(_, email)| email)
                        .unwrap_or_else(|| email.get_untracked());
                    success.set(Some(mode.get_untracked().success_message(&sent_to)));
                }
                Err(err) => {
                    log::error!("Recovery email failed: {}", err);
                    error.set(Some(RECOVERY_FAILED_MESSAGE.to_string()));
                }
            }
        }
    });

    PasswordRecoveryViewModel {
        email,
        mode,
        error,
        success,
        send_action,
    }
}
