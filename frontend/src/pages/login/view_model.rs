use super::utils::{login_error_message, normalize_email, validate_credentials};
use crate::api::ApiError;
use crate::state::auth::{self, SignInRequest, SignOutcome};
use crate::utils::navigation;
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<String>>,
    pub login_action: Action<SignInRequest, Result<SignOutcome, ApiError>>,
}

impl LoginViewModel {
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        let email = normalize_email(&self.form.email.get_untracked());
        let password = self.form.password.get_untracked();
        if let Err(msg) = validate_credentials(&email, &password) {
            self.error.set(Some(msg));
            return;
        }
        self.error.set(None);
        self.login_action.dispatch(SignInRequest { email, password });
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<String>);
    let login_action = auth::use_sign_in_action();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(_) => {
                    error.set(None);
                    form.password.set(String::new());
                    navigation::redirect("/dashboard");
                }
                Err(err) => {
                    log::warn!("Sign-in failed: {}", err);
                    error.set(Some(login_error_message(&err)));
                }
            }
        }
    });

    LoginViewModel {
        form,
        error,
        login_action,
    }
}
