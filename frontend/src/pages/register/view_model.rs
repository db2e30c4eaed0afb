use super::utils::{
    registration_fields, validate_registration, RegisterForm, RegisterStep,
    REGISTER_FAILED_MESSAGE,
};
use crate::api::{ApiError, ProfileType};
use crate::state::auth::{self, SignOutcome, SignUpRequest};
use crate::utils::navigation;
use leptos::*;

#[derive(Clone, Copy)]
pub struct RegisterFormState {
    pub full_name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub nif: RwSignal<String>,
    pub password: RwSignal<String>,
    pub confirm_password: RwSignal<String>,
}

impl Default for RegisterFormState {
    fn default() -> Self {
        Self {
            full_name: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            phone: create_rw_signal(String::new()),
            nif: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
            confirm_password: create_rw_signal(String::new()),
        }
    }
}

impl RegisterFormState {
    pub fn snapshot(&self) -> RegisterForm {
        RegisterForm {
            full_name: self.full_name.get_untracked(),
            email: self.email.get_untracked().trim().to_lowercase(),
            phone: self.phone.get_untracked(),
            nif: self.nif.get_untracked(),
            password: self.password.get_untracked(),
            confirm_password: self.confirm_password.get_untracked(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct RegisterViewModel {
    pub step: RwSignal<RegisterStep>,
    pub profile: RwSignal<Option<ProfileType>>,
    pub form: RegisterFormState,
    pub error: RwSignal<Option<String>>,
    pub sign_up_action: Action<SignUpRequest, Result<SignOutcome, ApiError>>,
}

impl RegisterViewModel {
    pub fn choose_profile(&self, profile: ProfileType) {
        self.profile.set(Some(profile));
        self.step.set(RegisterStep::Details);
    }

    pub fn back(&self) {
        self.error.set(None);
        self.step.set(RegisterStep::ChooseProfile);
    }

    pub fn submit(&self) {
        let Some(profile) = self.profile.get_untracked() else {
            self.step.set(RegisterStep::ChooseProfile);
            return;
        };
        let form = self.form.snapshot();
        if let Err(msg) = validate_registration(&form) {
            self.error.set(Some(msg));
            return;
        }
        self.error.set(None);
        self.sign_up_action.dispatch(SignUpRequest {
            fields: registration_fields(&form, profile),
            email: form.email,
            password: form.password,
        });
    }
}

pub fn use_register_view_model() -> RegisterViewModel {
    let step = create_rw_signal(RegisterStep::default());
    let profile = create_rw_signal(None::<ProfileType>);
    let form = RegisterFormState::default();
    let error = create_rw_signal(None::<String>);
    let sign_up_action = auth::use_sign_up_action();

    create_effect(move |_| {
        if let Some(result) = sign_up_action.value().get() {
            match result {
                Ok(SignOutcome::SignedIn) => navigation::redirect("/dashboard"),
                Ok(SignOutcome::ConfirmationRequired) => {
                    navigation::redirect("/login?registered=1")
                }
                Err(err) => {
                    log::error!("Registration failed: {}", err);
                    error.set(Some(REGISTER_FAILED_MESSAGE.to_string()));
                }
            }
        }
    });

    RegisterViewModel {
        step,
        profile,
        form,
        error,
        sign_up_action,
    }
}
