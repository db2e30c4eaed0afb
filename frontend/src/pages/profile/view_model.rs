use super::{
    repository,
    utils::{ProfileForm, PROFILE_UPDATED_MESSAGE, PROFILE_UPDATE_FAILED_MESSAGE},
};
use crate::api::{ApiError, UserProfile};
use crate::state::auth::{replace_profile, use_api_client, use_auth, use_sign_out_action};
use crate::utils::navigation;
use leptos::*;

#[derive(Clone, Copy)]
pub struct ProfileViewModel {
    pub editing: RwSignal<bool>,
    pub full_name: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub nif: RwSignal<String>,
    pub message: RwSignal<Option<Result<String, String>>>,
    pub save_action: Action<ProfileForm, Result<UserProfile, ApiError>>,
    pub photo_action: Action<Vec<u8>, Result<UserProfile, ApiError>>,
    pub sign_out_action: Action<(), Result<(), ApiError>>,
}

impl ProfileViewModel {
    pub fn new() -> Self {
        let api = use_api_client();
        let (auth, set_auth) = use_auth();

        let editing = create_rw_signal(false);
        let full_name = create_rw_signal(String::new());
        let phone = create_rw_signal(String::new());
        let nif = create_rw_signal(String::new());
        let message = create_rw_signal(None);

        create_effect(move |_| {
            if let Some(profile) = auth.get().user() {
                let form = ProfileForm::from_profile(profile);
                full_name.set(form.full_name);
                phone.set(form.phone);
                nif.set(form.nif);
            }
        });

        let api_for_save = api.clone();
        let save_action = create_action(move |form: &ProfileForm| {
            let api = api_for_save.clone();
            let form = form.clone();
            let current = auth.get_untracked().user().cloned();
            async move {
                let current = current.ok_or_else(|| ApiError::validation("Sessão expirada"))?;
                repository::save_profile(&api, &current, &form).await
            }
        });

        let photo_action = create_action(move |bytes: &Vec<u8>| {
            let api = api.clone();
            let bytes = bytes.clone();
            let user_id = auth.get_untracked().user().map(|user| user.id.clone());
            async move {
                let user_id = user_id.ok_or_else(|| ApiError::validation("Sessão expirada"))?;
                repository::change_photo(&api, &user_id, bytes).await
            }
        });

        create_effect(move |_| {
            if let Some(result) = save_action.value().get() {
                match result {
                    Ok(profile) => {
                        replace_profile(set_auth, profile);
                        editing.set(false);
                        message.set(Some(Ok(PROFILE_UPDATED_MESSAGE.to_string())));
                    }
                    Err(err) => {
                        log::error!("Profile update failed: {}", err);
                        message.set(Some(Err(PROFILE_UPDATE_FAILED_MESSAGE.to_string())));
                    }
                }
            }
        });

        create_effect(move |_| {
            if let Some(result) = photo_action.value().get() {
                match result {
                    Ok(profile) => replace_profile(set_auth, profile),
                    Err(err) => message.set(Some(Err(err.user_message()))),
                }
            }
        });

        let sign_out_action = use_sign_out_action();
        create_effect(move |_| {
            if sign_out_action.value().get().is_some() {
                navigation::redirect("/login");
            }
        });

        Self {
            editing,
            full_name,
            phone,
            nif,
            message,
            save_action,
            photo_action,
            sign_out_action,
        }
    }

    pub fn form(&self) -> ProfileForm {
        ProfileForm {
            full_name: self.full_name.get_untracked(),
            phone: self.phone.get_untracked(),
            nif: self.nif.get_untracked(),
        }
    }
}

impl Default for ProfileViewModel {
    fn default() -> Self {
        Self::new()
    }
}
