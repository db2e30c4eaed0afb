use super::{
    repository,
    utils::{
        VehicleForm, PHOTO_FAILED_MESSAGE, PHOTO_UPDATED_MESSAGE, VEHICLE_ADDED_MESSAGE,
        VEHICLE_ADD_FAILED_MESSAGE,
    },
};
use crate::api::{ApiError, Vehicle};
use crate::state::auth::{use_api_client, use_auth};
use leptos::*;

#[derive(Clone, Copy)]
pub struct VehicleFormState {
    pub license_plate: RwSignal<String>,
    pub brand: RwSignal<String>,
    pub model: RwSignal<String>,
    pub color: RwSignal<String>,
}

impl Default for VehicleFormState {
    fn default() -> Self {
        Self {
            license_plate: create_rw_signal(String::new()),
            brand: create_rw_signal(String::new()),
            model: create_rw_signal(String::new()),
            color: create_rw_signal(String::new()),
        }
    }
}

impl VehicleFormState {
    pub fn snapshot(&self) -> VehicleForm {
        VehicleForm {
            license_plate: self.license_plate.get_untracked(),
            brand: self.brand.get_untracked(),
            model: self.model.get_untracked(),
            color: self.color.get_untracked(),
        }
    }

    pub fn clear(&self) {
        self.license_plate.set(String::new());
        self.brand.set(String::new());
        self.model.set(String::new());
        self.color.set(String::new());
    }
}

#[derive(Clone, Copy)]
pub struct VehiclesViewModel {
    pub vehicles_resource: Resource<(Option<String>, u32), Result<Vec<Vehicle>, ApiError>>,
    pub form: VehicleFormState,
    pub show_form: RwSignal<bool>,
    pub message: RwSignal<Option<Result<String, String>>>,
    pub add_action: Action<VehicleForm, Result<Vehicle, ApiError>>,
    pub photo_action: Action<(String, Vec<u8>), Result<String, ApiError>>,
}

impl VehiclesViewModel {
    pub fn new() -> Self {
        let api = use_api_client();
        let (auth, _) = use_auth();
        let reload = create_rw_signal(0u32);
        let user_id = move || auth.get().user().map(|user| user.id.clone());

        let api_for_list = api.clone();
        let vehicles_resource = create_resource(
            move || (user_id(), reload.get()),
            move |(user_id, _)| {
                let api = api_for_list.clone();
                async move {
                    match user_id {
                        Some(id) => repository::list_vehicles(&api, &id).await,
                        None => Ok(Vec::new()),
                    }
                }
            },
        );

        let api_for_photo = api.clone();
        let add_action = create_action(move |form: &VehicleForm| {
            let api = api.clone();
            let form = form.clone();
            let user_id = auth.get_untracked().user().map(|user| user.id.clone());
            async move {
                let user_id = user_id.ok_or_else(|| ApiError::validation("Sessão expirada"))?;
                repository::add_vehicle(&api, &user_id, &form).await
            }
        });

        let photo_action = create_action(move |(vehicle_id, bytes): &(String, Vec<u8>)| {
            let api = api_for_photo.clone();
            let vehicle_id = vehicle_id.clone();
            let bytes = bytes.clone();
            let user_id = auth.get_untracked().user().map(|user| user.id.clone());
            async move {
                let user_id = user_id.ok_or_else(|| ApiError::validation("Sessão expirada"))?;
                repository::attach_photo(&api, &user_id, &vehicle_id, bytes).await
            }
        });

        let form = VehicleFormState::default();
        let show_form = create_rw_signal(false);
        let message = create_rw_signal(None);

        create_effect(move |_| {
            if let Some(result) = add_action.value().get() {
                match result {
                    Ok(_) => {
                        message.set(Some(Ok(VEHICLE_ADDED_MESSAGE.to_string())));
                        form.clear();
                        show_form.set(false);
                        reload.update(|n| *n += 1);
                    }
                    Err(err) => {
                        log::error!("Failed to add vehicle: {}", err);
                        message.set(Some(Err(VEHICLE_ADD_FAILED_MESSAGE.to_string())));
                    }
                }
            }
        });

        create_effect(move |_| {
            if let Some(result) = photo_action.value().get() {
                match result {
                    Ok(_) => {
                        message.set(Some(Ok(PHOTO_UPDATED_MESSAGE.to_string())));
                        reload.update(|n| *n += 1);
                    }
                    Err(err) => {
                        log::error!("Failed to upload vehicle photo: {}", err);
                        message.set(Some(Err(PHOTO_FAILED_MESSAGE.to_string())));
                    }
                }
            }
        });

        Self {
            vehicles_resource,
            form,
            show_form,
            message,
            add_action,
            photo_action,
        }
    }

    pub fn submit(&self) {
        match self.form.snapshot().validate() {
            Ok(valid) => {
                self.message.set(None);
                self.add_action.dispatch(valid);
            }
            Err(msg) => self.message.set(Some(Err(msg))),
        }
    }
}

impl Default for VehiclesViewModel {
    fn default() -> Self {
        Self::new()
    }
}
