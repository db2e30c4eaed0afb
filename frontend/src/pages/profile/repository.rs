use super::utils::{is_empty_update, ProfileForm};
use crate::api::{ApiClient, ApiError, ProfileUpdate, UserProfile};
use crate::services::{db, storage};

/// Saves the edited fields; an untouched form makes no request.
pub async fn save_profile(
    api: &ApiClient,
    current: &UserProfile,
    form: &ProfileForm,
) -> Result<UserProfile, ApiError> {
    let update = form.changes_from(current);
    if is_empty_update(&update) {
        return Ok(current.clone());
    }
    db::update_user(api, &current.id, &update).await
}

pub async fn change_photo(
    api: &ApiClient,
    user_id: &str,
    bytes: Vec<u8>,
) -> Result<UserProfile, ApiError> {
    let url = storage::upload_profile_photo(api, user_id, bytes).await?;
    let update = ProfileUpdate {
        profile_photo: Some(url),
        ..ProfileUpdate::default()
    };
    db::update_user(api, user_id, &update).await
}
