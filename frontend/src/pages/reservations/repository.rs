use crate::api::{ApiClient, ApiError, Reservation};
use crate::services::db;

pub async fn fetch_reservations(
    api: &ApiClient,
    user_id: Option<String>,
) -> Result<Vec<Reservation>, ApiError> {
    match user_id {
        Some(id) => db::get_user_reservations(api, &id).await,
        None => Ok(Vec::new()),
    }
}
