use crate::api::{ApiClient, ApiError};

pub const PROFILE_PHOTOS_BUCKET: &str = "profile_photos";
pub const VEHICLE_PHOTOS_BUCKET: &str = "vehicle_photos";

fn stamp_millis() -> i64 {
    crate::utils::time::now_utc().timestamp_millis()
}

async fn upload_jpeg(
    api: &ApiClient,
    bucket: &str,
    key: String,
    bytes: Vec<u8>,
) -> Result<String, ApiError> {
    api.upload(bucket, &key, bytes, "image/jpeg").await?;
    Ok(api.public_url(bucket, &key).await)
}

/// Stores a profile photo and returns its public URL.
pub async fn upload_profile_photo(
    api: &ApiClient,
    user_id: &str,
    bytes: Vec<u8>,
) -> Result<String, ApiError> {
    let key = format!("profile_{}_{}.jpg", user_id, stamp_millis());
    upload_jpeg(api, PROFILE_PHOTOS_BUCKET, key, bytes).await
}

/// Stores a vehicle photo and returns its public URL.
pub async fn upload_vehicle_photo(
    api: &ApiClient,
    user_id: &str,
    vehicle_id: &str,
    bytes: Vec<u8>,
) -> Result<String, ApiError> {
    let key = format!("vehicle_{}_{}_{}.jpg", user_id, vehicle_id, stamp_millis());
    upload_jpeg(api, VEHICLE_PHOTOS_BUCKET, key, bytes).await
}
