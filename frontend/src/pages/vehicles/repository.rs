use super::utils::{new_vehicle, VehicleForm};
use crate::api::{ApiClient, ApiError, Query, Vehicle};
use crate::services::{db, storage};
use serde_json::json;

pub async fn list_vehicles(api: &ApiClient, user_id: &str) -> Result<Vec<Vehicle>, ApiError> {
    db::get_user_vehicles(api, user_id).await
}

/// Adds a vehicle from a validated form, primary when it is the user's first.
pub async fn add_vehicle(
    api: &ApiClient,
    user_id: &str,
    form: &VehicleForm,
) -> Result<Vehicle, ApiError> {
    let existing = db::get_user_vehicles(api, user_id).await?;
    let vehicle = new_vehicle(user_id, form, &existing);
    db::add_vehicle(api, &vehicle).await
}

/// Uploads a photo and points the vehicle at it.
pub async fn attach_photo(
    api: &ApiClient,
    user_id: &str,
    vehicle_id: &str,
    bytes: Vec<u8>,
) -> Result<String, ApiError> {
    let url = storage::upload_vehicle_photo(api, user_id, vehicle_id, bytes).await?;
    api.update(
        "vehicles",
        &Query::new().eq("id", vehicle_id),
        &json!({ "vehiclePhoto": url }),
    )
    .await?;
    Ok(url)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::fixtures::vehicle_json;
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use serde_json::json;

    fn form() -> VehicleForm {
        VehicleForm {
            license_plate: "AA-00-BB".into(),
            brand: "Renault".into(),
            model: "Clio".into(),
            color: "Azul".into(),
        }
    }

    #[tokio::test]
    async fn first_vehicle_is_primary_and_second_is_not() {
        let server = MockServer::start_async().await;
        let api = ApiClient::new_with_config(&server.base_url(), "anon-key");

        let empty_list = server.mock(|when, then| {
            when.method(GET).path("/rest/v1/vehicles");
            then.status(200).json_body(json!([]));
        });
        let primary_insert = server.mock(|when, then| {
            when.method(POST)
                .path("/rest/v1/vehicles")
                .json_body_partial(r#"{"userId":"u1","licensePlate":"AA-00-BB","isPrimary":true}"#);
            then.status(201).json_body(vehicle_json("v1", "u1", true));
        });

        let first = add_vehicle(&api, "u1", &form()).await.unwrap();
        assert!(first.is_primary);
        primary_insert.assert_async().await;

        empty_list.delete_async().await;
        primary_insert.delete_async().await;

        server.mock(|when, then| {
            when.method(GET).path("/rest/v1/vehicles");
            then.status(200).json_body(json!([vehicle_json("v1", "u1", true)]));
        });
        let secondary_insert = server.mock(|when, then| {
            when.method(POST)
                .path("/rest/v1/vehicles")
                .json_body_partial(r#"{"isPrimary":false}"#);
            then.status(201).json_body(vehicle_json("v2", "u1", false));
        });

        let second = add_vehicle(&api, "u1", &form()).await.unwrap();
        assert!(!second.is_primary);
        secondary_insert.assert_async().await;
    }

    #[tokio::test]
    async fn attach_photo_updates_vehicle_row() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path_contains("/storage/v1/object/vehicle_photos/vehicle_u1_v1_");
            then.status(200).json_body(json!({ "Key": "ok" }));
        });
        let update = server.mock(|when, then| {
            when.method(PATCH)
                .path("/rest/v1/vehicles")
                .query_param("id", "eq.v1");
            then.status(204);
        });

        let api = ApiClient::new_with_config(&server.base_url(), "anon-key");
        let url = attach_photo(&api, "u1", "v1", vec![1, 2]).await.unwrap();

        update.assert_async().await;
        assert!(url.contains("/storage/v1/object/public/vehicle_photos/"));
    }
}
