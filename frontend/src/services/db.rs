use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    query::timestamp, ApiClient, ApiError, NewVehicle, ProfileUpdate, Query,
    Reservation, UserProfile, Vehicle,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Stamped<'a, T: Serialize> {
    #[serde(flatten)]
    changes: &'a T,
    updated_at: DateTime<Utc>,
}

pub async fn get_user(api: &ApiClient, user_id: &str) -> Result<UserProfile, ApiError> {
    api.select_single("users", &Query::new().eq("id", user_id))
        .await
}

pub async fn update_user(
    api: &ApiClient,
    user_id: &str,
    changes: &ProfileUpdate,
) -> Result<UserProfile, ApiError> {
    let stamped = Stamped {
        changes,
        updated_at: Utc::now(),
    };
    api.update_returning("users", &Query::new().eq("id", user_id), &stamped)
        .await
}

/// Vehicles of a user, primary vehicle first.
pub async fn get_user_vehicles(api: &ApiClient, user_id: &str) -> Result<Vec<Vehicle>, ApiError> {
    api.select(
        "vehicles",
        &Query::new().eq("userId", user_id).order("isPrimary", false),
    )
    .await
}

pub async fn add_vehicle(api: &ApiClient, vehicle: &NewVehicle) -> Result<Vehicle, ApiError> {
    api.insert_returning("vehicles", vehicle).await
}

/// All reservations of a user, latest start first.
pub async fn get_user_reservations(
    api: &ApiClient,
    user_id: &str,
) -> Result<Vec<Reservation>, ApiError> {
    api.select(
        "reservations",
        &Query::new().eq("userId", user_id).order("startDate", false),
    )
    .await
}

/// Active reservations whose window contains `now`, soonest-ending first.
pub async fn get_active_reservations(
    api: &ApiClient,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<Vec<Reservation>, ApiError> {
    let at = timestamp(now);
    api.select(
        "reservations",
        &Query::new()
            .eq("userId", user_id)
            .eq("status", "active")
            .lt("startDate", &at)
            .gt("endDate", &at)
            .order("endDate", true),
    )
    .await
}

/// Reservations starting between `now` and `until`, earliest first.
pub async fn get_upcoming_reservations(
    api: &ApiClient,
    user_id: &str,
    now: DateTime<Utc>,
    until: DateTime<Utc>,
) -> Result<Vec<Reservation>, ApiError> {
    api.select(
        "reservations",
        &Query::new()
            .eq("userId", user_id)
            .gte("startDate", timestamp(now))
            .lte("startDate", timestamp(until))
            .order("startDate", true),
    )
    .await
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PendingAmount {
    #[serde(default)]
    discount_price: Option<f64>,
}

/// Amount still owed across reservations with a pending payment.
pub async fn get_total_to_pay(api: &ApiClient, user_id: &str) -> Result<f64, ApiError> {
    let pending: Vec<PendingAmount> = api
        .select(
            "reservations",
            &Query::new()
                .select("discountPrice")
                .eq("userId", user_id)
                .eq("paymentStatus", "pending"),
        )
        .await?;
    Ok(pending
        .iter()
        .map(|row| row.discount_price.unwrap_or(0.0))
        .sum())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::fixtures::{fixed_now, profile_json, reservation_json, vehicle_json};
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use serde_json::json;

    fn api_for(server: &MockServer) -> ApiClient {
        ApiClient::new_with_config(&server.base_url(), "anon-key")
    }

    #[test]
    fn stamped_changes_only_carry_set_fields() {
        let changes = ProfileUpdate {
            phone: Some("911111111".into()),
            ..ProfileUpdate::default()
        };
        let body = serde_json::to_value(Stamped {
            changes: &changes,
            updated_at: fixed_now(),
        })
        .unwrap();
        assert_eq!(body["phone"], "911111111");
        assert_eq!(body["updatedAt"], "2025-03-10T12:00:00Z");
        assert!(body.get("fullName").is_none());
    }

    #[tokio::test]
    async fn active_reservations_filter_on_the_server() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/rest/v1/reservations")
                .query_param("userId", "eq.u1")
                .query_param("status", "eq.active")
                .query_param("startDate", "lt.2025-03-10T12:00:00.000Z")
                .query_param("endDate", "gt.2025-03-10T12:00:00.000Z")
                .query_param("order", "endDate.asc");
            then.status(200).json_body(json!([reservation_json(
                "r1",
                "2025-03-10T11:00:00Z",
                "2025-03-10T13:00:00Z",
                "paid",
                12.0
            )]));
        });

        let rows = get_active_reservations(&api_for(&server), "u1", fixed_now())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn upcoming_reservations_are_bounded_by_the_range() {
        let server = MockServer::start_async().await;
        let until = chrono::TimeZone::with_ymd_and_hms(&Utc, 2025, 3, 31, 22, 59, 59).unwrap();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/rest/v1/reservations")
                .query_param("startDate", "gte.2025-03-10T12:00:00.000Z")
                .query_param("order", "startDate.asc");
            then.status(200).json_body(json!([]));
        });

        let rows = get_upcoming_reservations(&api_for(&server), "u1", fixed_now(), until)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn total_to_pay_sums_pending_discount_prices() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET)
                .path("/rest/v1/reservations")
                .query_param("select", "discountPrice")
                .query_param("paymentStatus", "eq.pending");
            then.status(200).json_body(json!([
                { "discountPrice": 10.0 },
                { "discountPrice": null },
                { "discountPrice": 5.0 }
            ]));
        });

        let total = get_total_to_pay(&api_for(&server), "u1").await.unwrap();
        assert_eq!(total, 15.0);
    }

    #[tokio::test]
    async fn vehicles_are_listed_primary_first() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET)
                .path("/rest/v1/vehicles")
                .query_param("userId", "eq.u1")
                .query_param("order", "isPrimary.desc");
            then.status(200).json_body(json!([
                vehicle_json("v1", "u1", true),
                vehicle_json("v2", "u1", false)
            ]));
        });

        let vehicles = get_user_vehicles(&api_for(&server), "u1").await.unwrap();
        assert_eq!(vehicles.len(), 2);
        assert!(vehicles[0].is_primary);
    }

    #[tokio::test]
    async fn update_user_stamps_updated_at_and_returns_row() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(PATCH)
                .path("/rest/v1/users")
                .query_param("id", "eq.u1")
                .header("prefer", "return=representation")
                .json_body_partial(r#"{"phone":"911111111"}"#);
            then.status(200).json_body(profile_json("u1"));
        });

        let changes = ProfileUpdate {
            phone: Some("911111111".into()),
            ..ProfileUpdate::default()
        };
        let updated = update_user(&api_for(&server), "u1", &changes).await.unwrap();

        mock.assert_async().await;
        assert_eq!(updated.id, "u1");
    }
}
