#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod fixtures {
    use crate::api::{
        PaymentStatus, ProfileType, Reservation, ReservationStatus, UserProfile, UserRole,
    };
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::{json, Value};

    pub fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    pub fn auth_user_json(id: &str) -> Value {
        json!({
            "id": id,
            "email": "ana@example.pt",
            "email_confirmed_at": "2025-01-02T10:00:00Z",
            "created_at": "2025-01-01T10:00:00Z"
        })
    }

    pub fn session_json(id: &str) -> Value {
        json!({
            "access_token": format!("access-{}", id),
            "refresh_token": format!("refresh-{}", id),
            "token_type": "bearer",
            "expires_in": 3600,
            "user": auth_user_json(id)
        })
    }

    pub fn profile_json(id: &str) -> Value {
        json!({
            "id": id,
            "email": "ana@example.pt",
            "phone": "912345678",
            "fullName": "Ana Silva",
            "nif": "123456789",
            "profilePhoto": null,
            "role": "cliente_particular",
            "profile": "particular",
            "companyId": null,
            "createdAt": "2025-01-01T10:00:00Z",
            "updatedAt": "2025-01-01T10:00:00Z",
            "rgpdConsent": true,
            "lastLogin": null,
            "isActive": true
        })
    }

    pub fn vehicle_json(id: &str, user_id: &str, is_primary: bool) -> Value {
        json!({
            "id": id,
            "userId": user_id,
            "licensePlate": "AA-00-BB",
            "brand": "Renault",
            "model": "Clio",
            "color": "Azul",
            "vehiclePhoto": "",
            "documentPhoto": null,
            "createdAt": "2025-01-05T10:00:00Z",
            "isPrimary": is_primary
        })
    }

    pub fn reservation_json(id: &str, start: &str, end: &str, payment: &str, price: f64) -> Value {
        json!({
            "id": id,
            "userId": "u1",
            "vehicleId": "v1",
            "startDate": start,
            "endDate": end,
            "status": "active",
            "spotId": null,
            "totalPrice": price,
            "discountPrice": price,
            "discountPercentage": 0.0,
            "paymentStatus": payment,
            "notes": null,
            "createdAt": "2025-01-01T10:00:00Z"
        })
    }

    pub fn profile(id: &str) -> UserProfile {
        UserProfile {
            id: id.into(),
            email: "ana@example.pt".into(),
            phone: "912345678".into(),
            full_name: "Ana Silva".into(),
            nif: "123456789".into(),
            profile_photo: None,
            role: UserRole::ClienteParticular,
            profile: ProfileType::Particular,
            company_id: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
            rgpd_consent: true,
            last_login: None,
            is_active: true,
        }
    }

    pub fn reservation(
        id: &str,
        status: ReservationStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Reservation {
        Reservation {
            id: id.into(),
            user_id: "u1".into(),
            vehicle_id: "v1".into(),
            start_date: start,
            end_date: end,
            status,
            spot_id: None,
            total_price: 20.0,
            discount_price: Some(18.0),
            discount_percentage: 10.0,
            payment_status: PaymentStatus::Paid,
            notes: None,
            created_at: start,
        }
    }
}
