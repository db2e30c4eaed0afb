use super::utils::{summarize, DashboardSummary, DashboardWindow};
use crate::api::{ApiClient, ApiError};
use crate::services::db;

/// Issues the four dashboard queries side by side. The first failure wins.
pub async fn fetch_dashboard(
    api: &ApiClient,
    user_id: &str,
    window: DashboardWindow,
) -> Result<DashboardSummary, ApiError> {
    let (vehicles, active, upcoming, total_to_pay) = futures::join!(
        db::get_user_vehicles(api, user_id),
        db::get_active_reservations(api, user_id, window.now),
        db::get_upcoming_reservations(api, user_id, window.now, window.month_end),
        db::get_total_to_pay(api, user_id),
    );

    Ok(summarize(
        active?,
        upcoming?,
        total_to_pay?,
        vehicles?.len(),
        window,
    ))
}
