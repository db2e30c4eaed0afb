use crate::api::Reservation;
use crate::utils::time::{end_of_month, now_utc};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time range the dashboard looks at: from `now` to the end of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardWindow {
    pub now: DateTime<Utc>,
    pub month_end: DateTime<Utc>,
}

impl DashboardWindow {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            month_end: end_of_month(now),
        }
    }

    pub fn current() -> Self {
        Self::at(now_utc())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub active_reservations: Vec<Reservation>,
    pub upcoming_reservations: Vec<Reservation>,
    pub total_to_pay: f64,
    pub vehicle_count: usize,
}

impl DashboardSummary {
    pub fn active_count(&self) -> usize {
        self.active_reservations.len()
    }
}

/// Assembles the summary, keeping only rows inside their windows:
/// active soonest-ending first, upcoming earliest-starting first.
pub fn summarize(
    active: Vec<Reservation>,
    upcoming: Vec<Reservation>,
    total_to_pay: f64,
    vehicle_count: usize,
    window: DashboardWindow,
) -> DashboardSummary {
    let mut active: Vec<Reservation> = active
        .into_iter()
        .filter(|r| r.is_active_at(window.now))
        .collect();
    active.sort_by_key(|r| r.end_date);

    let mut upcoming: Vec<Reservation> = upcoming
        .into_iter()
        .filter(|r| r.start_date >= window.now && r.start_date <= window.month_end)
        .collect();
    upcoming.sort_by_key(|r| r.start_date);

    DashboardSummary {
        active_reservations: active,
        upcoming_reservations: upcoming,
        total_to_pay,
        vehicle_count,
    }
}
