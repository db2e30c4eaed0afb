use super::{
    repository,
    utils::{filter_reservations, ReservationTab},
};
use crate::api::{total_pending, ApiError, Reservation};
use crate::state::auth::{use_api_client, use_auth};
use crate::utils::time::now_utc;
use leptos::*;

#[derive(Clone, Copy)]
pub struct ReservationsViewModel {
    pub reservations_resource: Resource<Option<String>, Result<Vec<Reservation>, ApiError>>,
    pub tab: RwSignal<ReservationTab>,
    pub visible: Memo<Vec<Reservation>>,
    pub pending_total: Memo<f64>,
}

impl ReservationsViewModel {
    pub fn new() -> Self {
        let api = use_api_client();
        let (auth, _) = use_auth();

        let reservations_resource = create_resource(
            move || auth.get().user().map(|user| user.id.clone()),
            move |user_id| {
                let api = api.clone();
                async move { repository::fetch_reservations(&api, user_id).await }
            },
        );

        let tab = create_rw_signal(ReservationTab::default());
        let loaded = move || {
            reservations_resource
                .get()
                .and_then(Result::ok)
                .unwrap_or_default()
        };
        let visible = create_memo(move |_| filter_reservations(&loaded(), tab.get(), now_utc()));
        let pending_total = create_memo(move |_| total_pending(&loaded()));

        Self {
            reservations_resource,
            tab,
            visible,
            pending_total,
        }
    }
}

impl Default for ReservationsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
