use super::{
    repository,
    utils::{DashboardSummary, DashboardWindow},
};
use crate::api::ApiError;
use crate::state::auth::{use_api_client, use_auth, use_sign_out_action};
use crate::utils::navigation;
use leptos::*;

#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    pub summary_resource: Resource<Option<String>, Result<Option<DashboardSummary>, ApiError>>,
    pub sign_out_action: Action<(), Result<(), ApiError>>,
}

impl DashboardViewModel {
    pub fn new() -> Self {
        let api = use_api_client();
        let (auth, _) = use_auth();

        let summary_resource = create_resource(
            move || auth.get().user().map(|user| user.id.clone()),
            move |user_id| {
                let api = api.clone();
                async move {
                    match user_id {
                        Some(id) => {
                            repository::fetch_dashboard(&api, &id, DashboardWindow::current())
                                .await
                                .map(Some)
                        }
                        None => Ok(None),
                    }
                }
            },
        );

        let sign_out_action = use_sign_out_action();
        create_effect(move |_| {
            if sign_out_action.value().get().is_some() {
                navigation::redirect("/login");
            }
        });

        Self {
            summary_resource,
            sign_out_action,
        }
    }
}

impl Default for DashboardViewModel {
    fn default() -> Self {
        Self::new()
    }
}
