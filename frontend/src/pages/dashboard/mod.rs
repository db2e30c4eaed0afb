use crate::{
    components::layout::{ErrorMessage, Layout, LoadingSpinner},
    utils::format::{format_currency, format_date, DateStyle},
};
use leptos::*;

pub mod repository;
pub mod utils;
pub mod view_model;

use utils::DashboardSummary;
use view_model::DashboardViewModel;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let vm = DashboardViewModel::new();
    let summary_resource = vm.summary_resource;

    view! {
        <Layout>
            <Suspense fallback=|| view! { <LoadingSpinner /> }>
                {move || {
                    summary_resource
                        .get()
                        .map(|result| match result {
                            Ok(Some(summary)) => view! { <SummaryCards summary=summary /> }.into_view(),
                            Ok(None) => ().into_view(),
                            Err(err) => view! { <ErrorMessage message=err.user_message() /> }.into_view(),
                        })
                }}
            </Suspense>
            <button on:click=move |_| vm.sign_out_action.dispatch(())>"Terminar sessão"</button>
        </Layout>
    }
}

#[component]
fn SummaryCards(summary: DashboardSummary) -> impl IntoView {
    let active_count = summary.active_count();
    let upcoming = summary
        .upcoming_reservations
        .iter()
        .map(|reservation| {
            view! { <li>{format_date(reservation.start_date, DateStyle::Full)}</li> }
        })
        .collect_view();

    view! {
        <section class="grid gap-4">
            <div><h3>"Reservas ativas"</h3><p>{active_count}</p></div>
            <div><h3>"Próximas reservas"</h3><ul>{upcoming}</ul></div>
            <div><h3>"Total a pagar"</h3><p>{format_currency(summary.total_to_pay)}</p></div>
            <div><h3>"Viaturas"</h3><p>{summary.vehicle_count}</p><a href="/vehicles">"Gerir viaturas"</a></div>
        </section>
    }
}
