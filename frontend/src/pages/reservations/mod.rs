use crate::{
    api::PaymentStatus,
    components::layout::{ErrorMessage, Layout, LoadingSpinner},
    utils::format::{format_currency, format_date_time},
};
use leptos::*;

pub mod repository;
pub mod utils;
pub mod view_model;

use utils::{payment_label, status_label, ReservationTab};
use view_model::ReservationsViewModel;

#[component]
pub fn ReservationsPage() -> impl IntoView {
    let vm = ReservationsViewModel::new();
    let tab = vm.tab;

    let tabs = ReservationTab::ALL
        .iter()
        .map(|&option| {
            view! {
                <button
                    class:font-bold=move || tab.get() == option
                    on:click=move |_| tab.set(option)
                >
                    {option.label()}
                </button>
            }
        })
        .collect_view();

    view! {
        <Layout>
            <nav class="flex gap-2">{tabs}</nav>
            <Suspense fallback=|| view! { <LoadingSpinner /> }>
                {move || {
                    vm.reservations_resource.get().map(|result| match result {
                        Err(err) => view! { <ErrorMessage message=err.user_message() /> }.into_view(),
                        Ok(_) => {
                            let rows = vm.visible.get();
                            if rows.is_empty() {
                                return view! { <p>"Sem reservas"</p> }.into_view();
                            }
                            rows.into_iter()
                                .map(|reservation| {
                                    let pending = reservation.payment_status == PaymentStatus::Pending;
                                    view! {
                                        <article>
                                            <p>{format_date_time(reservation.start_date)}" → "{format_date_time(reservation.end_date)}</p>
                                            <p>{status_label(reservation.status)}" · "{payment_label(reservation.payment_status)}</p>
                                            <p>{format_currency(reservation.amount_due())}</p>
                                            <Show when=move || pending>
                                                <button>"Pagar"</button>
                                            </Show>
                                        </article>
                                    }
                                })
                                .collect_view()
                        }
                    })
                }}
            </Suspense>
            <p>"Total pendente: "{move || format_currency(vm.pending_total.get())}</p>
        </Layout>
    }
}
