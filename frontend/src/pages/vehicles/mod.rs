use crate::{
    components::layout::{ErrorMessage, Layout, LoadingSpinner, SuccessMessage},
    utils::file,
};
use leptos::{ev::SubmitEvent, *};

pub mod repository;
pub mod utils;
pub mod view_model;

use view_model::VehiclesViewModel;

#[component]
pub fn VehiclesPage() -> impl IntoView {
    let vm = VehiclesViewModel::new();
    let form = vm.form;

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <Layout>
            {move || vm.message.get().map(|message| match message {
                Ok(text) => view! { <SuccessMessage message=text /> }.into_view(),
                Err(text) => view! { <ErrorMessage message=text /> }.into_view(),
            })}
            <Suspense fallback=|| view! { <LoadingSpinner /> }>
                {move || vm.vehicles_resource.get().map(|result| match result {
                    Ok(vehicles) => vehicles
                        .into_iter()
                        .map(|vehicle| {
                            let is_primary = vehicle.is_primary;
                            let vehicle_id = vehicle.id.clone();
                            let on_photo = move |ev: ev::Event| {
                                let vehicle_id = vehicle_id.clone();
                                if let Some(selected) = file::selected_file(&ev) {
                                    spawn_local(async move {
                                        if let Some(bytes) = file::read_bytes(selected).await {
                                            vm.photo_action.dispatch((vehicle_id, bytes));
                                        }
                                    });
                                }
                            };
                            view! {
                                <article>
                                    <img src=vehicle.vehicle_photo alt="Viatura" />
                                    <p>{vehicle.brand}" "{vehicle.model}</p>
                                    <p>{vehicle.license_plate}" · "{vehicle.color}</p>
                                    <Show when=move || is_primary>
                                        <span>"Principal"</span>
                                    </Show>
                                    <input type="file" accept="image/*" on:change=on_photo />
                                </article>
                            }
                        })
                        .collect_view(),
                    Err(err) => view! { <ErrorMessage message=err.user_message() /> }.into_view(),
                })}
            </Suspense>
            <Show
                when=move || vm.show_form.get()
                fallback=move || view! {
                    <button on:click=move |_| vm.show_form.set(true)>"+ Adicionar Viatura"</button>
                }
            >
                <form on:submit=on_submit>
                    <input placeholder="Matrícula" prop:value=form.license_plate
                        on:input=move |ev| form.license_plate.set(event_target_value(&ev)) />
                    <input placeholder="Marca" prop:value=form.brand
                        on:input=move |ev| form.brand.set(event_target_value(&ev)) />
                    <input placeholder="Modelo" prop:value=form.model
                        on:input=move |ev| form.model.set(event_target_value(&ev)) />
                    <input placeholder="Cor" prop:value=form.color
                        on:input=move |ev| form.color.set(event_target_value(&ev)) />
                    <button type="submit" disabled=move || vm.add_action.pending().get()>"Guardar"</button>
                    <button type="button" on:click=move |_| vm.show_form.set(false)>"Cancelar"</button>
                </form>
            </Show>
        </Layout>
    }
}
