use crate::{
    components::layout::{ErrorMessage, Layout, SuccessMessage},
    state::auth::use_auth,
    utils::{file, format::format_phone},
};
use leptos::{ev::SubmitEvent, *};

pub mod repository;
pub mod utils;
pub mod view_model;

use view_model::ProfileViewModel;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let vm = ProfileViewModel::new();
    let (auth, _) = use_auth();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.save_action.dispatch(vm.form());
    };

    let on_photo = move |ev: ev::Event| {
        if let Some(selected) = file::selected_file(&ev) {
            spawn_local(async move {
                if let Some(bytes) = file::read_bytes(selected).await {
                    vm.photo_action.dispatch(bytes);
                }
            });
        }
    };

    view! {
        <Layout>
            {move || vm.message.get().map(|message| match message {
                Ok(text) => view! { <SuccessMessage message=text /> }.into_view(),
                Err(text) => view! { <ErrorMessage message=text /> }.into_view(),
            })}
            {move || auth.get().user().cloned().map(|profile| view! {
                <section>
                    <h2>{profile.full_name.clone()}</h2>
                    <p>{profile.email.clone()}</p>
                    <p>{format_phone(&profile.phone)}</p>
                    <p>"NIF: "{profile.nif.clone()}</p>
                    {profile.profile_photo.clone().map(|src| view! { <img src=src alt="Foto de perfil" /> })}
                </section>
            })}
            <label>
                "Alterar foto"
                <input type="file" accept="image/*" on:change=on_photo />
            </label>
            <Show
                when=move || vm.editing.get()
                fallback=move || view! { <button on:click=move |_| vm.editing.set(true)>"Editar"</button> }
            >
                <form on:submit=on_submit>
                    <input placeholder="Nome Completo" prop:value=vm.full_name
                        on:input=move |ev| vm.full_name.set(event_target_value(&ev)) />
                    <input placeholder="Telefone" prop:value=vm.phone
                        on:input=move |ev| vm.phone.set(event_target_value(&ev)) />
                    <input placeholder="NIF (Contribuinte)" prop:value=vm.nif
                        on:input=move |ev| vm.nif.set(event_target_value(&ev)) />
                    <button type="submit" disabled=move || vm.save_action.pending().get()>"Guardar"</button>
                    <button type="button" on:click=move |_| vm.editing.set(false)>"Cancelar"</button>
                </form>
            </Show>
            <button on:click=move |_| vm.sign_out_action.dispatch(())>"Terminar sessão"</button>
        </Layout>
    }
}
