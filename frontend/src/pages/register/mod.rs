use crate::{api::ProfileType, components::layout::ErrorMessage};
use leptos::{ev::SubmitEvent, *};

pub mod utils;
pub mod view_model;

use utils::RegisterStep;
use view_model::{use_register_view_model, RegisterViewModel};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let vm = use_register_view_model();

    view! {
        <section class="max-w-md mx-auto">
            {move || match vm.step.get() {
                RegisterStep::ChooseProfile => view! { <ProfileChoice vm=vm /> }.into_view(),
                RegisterStep::Details => view! { <DetailsForm vm=vm /> }.into_view(),
            }}
            <a href="/login">"Já tem conta? Entrar"</a>
        </section>
    }
}

#[component]
fn ProfileChoice(vm: RegisterViewModel) -> impl IntoView {
    view! {
        <h2>"Tipo de conta"</h2>
        <button on:click=move |_| vm.choose_profile(ProfileType::Particular)>"Particular"</button>
        <button on:click=move |_| vm.choose_profile(ProfileType::Empresa)>"Empresa"</button>
    }
}

#[component]
fn DetailsForm(vm: RegisterViewModel) -> impl IntoView {
    let form = vm.form;
    let pending = vm.sign_up_action.pending();
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <button on:click=move |_| vm.back()>"← Voltar"</button>
        <form on:submit=on_submit>
            <input placeholder="Nome Completo" prop:value=form.full_name
                on:input=move |ev| form.full_name.set(event_target_value(&ev)) />
            <input type="email" placeholder="Email" prop:value=form.email
                on:input=move |ev| form.email.set(event_target_value(&ev)) />
            <input placeholder="Telefone" prop:value=form.phone
                on:input=move |ev| form.phone.set(event_target_value(&ev)) />
            <input placeholder="NIF (Contribuinte)" prop:value=form.nif
                on:input=move |ev| form.nif.set(event_target_value(&ev)) />
            <input type="password" placeholder="Palavra-passe" prop:value=form.password
                on:input=move |ev| form.password.set(event_target_value(&ev)) />
            <input type="password" placeholder="Confirmar Palavra-passe" prop:value=form.confirm_password
                on:input=move |ev| form.confirm_password.set(event_target_value(&ev)) />
            {move || vm.error.get().map(|message| view! { <ErrorMessage message=message /> })}
            <button type="submit" disabled=move || pending.get()>"Criar Conta"</button>
        </form>
    }
}
