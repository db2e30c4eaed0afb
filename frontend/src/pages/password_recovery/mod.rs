use crate::components::layout::{ErrorMessage, SuccessMessage};
use leptos::{ev::SubmitEvent, *};

pub mod repository;
pub mod utils;
pub mod view_model;

use utils::RecoveryMode;
use view_model::use_password_recovery_view_model;

#[component]
pub fn PasswordRecoveryPage() -> impl IntoView {
    let vm = use_password_recovery_view_model();
    let pending = vm.send_action.pending();
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <section class="max-w-md mx-auto">
            <h2>"Recuperar acesso"</h2>
            <div class="flex gap-2">
                {[RecoveryMode::ResetPassword, RecoveryMode::MagicLink]
                    .into_iter()
                    .map(|mode| view! {
                        <button
                            class:font-bold=move || vm.mode.get() == mode
                            on:click=move |_| vm.mode.set(mode)
                        >
                            {mode.label()}
                        </button>
                    })
                    .collect_view()}
            </div>
            <form on:submit=on_submit>
                <input type="email" placeholder="Email" prop:value=vm.email
                    on:input=move |ev| vm.email.set(event_target_value(&ev)) />
                {move || vm.error.get().map(|message| view! { <ErrorMessage message=message /> })}
                {move || vm.success.get().map(|message| view! { <SuccessMessage message=message /> })}
                <button type="submit" disabled=move || pending.get()>"Enviar"</button>
            </form>
            <a href="/login">"Voltar ao login"</a>
        </section>
    }
}
