use crate::components::layout::{ErrorMessage, SuccessMessage};
use leptos::{ev::SubmitEvent, *};
use leptos_router::use_query_map;

pub mod utils;
pub mod view_model;

use utils::{just_registered, REGISTERED_NOTICE};
use view_model::use_login_view_model;

#[component]
pub fn LoginPage() -> impl IntoView {
    let vm = use_login_view_model();
    let query = use_query_map();
    let show_notice = move || query.with(|q| just_registered(q.get("registered").map(String::as_str)));
    let pending = vm.login_action.pending();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <section class="max-w-md mx-auto">
            <h1>"Airpark"</h1>
            <p>"Bem-vindo de volta"</p>
            <form on:submit=on_submit>
                <input type="email" placeholder="seu.email@exemplo.com" prop:value=vm.form.email
                    on:input=move |ev| {
                        vm.form.email.set(event_target_value(&ev));
                        vm.error.set(None);
                    } />
                <input type="password" placeholder="Palavra-passe" prop:value=vm.form.password
                    on:input=move |ev| {
                        vm.form.password.set(event_target_value(&ev));
                        vm.error.set(None);
                    } />
                {move || vm.error.get().map(|message| view! { <ErrorMessage message=message /> })}
                <Show when=show_notice>
                    <SuccessMessage message=REGISTERED_NOTICE.to_string() />
                </Show>
                <button type="submit" disabled=move || pending.get()>"Entrar"</button>
            </form>
            <a href="/password-recovery">"Esqueceu a palavra-passe?"</a>
            <a href="/register">"Criar conta"</a>
        </section>
    }
}
