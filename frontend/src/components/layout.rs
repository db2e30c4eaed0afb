use crate::state::auth::use_auth;
use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _) = use_auth();
    let greeting = move || {
        auth.get()
            .user()
            .map(|user| format!("Olá, {}", user.full_name))
    };

    view! {
        <header class="bg-surface-elevated shadow">
            <div class="max-w-7xl mx-auto px-4 py-4 flex justify-between items-center">
                <a href="/dashboard" class="text-xl font-bold text-action-primary-bg">"Airpark"</a>
                <span class="text-sm text-fg-muted">{greeting}</span>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::auth::AuthState;
    use crate::test_support::{fixtures::profile, ssr::render_to_string};

    #[test]
    fn layout_greets_signed_in_user() {
        let html = render_to_string(move || {
            provide_context(create_signal(AuthState::Authenticated(profile("u1"))));
            view! { <Layout><p>"body"</p></Layout> }
        });
        assert!(html.contains("Olá, Ana Silva"));
        assert!(html.contains("body"));
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner />
                    <ErrorMessage message="falhou".into() />
                    <SuccessMessage message="guardado".into() />
                </div>
            }
        });
        assert!(html.contains("animate-spin"));
        assert!(html.contains("falhou"));
        assert!(html.contains("guardado"));
    }
}
