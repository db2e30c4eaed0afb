use crate::{
    components::layout::LoadingSpinner,
    state::auth::{use_auth, AuthState},
    utils::navigation,
};
use leptos::*;

/// Which navigation stack the shell shows for a given auth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootStack {
    Loading,
    AuthStack,
    AppStack,
}

pub fn root_stack(state: &AuthState) -> RootStack {
    match state {
        AuthState::Initializing => RootStack::Loading,
        AuthState::Authenticated(_) => RootStack::AppStack,
        AuthState::Unauthenticated => RootStack::AuthStack,
    }
}

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let stack = create_memo(move |_| root_stack(&auth.get()));
    create_effect(move |_| {
        if stack.get() == RootStack::AuthStack {
            navigation::redirect("/login");
        }
    });
    view! {
        <Show
            when=move || stack.get() == RootStack::AppStack
            fallback=move || {
                if stack.get() == RootStack::Loading {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

/// Keeps signed-in users away from the login and registration screens.
#[component]
pub fn GuestOnly(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let stack = create_memo(move |_| root_stack(&auth.get()));
    create_effect(move |_| {
        if stack.get() == RootStack::AppStack {
            navigation::redirect("/dashboard");
        }
    });
    view! {
        <Show when=move || stack.get() == RootStack::AuthStack fallback=|| view! { <LoadingSpinner /> }>
            {children()}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::{root_stack, RootStack};
    use crate::state::auth::AuthState;
    use crate::test_support::fixtures::profile;

    #[test]
    fn stack_follows_auth_state() {
        assert_eq!(root_stack(&AuthState::Initializing), RootStack::Loading);
        assert_eq!(root_stack(&AuthState::Unauthenticated), RootStack::AuthStack);
        assert_eq!(
            root_stack(&AuthState::Authenticated(profile("u1"))),
            RootStack::AppStack
        );
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::{GuestOnly, RequireAuth};
    use crate::state::auth::AuthState;
    use crate::test_support::{fixtures::profile, ssr::render_to_string};
    use leptos::*;

    fn provide_auth_state(state: AuthState) {
        provide_context(create_signal(state));
    }

    #[test]
    fn require_auth_renders_children_when_authenticated() {
        let html = render_to_string(move || {
            provide_auth_state(AuthState::Authenticated(profile("u1")));
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn require_auth_hides_children_when_unauthenticated() {
        let html = render_to_string(move || {
            provide_auth_state(AuthState::Unauthenticated);
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn require_auth_shows_loading_spinner_while_initializing() {
        let html = render_to_string(move || {
            provide_auth_state(AuthState::Initializing);
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("animate-spin"));
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn guest_only_hides_forms_from_signed_in_users() {
        let html = render_to_string(move || {
            provide_auth_state(AuthState::Authenticated(profile("u1")));
            view! {
                <GuestOnly>
                    {|| view! { <form>"login-form"</form> }}
                </GuestOnly>
            }
        });
        assert!(!html.contains("login-form"));
    }
}
