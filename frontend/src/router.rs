use leptos::*;
use leptos_router::*;

use crate::{
    components::guard::{root_stack, GuestOnly, RequireAuth, RootStack},
    components::layout::LoadingSpinner,
    pages::{
        dashboard::DashboardPage, login::LoginPage, password_recovery::PasswordRecoveryPage,
        profile::ProfilePage, register::RegisterPage, reservations::ReservationsPage,
        vehicles::VehiclesPage,
    },
    state::auth::{use_auth, AuthProvider},
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/login",
    "/register",
    "/password-recovery",
    "/dashboard",
    "/reservations",
    "/vehicles",
    "/profile",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/dashboard", "/reservations", "/vehicles", "/profile"];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/login", "/register", "/password-recovery"];

/// Landing path for each navigation stack.
pub fn home_path(stack: RootStack) -> Option<&'static str> {
    match stack {
        RootStack::Loading => None,
        RootStack::AuthStack => Some("/login"),
        RootStack::AppStack => Some("/dashboard"),
    }
}

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(crate::api::ApiClient::new());
    view! {
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=RootRedirect/>
                    <Route path="/login" view=PublicLogin/>
                    <Route path="/register" view=PublicRegister/>
                    <Route path="/password-recovery" view=PublicPasswordRecovery/>
                    <Route path="/dashboard" view=ProtectedDashboard/>
                    <Route path="/reservations" view=ProtectedReservations/>
                    <Route path="/vehicles" view=ProtectedVehicles/>
                    <Route path="/profile" view=ProtectedProfile/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn RootRedirect() -> impl IntoView {
    let (auth, _) = use_auth();
    view! {
        {move || match home_path(root_stack(&auth.get())) {
            Some(path) => view! { <Redirect path=path/> }.into_view(),
            None => view! { <LoadingSpinner /> }.into_view(),
        }}
    }
}

#[component]
fn PublicLogin() -> impl IntoView {
    view! { <GuestOnly><LoginPage/></GuestOnly> }
}

#[component]
fn PublicRegister() -> impl IntoView {
    view! { <GuestOnly><RegisterPage/></GuestOnly> }
}

#[component]
fn PublicPasswordRecovery() -> impl IntoView {
    view! { <GuestOnly><PasswordRecoveryPage/></GuestOnly> }
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! { <RequireAuth><DashboardPage/></RequireAuth> }
}

#[component]
fn ProtectedReservations() -> impl IntoView {
    view! { <RequireAuth><ReservationsPage/></RequireAuth> }
}

#[component]
fn ProtectedVehicles() -> impl IntoView {
    view! { <RequireAuth><VehiclesPage/></RequireAuth> }
}

#[component]
fn ProtectedProfile() -> impl IntoView {
    view! { <RequireAuth><ProfilePage/></RequireAuth> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn protected_and_public_routes_are_disjoint_subsets() {
        let all: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        for path in PROTECTED_ROUTE_PATHS.iter().chain(PUBLIC_ROUTE_PATHS) {
            assert!(all.contains(path), "route missing from ROUTE_PATHS: {}", path);
        }
        let public: HashSet<&str> = PUBLIC_ROUTE_PATHS.iter().copied().collect();
        assert!(PROTECTED_ROUTE_PATHS.iter().all(|p| !public.contains(p)));
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }

    #[test]
    fn each_stack_lands_on_its_home() {
        assert_eq!(home_path(RootStack::Loading), None);
        assert_eq!(home_path(RootStack::AuthStack), Some("/login"));
        assert_eq!(home_path(RootStack::AppStack), Some("/dashboard"));
        assert!(PROTECTED_ROUTE_PATHS.contains(&"/dashboard"));
    }
}
