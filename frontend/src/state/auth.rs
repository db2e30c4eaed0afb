use crate::{
    api::{ApiClient, ApiError, AuthEvents, AuthStateChange, UserProfile},
    services::{self, auth::RegistrationFields},
};
use leptos::*;

pub type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

/// Signed-in profile as seen by every screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AuthState {
    #[default]
    Initializing,
    Authenticated(UserProfile),
    Unauthenticated,
}

impl AuthState {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            AuthState::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Initializing)
    }

    fn from_profile(profile: Option<UserProfile>) -> Self {
        profile
            .map(AuthState::Authenticated)
            .unwrap_or(AuthState::Unauthenticated)
    }
}

/// `ConfirmationRequired` means the account exists but no session was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutcome {
    SignedIn,
    ConfirmationRequired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub fields: RegistrationFields,
}

async fn load_profile(api: &ApiClient, user_id: &str) -> Option<UserProfile> {
    match services::db::get_user(api, user_id).await {
        Ok(profile) => Some(profile),
        Err(err) => {
            log::warn!("No profile available for {}: {}", user_id, err);
            None
        }
    }
}

/// Resolves the startup state from any persisted session.
pub async fn initialize(api: &ApiClient, set_auth_state: WriteSignal<AuthState>) {
    let profile = match services::auth::current_user(api).await {
        Ok(Some(user)) => load_profile(api, &user.id).await,
        Ok(None) => None,
        Err(err) => {
            log::warn!("Failed to restore session: {}", err);
            None
        }
    };
    set_auth_state.set(AuthState::from_profile(profile));
}

/// Applies a session-change notification. The profile is always refetched.
pub async fn sync_session(
    api: &ApiClient,
    change: &AuthStateChange,
    set_auth_state: WriteSignal<AuthState>,
) {
    let profile = match &change.session {
        Some(session) => load_profile(api, &session.user.id).await,
        None => None,
    };
    set_auth_state.set(AuthState::from_profile(profile));
}

async fn establish_profile(
    api: &ApiClient,
    user_id: &str,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<SignOutcome, ApiError> {
    match services::db::get_user(api, user_id).await {
        Ok(profile) => {
            set_auth_state.set(AuthState::Authenticated(profile));
            Ok(SignOutcome::SignedIn)
        }
        Err(err) => {
            set_auth_state.set(AuthState::Unauthenticated);
            Err(err)
        }
    }
}

pub async fn sign_in(
    api: &ApiClient,
    email: &str,
    password: &str,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<SignOutcome, ApiError> {
    let session = services::auth::login(api, email, password).await?;
    establish_profile(api, &session.user.id, set_auth_state).await
}

/// Registers the account, then tries to sign straight in.
pub async fn sign_up(
    api: &ApiClient,
    email: &str,
    password: &str,
    fields: &RegistrationFields,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<SignOutcome, ApiError> {
    services::auth::register(api, email, password, fields).await?;

    match services::auth::login(api, email, password).await {
        Ok(session) => establish_profile(api, &session.user.id, set_auth_state).await,
        Err(err) => {
            log::info!("Account created for {}, sign-in deferred: {}", email, err);
            set_auth_state.set(AuthState::Unauthenticated);
            Ok(SignOutcome::ConfirmationRequired)
        }
    }
}

/// Local state ends up `Unauthenticated` whatever the backend answers.
pub async fn sign_out(
    api: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    let result = services::auth::logout(api).await;
    if let Err(err) = &result {
        log::warn!("Remote sign-out failed: {}", err);
    }
    set_auth_state.set(AuthState::Unauthenticated);
    result
}

/// Swaps in an edited profile while signed in.
pub fn replace_profile(set_auth_state: WriteSignal<AuthState>, profile: UserProfile) {
    set_auth_state.update(|state| {
        if state.is_authenticated() {
            *state = AuthState::Authenticated(profile);
        }
    });
}

async fn follow_session_changes(
    api: ApiClient,
    mut events: AuthEvents,
    set_auth_state: WriteSignal<AuthState>,
) {
    while let Some(change) = events.next().await {
        log::debug!("Session change: {:?}", change.event);
        sync_session(&api, &change, set_auth_state).await;
    }
}

fn create_auth_context(api: ApiClient) -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState::default());

    let api_for_init = api.clone();
    spawn_local(async move {
        initialize(&api_for_init, set_auth_state).await;
    });

    let (subscription, events) = api.on_auth_state_change();
    spawn_local(follow_session_changes(api, events, set_auth_state));
    on_cleanup(move || subscription.unsubscribe());

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let api = use_api_client();
    provide_context(api.clone());
    let ctx = create_auth_context(api);
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_else(ApiClient::new)
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub fn use_sign_in_action() -> Action<SignInRequest, Result<SignOutcome, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_api_client();

    create_action(move |request: &SignInRequest| {
        let request = request.clone();
        let api = api.clone();
        async move { sign_in(&api, &request.email, &request.password, set_auth).await }
    })
}

pub fn use_sign_up_action() -> Action<SignUpRequest, Result<SignOutcome, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_api_client();

    create_action(move |request: &SignUpRequest| {
        let request = request.clone();
        let api = api.clone();
        async move {
            sign_up(
                &api,
                &request.email,
                &request.password,
                &request.fields,
                set_auth,
            )
            .await
        }
    })
}

pub fn use_sign_out_action() -> Action<(), Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_api_client();

    create_action(move |_: &()| {
        let api = api.clone();
        async move { sign_out(&api, set_auth).await }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::profile;
    use leptos::create_runtime;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    #[test]
    fn use_auth_starts_initializing_without_context() {
        with_runtime(|| {
            let (state, _set_state) = use_auth();
            let snapshot = state.get();
            assert!(snapshot.is_loading());
            assert!(!snapshot.is_authenticated());
            assert!(snapshot.user().is_none());
        });
    }

    #[test]
    fn replace_profile_only_applies_while_signed_in() {
        with_runtime(|| {
            let (state, set_state) = create_signal(AuthState::Unauthenticated);
            replace_profile(set_state, profile("u1"));
            assert_eq!(state.get(), AuthState::Unauthenticated);

            set_state.set(AuthState::Authenticated(profile("u1")));
            let mut edited = profile("u1");
            edited.full_name = "Ana Costa".into();
            replace_profile(set_state, edited);
            assert_eq!(state.get().user().map(|u| u.full_name.clone()), Some("Ana Costa".into()));
        });
    }
}
