use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION},
    Client, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use super::{
    events::{self, AuthChangeEvent, AuthEvents, AuthStateChange, AuthSubscription, ListenerRegistry},
    query::Query,
    types::{ApiError, Session},
};
use crate::{
    config::{self, RuntimeConfig},
    utils::storage,
};

pub(crate) const SESSION_STORAGE_KEY: &str = "airpark.auth.session";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Handle to the hosted backend: auth, tables and object storage.
///
/// Clones share the same session and listeners.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: Option<RuntimeConfig>,
    session: Rc<RefCell<Option<Session>>>,
    listeners: Rc<RefCell<ListenerRegistry>>,
}

thread_local! {
    static SHARED: ApiClient = ApiClient::detached(None);
}

impl ApiClient {
    /// The application-wide client; one session per app instance.
    pub fn new() -> Self {
        SHARED.with(|client| client.clone())
    }

    /// Independent client pinned to an explicit backend.
    pub fn new_with_config(supabase_url: &str, anon_key: &str) -> Self {
        Self::detached(Some(RuntimeConfig::new(supabase_url, anon_key)))
    }

    fn detached(config: Option<RuntimeConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
            session: Rc::new(RefCell::new(None)),
            listeners: Rc::new(RefCell::new(ListenerRegistry::default())),
        }
    }

    pub(crate) async fn resolved_config(&self) -> RuntimeConfig {
        match &self.config {
            Some(cfg) => cfg.clone(),
            None => config::await_runtime_config().await,
        }
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub(crate) fn access_token(&self) -> Option<String> {
        self.session
            .borrow()
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// Replaces the session, persists it and notifies every listener.
    pub(crate) fn set_session(&self, session: Option<Session>, event: AuthChangeEvent) {
        persist_session(session.as_ref());
        *self.session.borrow_mut() = session.clone();
        let change = AuthStateChange { event, session };
        self.listeners.borrow_mut().broadcast(&change);
    }

    /// Loads a previously persisted session without notifying listeners.
    pub fn restore_session(&self) -> Option<Session> {
        if let Some(existing) = self.current_session() {
            return Some(existing);
        }
        let raw = storage::get_item(SESSION_STORAGE_KEY)?;
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                *self.session.borrow_mut() = Some(session.clone());
                Some(session)
            }
            Err(err) => {
                log::warn!("Discarding unreadable stored session: {}", err);
                let _ = storage::remove_item(SESSION_STORAGE_KEY);
                None
            }
        }
    }

    /// Registers a session-change listener.
    pub fn on_auth_state_change(&self) -> (AuthSubscription, AuthEvents) {
        events::subscribe(&self.listeners)
    }

    pub(crate) fn headers(&self, cfg: &RuntimeConfig) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("apikey"),
            header_value(&cfg.supabase_anon_key)?,
        );
        let bearer = self
            .access_token()
            .unwrap_or_else(|| cfg.supabase_anon_key.clone());
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", bearer))?);
        Ok(headers)
    }

    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        request
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Request failed: {}", e)))
    }

    pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(format!("Failed to read response: {}", e)))?;
        if status.is_success() {
            serde_json::from_str(&body)
                .map_err(|e| ApiError::backend(format!("Failed to parse response: {}", e)))
        } else {
            Err(ApiError::from_response(status.as_u16(), &body))
        }
    }

    pub(crate) async fn expect_success(response: Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_response(status.as_u16(), &body))
    }

    fn table_url(cfg: &RuntimeConfig, table: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/rest/v1/{}", cfg.supabase_url, table)
        } else {
            format!("{}/rest/v1/{}?{}", cfg.supabase_url, table, query)
        }
    }

    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, ApiError> {
        let cfg = self.resolved_config().await;
        let headers = self.headers(&cfg)?;
        let url = Self::table_url(&cfg, table, &query.to_query_string(true));
        let response = self.execute(self.client.get(&url).headers(headers)).await?;
        Self::parse_json(response).await
    }

    /// Exactly one row; zero rows surface as a not-found error.
    pub async fn select_single<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<T, ApiError> {
        let cfg = self.resolved_config().await;
        let headers = self.headers(&cfg)?;
        let url = Self::table_url(&cfg, table, &query.to_query_string(true));
        let response = self
            .execute(
                self.client
                    .get(&url)
                    .headers(headers)
                    .header(ACCEPT, SINGLE_OBJECT),
            )
            .await?;
        Self::parse_json(response).await
    }

    pub async fn insert<B: Serialize + ?Sized>(&self, table: &str, row: &B) -> Result<(), ApiError> {
        let cfg = self.resolved_config().await;
        let headers = self.headers(&cfg)?;
        let url = Self::table_url(&cfg, table, "");
        let response = self
            .execute(
                self.client
                    .post(&url)
                    .headers(headers)
                    .header("Prefer", "return=minimal")
                    .json(row),
            )
            .await?;
        Self::expect_success(response).await
    }

    pub async fn insert_returning<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<T, ApiError> {
        let cfg = self.resolved_config().await;
        let headers = self.headers(&cfg)?;
        let url = Self::table_url(&cfg, table, "select=*");
        let response = self
            .execute(
                self.client
                    .post(&url)
                    .headers(headers)
                    .header("Prefer", "return=representation")
                    .header(ACCEPT, SINGLE_OBJECT)
                    .json(row),
            )
            .await?;
        Self::parse_json(response).await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        table: &str,
        query: &Query,
        changes: &B,
    ) -> Result<(), ApiError> {
        let cfg = self.resolved_config().await;
        let headers = self.headers(&cfg)?;
        let url = Self::table_url(&cfg, table, &query.to_query_string(false));
        let response = self
            .execute(
                self.client
                    .patch(&url)
                    .headers(headers)
                    .header("Prefer", "return=minimal")
                    .json(changes),
            )
            .await?;
        Self::expect_success(response).await
    }

    /// Updates the single row matching `query` and returns it.
    pub async fn update_returning<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
        changes: &B,
    ) -> Result<T, ApiError> {
        let cfg = self.resolved_config().await;
        let headers = self.headers(&cfg)?;
        let url = Self::table_url(&cfg, table, &query.to_query_string(true));
        let response = self
            .execute(
                self.client
                    .patch(&url)
                    .headers(headers)
                    .header("Prefer", "return=representation")
                    .header(ACCEPT, SINGLE_OBJECT)
                    .json(changes),
            )
            .await?;
        Self::parse_json(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn header_value(raw: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(raw).map_err(|_| ApiError::backend("Invalid header value"))
}

fn persist_session(session: Option<&Session>) {
    let result = match session {
        Some(session) => serde_json::to_string(session)
            .map_err(|e| e.to_string())
            .and_then(|raw| storage::set_item(SESSION_STORAGE_KEY, &raw)),
        None => storage::remove_item(SESSION_STORAGE_KEY),
    };
    if let Err(err) = result {
        log::warn!("Failed to persist session: {}", err);
    }
}
