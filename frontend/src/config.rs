use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_SUPABASE_URL: &str = "http://localhost:54321";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(alias = "SUPABASE_URL")]
    pub supabase_url: String,
    #[serde(alias = "SUPABASE_ANON_KEY", default)]
    pub supabase_anon_key: String,
}

impl RuntimeConfig {
    pub fn new(supabase_url: impl Into<String>, supabase_anon_key: impl Into<String>) -> Self {
        Self {
            supabase_url: supabase_url.into().trim_end_matches('/').to_string(),
            supabase_anon_key: supabase_anon_key.into(),
        }
    }

    fn fallback() -> Self {
        Self::new(DEFAULT_SUPABASE_URL, "")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleConfig {
    pub locale: &'static str,
    pub time_zone: Tz,
    pub currency: &'static str,
    pub currency_symbol: &'static str,
}

pub const LOCALE: LocaleConfig = LocaleConfig {
    locale: "pt-PT",
    time_zone: chrono_tz::Europe::Lisbon,
    currency: "EUR",
    currency_symbol: "€",
};

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

fn cache_config(config: RuntimeConfig) -> RuntimeConfig {
    let _ = RUNTIME_CONFIG.set(config.clone());
    config
}

#[cfg(target_arch = "wasm32")]
mod source {
    use super::RuntimeConfig;

    fn read_key(obj: &js_sys::Object, upper: &str, lower: &str) -> Option<String> {
        js_sys::Reflect::get(obj, &upper.into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .or_else(|| js_sys::Reflect::get(obj, &lower.into()).ok())
            .and_then(|v| v.as_string())
    }

    /// `window.__AIRPARK_ENV = { SUPABASE_URL: "...", SUPABASE_ANON_KEY: "..." }`
    pub fn snapshot() -> Option<RuntimeConfig> {
        let window = web_sys::window()?;
        let any = js_sys::Reflect::get(&window, &"__AIRPARK_ENV".into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let obj = js_sys::Object::from(any);
        let url = read_key(&obj, "SUPABASE_URL", "supabase_url")?;
        let key = read_key(&obj, "SUPABASE_ANON_KEY", "supabase_anon_key").unwrap_or_default();
        Some(RuntimeConfig::new(url, key))
    }

    pub async fn fetch() -> Option<RuntimeConfig> {
        let origin = web_sys::window()?.location().origin().ok()?;
        let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        let cfg = resp.json::<RuntimeConfig>().await.ok()?;
        Some(RuntimeConfig::new(cfg.supabase_url, cfg.supabase_anon_key))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod source {
    use super::RuntimeConfig;

    pub fn snapshot() -> Option<RuntimeConfig> {
        let url = std::env::var("AIRPARK_SUPABASE_URL").ok()?;
        let key = std::env::var("AIRPARK_SUPABASE_ANON_KEY").unwrap_or_default();
        Some(RuntimeConfig::new(url, key))
    }

    pub async fn fetch() -> Option<RuntimeConfig> {
        None
    }
}

pub async fn await_runtime_config() -> RuntimeConfig {
    if let Some(cached) = RUNTIME_CONFIG.get() {
        return cached.clone();
    }
    if let Some(existing) = source::snapshot() {
        return cache_config(existing);
    }
    if let Some(fetched) = source::fetch().await {
        return cache_config(fetched);
    }
    log::warn!(
        "No backend configuration found, falling back to {}",
        DEFAULT_SUPABASE_URL
    );
    cache_config(RuntimeConfig::fallback())
}

pub async fn init() {
    let _ = await_runtime_config().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_config_trims_trailing_slash() {
        let cfg = RuntimeConfig::new("https://demo.supabase.co/", "anon");
        assert_eq!(cfg.supabase_url, "https://demo.supabase.co");
        assert_eq!(cfg.supabase_anon_key, "anon");
    }

    #[test]
    fn runtime_config_accepts_env_style_keys() {
        let cfg: RuntimeConfig = serde_json::from_str(
            r#"{"SUPABASE_URL":"https://demo.supabase.co","SUPABASE_ANON_KEY":"k"}"#,
        )
        .unwrap();
        assert_eq!(cfg, RuntimeConfig::new("https://demo.supabase.co", "k"));
    }

    #[test]
    fn locale_is_portuguese_euro() {
        assert_eq!(LOCALE.locale, "pt-PT");
        assert_eq!(LOCALE.currency, "EUR");
        assert_eq!(LOCALE.time_zone, chrono_tz::Europe::Lisbon);
    }
}
