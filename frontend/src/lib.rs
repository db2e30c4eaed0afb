pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", err).into());
    }
}

/// Starts the app: panic hook, logging, runtime config, then the router.
pub fn bootstrap() {
    console_error_panic_hook::set_once();
    init_logging();
    log::info!("Starting Airpark frontend");

    leptos::spawn_local(async move {
        config::init().await;
        log::debug!("Runtime config initialized");
    });

    router::mount_app();
}
