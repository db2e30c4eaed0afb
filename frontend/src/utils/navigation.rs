/// Sends the browser to `path`; a no-op outside the browser.
pub fn redirect(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        log::debug!("redirect to {} skipped outside the browser", path);
    }
}
