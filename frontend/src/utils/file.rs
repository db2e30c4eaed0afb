use wasm_bindgen::JsCast;
use web_sys::{Event, File, HtmlInputElement};

/// First file picked in the `<input type="file">` that fired `ev`.
pub fn selected_file(ev: &Event) -> Option<File> {
    let input = ev.target()?.dyn_into::<HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

pub async fn read_bytes(file: File) -> Option<Vec<u8>> {
    match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
        Ok(buffer) => Some(js_sys::Uint8Array::new(&buffer).to_vec()),
        Err(err) => {
            log::error!("Failed to read selected file: {:?}", err);
            None
        }
    }
}
