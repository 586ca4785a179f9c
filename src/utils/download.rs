use crate::models::error::AppError;
use crate::models::sessions::ExportFile;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Array, JsString};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Hands `file` to the browser as a download.
pub fn save_file(file: &ExportFile) -> Result<(), AppError> {
    let parts = Array::of1(&JsString::from(file.contents.as_str()));
    let options = BlobPropertyBag::new();
    options.set_type(file.mime_type);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|_| AppError::Config("Unable to create download".to_string()))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| AppError::Config("Unable to create download link".to_string()))?;

    let result = click_link(&url, &file.filename);
    // Revoke even if the click failed
    let _ = Url::revoke_object_url(&url);
    result
}

fn click_link(url: &str, filename: &str) -> Result<(), AppError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| AppError::Config("No document available".to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| AppError::Config("Document has no body".to_string()))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| AppError::Config("Unable to create link".to_string()))?
        .dyn_into()
        .map_err(|_| AppError::Config("Unexpected element type".to_string()))?;
    anchor.set_href(url);
    anchor.set_download(filename);

    body.append_child(&anchor)
        .map_err(|_| AppError::Config("Unable to attach link".to_string()))?;
    anchor.click();
    let _ = body.remove_child(&anchor);
    Ok(())
}
