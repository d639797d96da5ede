#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::error::DownloadError;

pub const DOCUMENTATION_FILE_NAME: &str = "documentation.txt";
pub const COMMENTED_CODE_FILE_NAME: &str = "commented_code.py";
pub const PLAIN_TEXT: &str = "text/plain";

/// An in-memory file waiting to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFile {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl DownloadFile {
    /// `documentation.txt` holding `text` byte for byte.
    pub fn documentation(text: &str) -> Self {
        Self {
            file_name: DOCUMENTATION_FILE_NAME,
            mime_type: PLAIN_TEXT,
            bytes: text.as_bytes().to_vec(),
        }
    }

    /// `commented_code.py` holding `text` byte for byte.
    pub fn commented_code(text: &str) -> Self {
        Self {
            file_name: COMMENTED_CODE_FILE_NAME,
            mime_type: PLAIN_TEXT,
            bytes: text.as_bytes().to_vec(),
        }
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    fn extension(&self) -> &'static str {
        self.file_name.rsplit('.').next().unwrap_or_default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn write_to(&self, path: &std::path::Path) -> Result<(), DownloadError> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Hand `file` to the platform: a save dialog natively, a browser download on the web.
///
/// Failures are logged; the page is never touched.
pub fn save(file: &DownloadFile) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(file.file_name)
            .add_filter("Text", &[file.extension()])
            .save_file()
        else {
            log::info!("User cancelled save dialog.");
            return;
        };
        match file.write_to(&path) {
            Ok(()) => log::info!("{} saved to: {:?}", file.file_name, path),
            Err(e) => log::error!("Failed to save {}: {}", file.file_name, e),
        }
    }
    #[cfg(target_arch = "wasm32")]
    {
        match trigger_download(file) {
            Ok(()) => log::info!("Triggered download for {}", file.file_name),
            Err(e) => log::error!("Failed to download {}: {}", file.file_name, e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn trigger_download(file: &DownloadFile) -> Result<(), DownloadError> {
    let js_err = |e: wasm_bindgen::JsValue| DownloadError::Browser(format!("{:?}", e));

    let window = web_sys::window().ok_or_else(|| DownloadError::Browser("no global `window`".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DownloadError::Browser("no document on window".into()))?;
    let body = document
        .body()
        .ok_or_else(|| DownloadError::Browser("document has no body".into()))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(file.bytes.as_slice()));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(file.mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let link = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| DownloadError::Browser("created element is not an anchor".into()))?;
    link.set_href(&url);
    link.set_download(file.file_name);
    link.style().set_property("display", "none").map_err(js_err)?;

    let clicked = body.append_child(&link).map(|_| link.click());
    let _ = body.remove_child(&link);
    web_sys::Url::revoke_object_url(&url).map_err(js_err)?;
    clicked.map_err(js_err)
}
