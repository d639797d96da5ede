use poll_promise::Promise;
use serde::{Deserialize, Serialize};

use crate::config::Endpoint;
use crate::error::ClientError;

/// Body the service expects: the raw source text, untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub code: String,
}

/// What the service sends back. Unknown fields are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenerateResponse {
    pub commented_code: String,
    pub documentation: String,
}

pub type GenerateResult = Result<GenerateResponse, ClientError>;

/// Build the POST for one generate click.
pub fn build_request(endpoint: &Endpoint, code: &str) -> ehttp::Request {
    let request_body = serde_json::json!({ "code": code });
    let mut request = ehttp::Request::post(
        endpoint.generate_url.as_str(),
        request_body.to_string().into_bytes(),
    );
    request.headers = ehttp::Headers::new(&[
        ("Accept", "application/json"),
        ("Content-Type", "application/json"),
    ]);
    request
}

/// Turn the raw HTTP outcome into a response or an error.
///
/// Anything outside 2xx is an error regardless of body.
pub fn decode(ok: bool, status: u16, status_text: &str, bytes: &[u8]) -> GenerateResult {
    if !ok {
        let err = ClientError::Status {
            status,
            status_text: status_text.to_owned(),
        };
        log::error!("{}", err);
        return Err(err);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => log::debug!("Attempting to parse JSON response: {}", text),
        Err(_) => log::warn!("Received non-UTF8 response body before parsing."),
    }

    serde_json::from_slice::<GenerateResponse>(bytes).map_err(|e| {
        log::error!("JSON parsing failed: {:?}. Raw response logged above.", e);
        ClientError::Decode(e)
    })
}

/// Send `code` to the service and wait for its answer.
pub async fn generate(endpoint: &Endpoint, code: &str) -> GenerateResult {
    let request = build_request(endpoint, code);
    log::info!(
        "Requesting POST generate to: {} ({} bytes of code)",
        endpoint.generate_url,
        code.len()
    );
    let response = ehttp::fetch_async(request).await?;
    decode(
        response.ok,
        response.status,
        &response.status_text,
        &response.bytes,
    )
}

/// Run [`generate`] in the background and repaint once it settles.
pub fn spawn_generate(ctx: &egui::Context, endpoint: Endpoint, code: String) -> Promise<GenerateResult> {
    let ctx = ctx.clone();

    #[cfg(not(target_arch = "wasm32"))]
    {
        Promise::spawn_thread("ehttp_generate_native", move || {
            let result = futures::executor::block_on(generate(&endpoint, &code));
            ctx.request_repaint();
            result
        })
    }
    #[cfg(target_arch = "wasm32")]
    {
        Promise::spawn_local(async move {
            let result = generate(&endpoint, &code).await;
            ctx.request_repaint();
            result
        })
    }
}
