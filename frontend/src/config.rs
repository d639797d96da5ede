/// Where the comment service listens unless told otherwise.
pub const DEFAULT_GENERATE_URL: &str = "http://127.0.0.1:5000/generate";

/// Environment variable that overrides [`DEFAULT_GENERATE_URL`] on native builds.
pub const GENERATE_URL_VAR: &str = "COMMENTER_GENERATE_URL";

/// Location of the service's generate endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub generate_url: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            generate_url: DEFAULT_GENERATE_URL.to_owned(),
        }
    }
}

impl Endpoint {
    pub fn new(generate_url: impl Into<String>) -> Self {
        Self {
            generate_url: generate_url.into(),
        }
    }

    /// Resolve the endpoint for this platform.
    ///
    /// Native builds read `.env` (if any) and then [`GENERATE_URL_VAR`];
    /// the browser build always talks to the default URL.
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Err(e) = dotenvy::dotenv() {
                log::debug!("No .env loaded: {}", e);
            }
            Self::from_override(std::env::var(GENERATE_URL_VAR).ok())
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self::default()
        }
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    fn from_override(value: Option<String>) -> Self {
        match value.map(|v| v.trim().to_owned()) {
            Some(url) if !url.is_empty() => {
                log::info!("Using generate endpoint from {}: {}", GENERATE_URL_VAR, url);
                Self::new(url)
            }
            _ => Self::default(),
        }
    }
}
