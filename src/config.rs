//! Configuration options for the ZenMotion client

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Value sent in the `X-Client-Info` header
pub const CLIENT_INFO: &str = concat!("zenmotion-rust/", env!("CARGO_PKG_VERSION"));

/// Configuration options for the ZenMotion client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The API base URL, including any path prefix such as `/api`
    pub base_url: String,

    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// The client info header value
    pub client_info: String,

    /// Where the logged-in user is persisted. `None` keeps it in memory only.
    pub session_file: Option<PathBuf>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Some(Duration::from_secs(30)),
            client_info: CLIENT_INFO.to_string(),
            session_file: None,
        }
    }
}

impl ClientOptions {
    /// Build options from the environment, loading `.env` first.
    ///
    /// Reads `API_BASE_URL`, `ZENMOTION_TIMEOUT_SECS` and `ZENMOTION_SESSION_FILE`.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let mut options = Self::default();

        if let Ok(url) = std::env::var("API_BASE_URL") {
            options = options.with_base_url(&url);
        }

        if let Ok(secs) = std::env::var("ZENMOTION_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::general(format!("ZENMOTION_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            options = options.with_request_timeout(Some(Duration::from_secs(secs)));
        }

        if let Ok(path) = std::env::var("ZENMOTION_SESSION_FILE") {
            options = options.with_session_file(path);
        }

        Ok(options)
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, value: &str) -> Self {
        self.base_url = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the client info header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }

    /// Persist the session to a file
    pub fn with_session_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.session_file = Some(path.into());
        self
    }
}
