use std::time::Duration;

use url::Url;

use crate::Result;

pub const DEFAULT_ENDPOINT: &str = "https://api.saplo.com/rpc/json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Long-lived key pair exchanged for an access token.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new<S: Into<String>>(api_key: S, secret_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Reads `SAPLO_API_KEY` and `SAPLO_SECRET_KEY`.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("SAPLO_API_KEY").ok()?;
        let secret_key = std::env::var("SAPLO_SECRET_KEY").ok()?;
        Some(Self::new(api_key, secret_key))
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Url,
    pub timeout: Duration,
    /// refuse plain-http endpoints
    pub https_only: bool,
    /// emit request/response bodies as `debug` events
    pub trace_payloads: bool,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid url"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            https_only: true,
            trace_payloads: true,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn endpoint(mut self, endpoint: &str) -> Result<Self> {
        self.endpoint = Url::parse(endpoint)?;
        Ok(self)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn https_only(mut self, https_only: bool) -> Self {
        self.https_only = https_only;
        self
    }

    pub fn trace_payloads(mut self, trace_payloads: bool) -> Self {
        self.trace_payloads = trace_payloads;
        self
    }

    /// Endpoint with the token attached as `access_token`.
    pub(crate) fn post_url(&self, token: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("access_token", token);
        url
    }
}
