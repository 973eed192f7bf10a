use std::future::Future;

use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::options::ClientConfig;
use crate::Result;

/// Carries one request body to the service and hands back the response body.
///
/// Implementations must not interpret the body: a JSON-RPC error sent with a
/// non-2xx status is still a response, not a transport failure.
pub trait Transport: Send + Sync + 'static {
    fn post(&self, url: &Url, body: String) -> impl Future<Output = Result<String>> + Send;
}

/// HTTPS POST over reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .https_only(config.https_only)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn post(&self, url: &Url, body: String) -> Result<String> {
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("http status {status} from {}", url.path());
        }
        Ok(response.text().await?)
    }
}
