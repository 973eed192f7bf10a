use std::ops::Deref;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Mutex, RwLock};

use crate::error::Error;
use crate::http::{HttpTransport, Transport};
use crate::jsonrpc::{self, Envelope, Params};
use crate::options::{ClientConfig, Credentials};
use crate::resources::{Account, Collection, Group, Text};
use crate::Result;

const ACCESS_TOKEN_METHOD: &str = "auth.accessToken";

/// An authenticated session. Cloning shares the token and transport.
pub struct Client<T = HttpTransport> {
    inner: Arc<ClientInner<T>>,
}

impl<T> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Deref for Client<T> {
    type Target = ClientInner<T>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Client<HttpTransport> {
    /// Connects over HTTPS and exchanges `credentials` for an access token.
    pub async fn connect(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(transport, credentials, config).await
    }
}

impl<T: Transport> Client<T> {
    /// Only an authenticated client is ever returned.
    pub async fn with_transport(
        transport: T,
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self> {
        let inner = ClientInner {
            transport,
            config,
            token: RwLock::new(String::new()),
            last_request: Mutex::new(None),
        };
        inner.authenticate(&credentials).await?;
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    pub fn account(&self) -> Account<T> {
        Account::new(self.clone())
    }

    pub fn collection(&self) -> Collection<T> {
        Collection::new(self.clone())
    }

    pub fn text(&self) -> Text<T> {
        Text::new(self.clone())
    }

    pub fn group(&self) -> Group<T> {
        Group::new(self.clone())
    }
}

pub struct ClientInner<T> {
    transport: T,
    config: ClientConfig,
    token: RwLock<String>,
    last_request: Mutex<Option<String>>,
}

impl<T: Transport> ClientInner<T> {
    /// Runs the key exchange and stores the new token.
    ///
    /// Returns the whole `auth.accessToken` result. The previous token stays
    /// in place if the exchange fails.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Value> {
        let mut params = Params::new();
        params.insert("api_key".into(), credentials.api_key.clone().into());
        params.insert("secret_key".into(), credentials.secret_key.clone().into());

        let result = self
            .invoke(ACCESS_TOKEN_METHOD, params)
            .await
            .map_err(|e| Error::Authentication(Box::new(e)))?;
        let token = match result.get("access_token") {
            Some(Value::String(token)) => token.clone(),
            Some(other) => {
                return Err(Error::Authentication(Box::new(Error::protocol(
                    "access_token is not a string",
                    &other.to_string(),
                ))))
            }
            None => {
                return Err(Error::Authentication(Box::new(Error::KeyNotFound(
                    "access_token".into(),
                ))))
            }
        };
        *self.token.write().await = token;
        tracing::info!("authenticated against {}", self.config.endpoint);
        Ok(result)
    }

    /// Sends `method` with `params` and returns the decoded result.
    ///
    /// `request_id` and `trim` entries of `params` are consumed locally: the
    /// first becomes the envelope id, the second picks one field out of the
    /// result map.
    pub async fn invoke(&self, method: &str, params: Params) -> Result<Value> {
        let envelope = Envelope::new(method, params);
        let request = envelope.to_json()?;
        if self.config.trace_payloads {
            tracing::debug!("JSON-Request: {}", envelope.to_log_json()?);
        }
        *self.last_request.lock().await = Some(request.clone());

        let response = self.post(request.clone()).await?;
        if self.config.trace_payloads {
            tracing::debug!("JSON-Response: {response}");
        }
        jsonrpc::interpret(&response, envelope.trim.as_deref(), &request).inspect_err(|e| {
            if let (true, Error::Rpc(rpc)) = (self.config.trace_payloads, e) {
                tracing::debug!("rpc error ({}) {}", rpc.code, rpc.message);
            }
        })
    }

    /// [`invoke`](Self::invoke) followed by typed decoding of the result.
    pub async fn invoke_as<R: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Params,
    ) -> Result<R> {
        let value = self.invoke(method, params).await?;
        serde_json::from_value(value).map_err(Error::Decode)
    }

    /// Sends a caller-built JSON-RPC body verbatim and returns the raw response.
    pub async fn raw_invoke(&self, json: &str) -> Result<String> {
        if self.config.trace_payloads {
            tracing::debug!("JSON-Request (raw): {json}");
        }
        let response = self.post(json.to_string()).await?;
        if self.config.trace_payloads {
            tracing::debug!("JSON-Response (raw): {response}");
        }
        Ok(response)
    }

    pub async fn access_token(&self) -> String {
        self.token.read().await.clone()
    }

    /// Body of the most recent [`invoke`](Self::invoke).
    pub async fn last_request(&self) -> Option<String> {
        self.last_request.lock().await.clone()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn post(&self, body: String) -> Result<String> {
        let url = {
            let token = self.token.read().await;
            self.config.post_url(&token)
        };
        self.transport.post(&url, body).await
    }
}
