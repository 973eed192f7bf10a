use serde_with::{serde_as, DisplayFromStr, PickFirst};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Rpc error {0}")]
    Rpc(RpcError),
    #[error("Protocol error: {reason}")]
    Protocol { reason: String, body: String },
    #[error("Authentication failed: {0}")]
    Authentication(#[source] Box<Error>),
    #[error("Key `{0}` not found in result")]
    KeyNotFound(String),
    #[error("Decode error {0}")]
    Decode(serde_json::Error),
    #[error("Encode error {0}")]
    Encode(serde_json::Error),
    #[error("Transport error {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid endpoint {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl Error {
    pub(crate) fn protocol(reason: impl Into<String>, body: &str) -> Self {
        Error::Protocol {
            reason: reason.into(),
            body: body.to_string(),
        }
    }

    /// The failed call's server error, looking through an authentication failure.
    pub fn as_rpc(&self) -> Option<&RpcError> {
        match self {
            Error::Rpc(err) => Some(err),
            Error::Authentication(inner) => inner.as_rpc(),
            _ => None,
        }
    }
}

/// Server reported failure, together with the request text that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    pub request: String,
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RpcError: {{\"code\": {}, \"message\": \"{}\"}}",
            self.code, self.message
        )
    }
}
impl std::error::Error for RpcError {}

/// `error` member of a response. Saplo names the text `msg`.
#[serde_as]
#[derive(serde::Deserialize, Debug, Clone)]
pub(crate) struct ErrorObject {
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub code: i64,
    #[serde(alias = "message", default)]
    pub msg: String,
}

impl ErrorObject {
    pub(crate) fn into_error(self, request: &str) -> Error {
        Error::Rpc(RpcError {
            code: self.code,
            message: self.msg,
            request: request.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_object_accepts_string_code_and_message_alias() {
        let obj: ErrorObject =
            serde_json::from_str(r#"{"code": "401", "message": "bad token"}"#).unwrap();
        assert_eq!(obj.code, 401);
        assert_eq!(obj.msg, "bad token");
    }

    #[test]
    fn rpc_error_keeps_request_text() {
        let obj: ErrorObject = serde_json::from_str(r#"{"code": 1001, "msg": "nope"}"#).unwrap();
        let err = obj.into_error(r#"{"method":"x"}"#);
        let rpc = err.as_rpc().unwrap();
        assert_eq!(rpc.request, r#"{"method":"x"}"#);
        assert_eq!(
            err.to_string(),
            "Rpc error RpcError: {\"code\": 1001, \"message\": \"nope\"}"
        );
    }

    #[test]
    fn authentication_exposes_inner_rpc_error() {
        let inner = Error::Rpc(RpcError {
            code: 403,
            message: "bad key".into(),
            request: String::new(),
        });
        let err = Error::Authentication(Box::new(inner));
        assert_eq!(err.as_rpc().map(|e| e.code), Some(403));
        assert!(std::error::Error::source(&err).is_some());
    }
}
