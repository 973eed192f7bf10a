//! https://www.jsonrpc.org/specification
//!
//! Envelope building and response interpretation. `request_id` and `trim`
//! are client-local directives and never reach the wire.

use serde_json::Value;

use crate::error::{Error, ErrorObject};
use crate::Result;

pub type Params = serde_json::Map<String, Value>;

const REQUEST_ID: &str = "request_id";
const TRIM: &str = "trim";
const SECRET_KEY: &str = "secret_key";

#[derive(serde::Serialize)]
pub struct Request<'a> {
    pub method: &'a str, // A String containing the name of the method to be invoked.
    pub params: &'a Params, // A Structured value that holds the parameter values to be used during the invocation of the method.
    pub id: i64, // An identifier established by the Client.
    pub jsonrpc: &'a str, // jsonrpc must be "2.0"
}

/// A call with its directives already consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub method: String,
    pub params: Params,
    pub id: i64,
    pub trim: Option<String>,
}

impl Envelope {
    pub fn new(method: &str, mut params: Params) -> Self {
        let id = params
            .remove(REQUEST_ID)
            .filter(|value| !value.is_null())
            .map(request_id)
            .unwrap_or(0);
        // a null directive means "not set"
        let trim = params
            .remove(TRIM)
            .filter(|value| !value.is_null())
            .map(|value| match value {
                Value::String(key) => key,
                other => other.to_string(),
            });
        Self {
            method: method.to_string(),
            params,
            id,
            trim,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let request = Request {
            method: &self.method,
            params: &self.params,
            id: self.id,
            jsonrpc: "2.0",
        };
        serde_json::to_string(&request).map_err(Error::Encode)
    }

    /// Like [`to_json`](Self::to_json) with `secret_key` masked.
    pub fn to_log_json(&self) -> Result<String> {
        if !self.params.contains_key(SECRET_KEY) {
            return self.to_json();
        }
        let mut masked = self.clone();
        masked
            .params
            .insert(SECRET_KEY.to_string(), Value::String("***".into()));
        masked.to_json()
    }
}

fn request_id(value: Value) -> i64 {
    let id = match &value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    id.unwrap_or_else(|| {
        tracing::warn!("ignoring non-integer request_id {value}, using 0");
        0
    })
}

/// Turns a raw response body into the call's value.
///
/// `result` wins over `error` when a server sends both. `request` is the text
/// that was sent and is attached to any [`crate::RpcError`].
pub fn interpret(body: &str, trim: Option<&str>, request: &str) -> Result<Value> {
    let parsed: Value = serde_json::from_str(body)
        .map_err(|e| Error::protocol(format!("response is not json: {e}"), body))?;
    let Value::Object(mut object) = parsed else {
        return Err(Error::protocol("response is not a json object", body));
    };

    if let Some(result) = object.remove("result") {
        return match trim {
            Some(key) => pick(result, key),
            None => Ok(result),
        };
    }
    if let Some(error) = object.remove("error") {
        let error: ErrorObject = serde_json::from_value(error)
            .map_err(|e| Error::protocol(format!("malformed error object: {e}"), body))?;
        return Err(error.into_error(request));
    }
    Err(Error::protocol("response has neither result nor error", body))
}

fn pick(result: Value, key: &str) -> Result<Value> {
    match result {
        Value::Object(mut map) => map
            .remove(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string())),
        _ => Err(Error::KeyNotFound(key.to_string())),
    }
}
