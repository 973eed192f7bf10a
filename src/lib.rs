mod client;
mod error;
mod http;
pub mod jsonrpc;
pub mod options;
pub mod resources;

pub use client::{Client, ClientInner};
pub use error::{Error, RpcError};
pub use http::{HttpTransport, Transport};
pub use jsonrpc::Params;
pub use options::{ClientConfig, Credentials};

pub type Result<T> = std::result::Result<T, Error>;

#[doc(hidden)]
pub mod __private {
    pub use serde_json::{json, Value};
}

/// Builds [`Params`] from JSON object syntax.
///
/// ```
/// let params = saplo_rpc::params! {"name": "news", "trim": "collection_id"};
/// assert_eq!(params["name"], "news");
/// ```
#[macro_export]
macro_rules! params {
    ($($tt:tt)*) => {
        match $crate::__private::json!({ $($tt)* }) {
            $crate::__private::Value::Object(map) => map,
            _ => unreachable!(),
        }
    };
}
