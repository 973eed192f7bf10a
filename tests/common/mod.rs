use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use saplo_rpc::{Client, ClientConfig, Credentials, Result, Transport};
use url::Url;

pub const TOKEN_OK: &str = r#"{"id":0,"result":{"access_token":"tok-1"}}"#;

/// Replays canned bodies and records what was posted.
#[derive(Clone, Default)]
pub struct Recorder {
    replies: Arc<Mutex<VecDeque<String>>>,
    sent: Arc<Mutex<Vec<(Url, String)>>>,
}

impl Recorder {
    pub fn new(replies: &[&str]) -> Self {
        let recorder = Self::default();
        recorder
            .replies
            .lock()
            .unwrap()
            .extend(replies.iter().map(|s| s.to_string()));
        recorder
    }

    pub fn reply(&self, body: &str) {
        self.replies.lock().unwrap().push_back(body.to_string());
    }

    pub fn sent(&self) -> Vec<(Url, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> String {
        self.sent().last().map(|(_, body)| body.clone()).unwrap()
    }

    pub fn last_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.last_body()).unwrap()
    }
}

impl Transport for Recorder {
    async fn post(&self, url: &Url, body: String) -> Result<String> {
        self.sent.lock().unwrap().push((url.clone(), body));
        Ok(self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left"))
    }
}

pub async fn connect(recorder: &Recorder) -> Client<Recorder> {
    Client::with_transport(
        recorder.clone(),
        Credentials::new("api", "secret"),
        ClientConfig::default(),
    )
    .await
    .unwrap()
}
