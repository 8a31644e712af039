//! Test doubles shared by the BDD steps

use std::collections::VecDeque;

use homework_bot::io::{HttpClient, HttpResponse};
use homework_bot::notifier::Notifier;
use homework_bot::practicum::HomeworkApi;
use homework_bot::HomeworkBotError;
use serde_json::{json, Value};
use tokio::sync::RwLock;

/// One scripted reply of the homework API
#[derive(Debug, Clone)]
pub enum Reply {
    Payload(Value),
    Status(u16),
    Transport(String),
}

/// A homework API that replays queued replies, then returns empty payloads
#[derive(Debug, Default)]
pub struct ScriptedApi {
    replies: RwLock<VecDeque<Reply>>,
    requested_from: RwLock<Vec<i64>>,
}

impl ScriptedApi {
    pub async fn push(&self, reply: Reply) {
        self.replies.write().await.push_back(reply);
    }

    pub async fn requested_from(&self) -> Vec<i64> {
        self.requested_from.read().await.clone()
    }
}

#[async_trait::async_trait]
impl HomeworkApi for ScriptedApi {
    async fn fetch(&self, since_timestamp: i64) -> homework_bot::Result<Value> {
        self.requested_from.write().await.push(since_timestamp);
        let reply = self.replies.write().await.pop_front();
        match reply {
            Some(Reply::Payload(payload)) => Ok(payload),
            Some(Reply::Status(status)) => Err(HomeworkBotError::HttpStatus {
                url: "https://practicum.test/api/".to_string(),
                status,
            }),
            Some(Reply::Transport(msg)) => Err(HomeworkBotError::Transport(msg)),
            None => Ok(json!({"homeworks": []})),
        }
    }
}

/// A notifier that records every message and can be told to reject them
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    reject: RwLock<bool>,
    messages: RwLock<Vec<String>>,
}

impl RecordingNotifier {
    pub async fn reject_all(&self) {
        *self.reject.write().await = true;
    }

    pub async fn messages(&self) -> Vec<String> {
        self.messages.read().await.clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    fn type_name(&self) -> &str {
        "recording"
    }

    async fn notify(&self, message: &str) -> homework_bot::Result<()> {
        self.messages.write().await.push(message.to_string());
        if *self.reject.read().await {
            Err(HomeworkBotError::Delivery("rejected by test".to_string()))
        } else {
            Ok(())
        }
    }
}

/// A recorded HTTP request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub fields: Vec<(String, String)>,
}

/// An HTTP client that records all requests and answers like both upstream APIs
#[derive(Debug)]
pub struct RecordingHttpClient {
    pub homeworks_body: String,
    pub requests: RwLock<Vec<RecordedRequest>>,
}

impl RecordingHttpClient {
    pub fn new(homeworks_body: &str) -> Self {
        Self {
            homeworks_body: homeworks_body.to_string(),
            requests: RwLock::new(Vec::new()),
        }
    }

    pub async fn requests(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }

    pub async fn posted_texts(&self) -> Vec<String> {
        self.requests("POST")
            .await
            .into_iter()
            .filter_map(|r| {
                r.fields
                    .into_iter()
                    .find(|(k, _)| k == "text")
                    .map(|(_, v)| v)
            })
            .collect()
    }
}

fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[async_trait::async_trait]
impl HttpClient for RecordingHttpClient {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> homework_bot::Result<HttpResponse> {
        self.requests.write().await.push(RecordedRequest {
            method: "GET".to_string(),
            url: url.to_string(),
            fields: owned(headers),
        });
        Ok(HttpResponse {
            status: 200,
            body: self.homeworks_body.clone(),
        })
    }

    async fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        self.requests.write().await.push(RecordedRequest {
            method: "POST".to_string(),
            url: url.to_string(),
            fields: owned(params),
        });
        Ok(HttpResponse {
            status: 200,
            body: r#"{"ok":true,"result":{}}"#.to_string(),
        })
    }
}
