use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{
    CreateThreadRequest, CreateUserResponse, DeleteThreadResponse, ErrorBody, Message,
    MessagesResponse, SendMessageRequest, SendMessageResponse, Thread, ThreadResponse,
    ThreadsResponse,
};
use super::{ApiError, ApiResult, ChatApi};
use crate::utils::url::construct_api_url;

/// Message used when an error response body is not JSON at all.
const UNKNOWN_ERROR: &str = "Unknown error";

/// reqwest-backed [`ChatApi`].
///
/// The user id is shared behind a lock so the identity bootstrap can install it
/// after the client has been handed to the UI.
#[derive(Clone)]
pub struct HttpChatApi {
    client: reqwest::Client,
    base_url: String,
    user_id: Arc<RwLock<Option<String>>>,
}

impl HttpChatApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            user_id: Arc::new(RwLock::new(None)),
        }
    }

    pub fn set_user_id(&self, user_id: Option<String>) {
        if let Ok(mut guard) = self.user_id.write() {
            *guard = user_id;
        }
    }

    pub fn user_id(&self) -> Option<String> {
        self.user_id.read().ok().and_then(|guard| guard.clone())
    }

    /// Build a request for the endpoint made of `segments`; each segment is
    /// percent-encoded on its own.
    fn request(&self, method: Method, segments: &[&str]) -> ApiResult<RequestBuilder> {
        let url = construct_api_url(&self.base_url, segments).map_err(ApiError::InvalidUrl)?;
        Ok(self
            .client
            .request(method, url)
            .header("Content-Type", "application/json"))
    }

    fn authed(&self, method: Method, segments: &[&str]) -> ApiResult<RequestBuilder> {
        let user_id = self.user_id().ok_or(ApiError::MissingIdentity)?;
        Ok(self.request(method, segments)?.header("Authorization", user_id))
    }

    async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let response = check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

/// Map a non-2xx response to [`ApiError::Status`]. The message is the body's
/// `message` field, the status fallback when a JSON body lacks one, or
/// "Unknown error" when the body is not JSON.
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(value) => serde_json::from_value::<ErrorBody>(value)
            .ok()
            .and_then(|parsed| parsed.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16())),
        Err(_) => UNKNOWN_ERROR.to_string(),
    };

    debug!(status = status.as_u16(), %message, "API request failed");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

fn thread_path(thread_id: &str) -> [&str; 2] {
    ["threads", thread_id]
}

fn messages_path(thread_id: &str) -> [&str; 3] {
    ["threads", thread_id, "messages"]
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn create_user(&self) -> ApiResult<String> {
        let response: CreateUserResponse =
            Self::execute(self.request(Method::POST, &["users"])?).await?;
        Ok(response.user_id)
    }

    async fn create_thread(&self, title: Option<String>) -> ApiResult<Thread> {
        let request = self
            .authed(Method::POST, &["threads"])?
            .json(&CreateThreadRequest { title });
        let response: ThreadResponse = Self::execute(request).await?;
        Ok(response.thread)
    }

    async fn list_threads(&self) -> ApiResult<Vec<Thread>> {
        let response: ThreadsResponse = Self::execute(self.authed(Method::GET, &["threads"])?).await?;
        Ok(response.threads)
    }

    async fn get_thread(&self, thread_id: &str) -> ApiResult<Thread> {
        let request = self.authed(Method::GET, &thread_path(thread_id))?;
        let response: ThreadResponse = Self::execute(request).await?;
        Ok(response.thread)
    }

    async fn delete_thread(&self, thread_id: &str) -> ApiResult<bool> {
        let request = self.authed(Method::DELETE, &thread_path(thread_id))?;
        let response: DeleteThreadResponse = Self::execute(request).await?;
        Ok(response.success)
    }

    async fn list_messages(&self, thread_id: &str) -> ApiResult<Vec<Message>> {
        let request = self.authed(Method::GET, &messages_path(thread_id))?;
        let response: MessagesResponse = Self::execute(request).await?;
        Ok(response.messages)
    }

    async fn send_message(
        &self,
        thread_id: &str,
        content: &str,
    ) -> ApiResult<SendMessageResponse> {
        let request = self
            .authed(Method::POST, &messages_path(thread_id))?
            .json(&SendMessageRequest {
                content: content.to_string(),
            });
        Self::execute(request).await
    }
}
