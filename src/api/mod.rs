//! REST boundary to the chat backend.
//!
//! [`ChatApi`] is the port the rest of the crate talks to; [`client::HttpChatApi`]
//! is the reqwest-backed implementation used at runtime. Tests substitute an
//! in-memory implementation.

pub mod client;
pub mod models;

use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;

pub use client::HttpChatApi;
pub use models::{
    short_id, CreateThreadRequest, Message, Role, SendMessageRequest, SendMessageResponse, Thread,
};

/// Failures surfaced by [`ChatApi`] calls.
#[derive(Debug)]
pub enum ApiError {
    /// An authenticated endpoint was called before an identity was set.
    MissingIdentity,

    /// The request never produced an HTTP response.
    Transport(reqwest::Error),

    /// The server answered with a non-2xx status.
    Status {
        status: u16,
        /// The `message` field of the error body, or a status fallback.
        message: String,
    },

    /// A 2xx body did not match the expected shape.
    Decode(String),

    /// The configured base URL cannot carry an endpoint path.
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingIdentity => {
                write!(f, "User ID not found. Please set your user ID first.")
            }
            ApiError::Transport(err) => write!(f, "Network error: {err}"),
            ApiError::Status { message, .. } => write!(f, "{message}"),
            ApiError::Decode(detail) => write!(f, "Unexpected response from server: {detail}"),
            ApiError::InvalidUrl(detail) => write!(f, "{detail}"),
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err)
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Operations offered by the chat backend.
///
/// Everything except [`ChatApi::create_user`] is authenticated with the user
/// id held by the implementation.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `POST /users`: mint a new anonymous identity.
    async fn create_user(&self) -> ApiResult<String>;

    /// `POST /threads`
    async fn create_thread(&self, title: Option<String>) -> ApiResult<Thread>;

    /// `GET /threads`
    async fn list_threads(&self) -> ApiResult<Vec<Thread>>;

    /// `GET /threads/:id`
    async fn get_thread(&self, thread_id: &str) -> ApiResult<Thread>;

    /// `DELETE /threads/:id`, returning the server's `success` flag.
    async fn delete_thread(&self, thread_id: &str) -> ApiResult<bool>;

    /// `GET /threads/:id/messages`
    async fn list_messages(&self, thread_id: &str) -> ApiResult<Vec<Message>>;

    /// `POST /threads/:id/messages`
    async fn send_message(&self, thread_id: &str, content: &str)
        -> ApiResult<SendMessageResponse>;
}
