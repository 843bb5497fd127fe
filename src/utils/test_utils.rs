#[cfg(test)]
use crate::api::{ApiError, ApiResult, ChatApi, Message, Role, SendMessageResponse, Thread};
#[cfg(test)]
use crate::core::app::App;
#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
pub fn create_test_app() -> App {
    App::new(std::time::Duration::from_secs(5))
}

#[cfg(test)]
pub fn create_test_thread(id: &str, title: Option<&str>) -> Thread {
    Thread {
        id: id.to_string(),
        title: title.map(str::to_string),
        resource_id: "user-1".to_string(),
        created_at: None,
        updated_at: None,
    }
}

#[cfg(test)]
pub fn create_test_message(id: &str, thread_id: &str, role: Role, content: &str) -> Message {
    Message {
        id: id.to_string(),
        thread_id: thread_id.to_string(),
        role,
        content: content.to_string(),
        created_at: None,
    }
}

#[cfg(test)]
#[derive(Default)]
struct FakeState {
    calls: Vec<String>,
    threads: Vec<Thread>,
    messages: HashMap<String, Vec<Message>>,
    failures: HashMap<String, String>,
    next_user_id: Option<String>,
    seq: u64,
}

/// In-memory backend that records every call it receives.
#[cfg(test)]
#[derive(Default)]
pub struct FakeChatApi {
    state: Mutex<FakeState>,
}

#[cfg(test)]
impl FakeChatApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threads(threads: Vec<Thread>) -> Self {
        let api = Self::new();
        api.lock().threads = threads;
        api
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake api state poisoned")
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn set_next_user_id(&self, user_id: &str) {
        self.lock().next_user_id = Some(user_id.to_string());
    }

    pub fn set_messages(&self, thread_id: &str, messages: Vec<Message>) {
        self.lock().messages.insert(thread_id.to_string(), messages);
    }

    pub fn threads(&self) -> Vec<Thread> {
        self.lock().threads.clone()
    }

    /// Make the next call to `op` fail with a 500 carrying `message`.
    pub fn fail_next(&self, op: &str, message: &str) {
        self.lock()
            .failures
            .insert(op.to_string(), message.to_string());
    }

    fn record(&self, op: &str) -> ApiResult<()> {
        let mut state = self.lock();
        state.calls.push(op.to_string());
        match state.failures.remove(op) {
            Some(message) => Err(ApiError::Status {
                status: 500,
                message,
            }),
            None => Ok(()),
        }
    }

    fn next_seq(&self) -> u64 {
        let mut state = self.lock();
        state.seq += 1;
        state.seq
    }
}

#[cfg(test)]
#[async_trait]
impl ChatApi for FakeChatApi {
    async fn create_user(&self) -> ApiResult<String> {
        self.record("create_user")?;
        let seq = self.next_seq();
        Ok(self
            .lock()
            .next_user_id
            .take()
            .unwrap_or_else(|| format!("user-{seq}")))
    }

    async fn create_thread(&self, title: Option<String>) -> ApiResult<Thread> {
        self.record("create_thread")?;
        let seq = self.next_seq();
        let thread = Thread {
            id: format!("thread-{seq}"),
            title,
            resource_id: "user-1".to_string(),
            created_at: None,
            updated_at: None,
        };
        self.lock().threads.insert(0, thread.clone());
        Ok(thread)
    }

    async fn list_threads(&self) -> ApiResult<Vec<Thread>> {
        self.record("list_threads")?;
        Ok(self.lock().threads.clone())
    }

    async fn get_thread(&self, thread_id: &str) -> ApiResult<Thread> {
        self.record("get_thread")?;
        self.lock()
            .threads
            .iter()
            .find(|thread| thread.id == thread_id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "Thread not found".to_string(),
            })
    }

    async fn delete_thread(&self, thread_id: &str) -> ApiResult<bool> {
        self.record("delete_thread")?;
        let mut state = self.lock();
        let before = state.threads.len();
        state.threads.retain(|thread| thread.id != thread_id);
        state.messages.remove(thread_id);
        Ok(state.threads.len() != before)
    }

    async fn list_messages(&self, thread_id: &str) -> ApiResult<Vec<Message>> {
        self.record("list_messages")?;
        Ok(self
            .lock()
            .messages
            .get(thread_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn send_message(&self, thread_id: &str, content: &str) -> ApiResult<SendMessageResponse> {
        self.record("send_message")?;
        let seq = self.next_seq();
        let message = create_test_message(&format!("msg-{seq}-u"), thread_id, Role::User, content);
        let response = create_test_message(
            &format!("msg-{seq}-a"),
            thread_id,
            Role::Assistant,
            &format!("You said: {content}"),
        );
        self.lock()
            .messages
            .entry(thread_id.to_string())
            .or_default()
            .extend([message.clone(), response.clone()]);
        Ok(SendMessageResponse { message, response })
    }
}
