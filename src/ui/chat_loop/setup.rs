use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use super::AppHandle;
use crate::api::ChatApi;
use crate::core::app::App;
use crate::core::location::Location;
use crate::core::state_file::StateFile;

/// Everything the interactive client needs once an identity exists.
pub struct ChatSession {
    pub api: Arc<dyn ChatApi>,
    pub api_base_url: String,
    pub user_id: String,
    pub location: Location,
    /// Where the last link is remembered; `None` keeps the session in memory.
    pub state_file: Option<StateFile>,
    pub notification_ttl: Duration,
}

pub(super) fn bootstrap_app(session: &ChatSession) -> AppHandle {
    let mut app = App::new(session.notification_ttl).with_location(session.location.clone());
    app.user_id = Some(session.user_id.clone());
    app.api_base_url = session.api_base_url.clone();
    AppHandle::new(Arc::new(Mutex::new(app)))
}
