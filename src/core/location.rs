//! URL-shaped record of the selected thread.
//!
//! A link looks like `spur://chat/?thread=<id>`. Links copied from the web
//! client (`https://host/?thread=<id>`) are accepted too; only the `thread`
//! query pair is interpreted and every other part of the URL is preserved.

use reqwest::Url;

pub const DEFAULT_LINK: &str = "spur://chat/";
const THREAD_PARAM: &str = "thread";

#[derive(Debug, Clone)]
pub struct Location {
    url: Url,
}

impl Default for Location {
    fn default() -> Self {
        let url = Url::parse(DEFAULT_LINK).expect("DEFAULT_LINK is a valid URL");
        Self { url }
    }
}

impl Location {
    pub fn parse(link: &str) -> Result<Self, String> {
        let url =
            Url::parse(link.trim()).map_err(|err| format!("Invalid thread link '{link}': {err}"))?;
        Ok(Self { url })
    }

    /// A default link that already names `thread_id`.
    pub fn for_thread(thread_id: &str) -> Self {
        let mut location = Self::default();
        location.set_thread_param(Some(thread_id));
        location
    }

    pub fn thread_id(&self) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == THREAD_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }

    pub fn href(&self) -> String {
        self.url.to_string()
    }

    /// Point the link at `thread_id`.
    pub fn push_thread(&mut self, thread_id: &str) {
        self.set_thread_param(Some(thread_id));
    }

    /// Drop the thread from the link.
    pub fn clear_thread(&mut self) {
        self.set_thread_param(None);
    }

    fn set_thread_param(&mut self, thread_id: Option<&str>) {
        let retained: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(key, _)| key != THREAD_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        if retained.is_empty() && thread_id.is_none() {
            self.url.set_query(None);
            return;
        }

        let mut pairs = self.url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        if let Some(thread_id) = thread_id {
            pairs.append_pair(THREAD_PARAM, thread_id);
        }
    }
}
