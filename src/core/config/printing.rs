use crate::core::config::data::{Config, DEFAULT_API_BASE_URL};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.api_base_url {
            Some(url) => println!("  api-url: {url}"),
            None => println!("  api-url: (unset, default {DEFAULT_API_BASE_URL})"),
        }
        match self.resume_last_thread() {
            true => println!("  resume-last-thread: on"),
            false => println!("  resume-last-thread: off"),
        }
        println!("  notification-seconds: {}", self.notification_seconds());
    }
}
