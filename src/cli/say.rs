//! TUI-less "say" command

use std::error::Error;

use crate::api::{ChatApi, SendMessageResponse};

/// Send `text` to `thread` (or to a new thread) and print the reply.
pub async fn run_say(
    api: &dyn ChatApi,
    thread: Option<&str>,
    text: &[String],
) -> Result<(), Box<dyn Error>> {
    let prompt = text.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: spur-chat say <message>");
        std::process::exit(1);
    }

    let (thread_id, reply) = say(api, thread, &prompt).await?;
    eprintln!("Thread: {thread_id}");
    println!("{}", reply.response.content);
    Ok(())
}

/// Returns the thread that received the message and the server's reply.
pub(crate) async fn say(
    api: &dyn ChatApi,
    thread: Option<&str>,
    prompt: &str,
) -> Result<(String, SendMessageResponse), Box<dyn Error>> {
    let thread_id = match thread.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => id.to_string(),
        None => api.create_thread(None).await?.id,
    };
    let reply = api.send_message(&thread_id, prompt.trim()).await?;
    Ok((thread_id, reply))
}
