use std::error::Error;

use chrono::Local;

use crate::api::{ChatApi, Thread};

pub async fn list_threads(api: &dyn ChatApi) -> Result<(), Box<dyn Error>> {
    let threads = api.list_threads().await?;
    if threads.is_empty() {
        println!("No threads yet.");
        return Ok(());
    }
    print!("{}", format_thread_table(&threads));
    Ok(())
}

/// One row per thread: id, display title, last update in local time.
pub(crate) fn format_thread_table(threads: &[Thread]) -> String {
    let id_width = threads
        .iter()
        .map(|thread| thread.id.chars().count())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    let mut table = format!("{:<id_width$}  {:<16}  TITLE\n", "ID", "UPDATED");
    for thread in threads {
        let updated = thread
            .updated_at
            .or(thread.created_at)
            .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.push_str(&format!(
            "{:<id_width$}  {:<16}  {}\n",
            thread.id,
            updated,
            thread.display_title()
        ));
    }
    table
}
