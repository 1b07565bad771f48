//! Terminal rendering helpers

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use watchbook_api_client::endpoints::media::Media;
use watchbook_api_client::loader::FormErrors;
use watchbook_api_client::types::Page;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn heading(title: &str) {
    println!();
    println!("{}", RULE.blue());
    println!("  {}", title.blue().bold());
    println!("{}", RULE.blue());
    println!();
}

/// One media entry per line: title, type, score and the user's list
pub fn media_line(media: &Media) {
    let score = media
        .score
        .map_or_else(|| "-".to_string(), |s| format!("{s:.2}"));
    let list = media
        .user
        .as_ref()
        .and_then(|u| u.list)
        .map(|l| format!(" [{l}]"))
        .unwrap_or_default();

    println!(
        "  {}  {} {}{}",
        media.title.bold(),
        media.media_type.to_string().dimmed(),
        score.yellow(),
        list.cyan()
    );
    println!("    {}", media.id.dimmed());
}

pub fn page_footer(page: &Page) {
    println!();
    println!(
        "  {}",
        format!(
            "page {} of {} ({} items)",
            page.page + 1,
            page.total_pages.max(1),
            page.total_items
        )
        .dimmed()
    );
}

pub fn form_errors(errors: &FormErrors) {
    for (field, message) in errors.fields() {
        eprintln!("  {} {}: {}", "✗".red(), field.bold(), message);
    }
}

