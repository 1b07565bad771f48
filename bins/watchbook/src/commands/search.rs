//! Quick title search

use crate::context::Context;
use crate::output;
use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use watchbook_api_client::prelude::*;

/// A failure envelope is reported next to the (empty) results instead of
/// failing the command.
pub async fn run(ctx: &mut Context, query: &str) -> Result<()> {
    ctx.session().await?;

    let options = search_options(query);
    let (media, media_error) = match ctx.client.media().get_media(Some(&options)).await? {
        ApiResponse::Success(data) => (data.media, None),
        ApiResponse::Failure(failure) => (Vec::new(), Some(failure.message)),
    };

    if ctx.json() {
        return output::print_json(&json!({
            "query": query,
            "media": media,
            "mediaError": media_error,
        }));
    }

    output::heading(&format!("Search: {query}"));
    if let Some(message) = &media_error {
        println!("  {} {}", "⚠".yellow(), message.yellow());
    } else if media.is_empty() {
        println!("  {}", "No matches".dimmed());
    }
    for entry in &media {
        output::media_line(entry);
    }
    println!();
    Ok(())
}
