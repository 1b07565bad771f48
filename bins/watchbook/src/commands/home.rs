//! Home dashboard

use crate::context::Context;
use crate::output;
use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use watchbook_api_client::endpoints::media::Media;
use watchbook_api_client::prelude::*;
use watchbook_api_client::query::dashboard;

fn section(title: &str, media: &[Media]) {
    println!("  {}", title.bold().underline());
    if media.is_empty() {
        println!("    {}", "nothing here yet".dimmed());
    }
    for entry in media {
        output::media_line(entry);
    }
    println!();
}

/// Only signed-in users get a dashboard; anonymous visitors get empty lists
/// without any backend call.
pub async fn run(ctx: &mut Context) -> Result<()> {
    let signed_in = ctx.session().await?.user().is_some();

    let (in_progress, backlog, recent_media, recent_collections) = if signed_in {
        let (in_progress_opts, backlog_opts) = (dashboard::in_progress(), dashboard::backlog());
        let recent = dashboard::recently_created();
        let media_api = ctx.client.media();
        let collections_api = ctx.client.collections();

        let (in_progress, backlog, media, collections) = tokio::try_join!(
            media_api.get_media(Some(&in_progress_opts)),
            media_api.get_media(Some(&backlog_opts)),
            media_api.get_media(Some(&recent)),
            collections_api.get_collections(Some(&recent)),
        )?;
        (
            unwrap_page(in_progress)?.media,
            unwrap_page(backlog)?.media,
            unwrap_page(media)?.media,
            unwrap_page(collections)?.collections,
        )
    } else {
        Default::default()
    };

    if ctx.json() {
        return output::print_json(&json!({
            "inProgress": in_progress,
            "backlog": backlog,
            "recentMedia": recent_media,
            "recentCollections": recent_collections,
        }));
    }

    output::heading("Watchbook");
    if !signed_in {
        println!("  {}", "Sign in with `watchbook login <username>` to see your library.".dimmed());
        println!();
        return Ok(());
    }
    section("Continue watching", &in_progress);
    section("Backlog", &backlog);
    section("Recently added", &recent_media);

    println!("  {}", "New collections".bold().underline());
    for collection in &recent_collections {
        println!("  {}  {}", collection.name.bold(), collection.id.dimmed());
    }
    println!();
    Ok(())
}
