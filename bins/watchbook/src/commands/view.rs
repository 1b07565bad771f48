//! Detail pages of one media entry, show or collection

use crate::context::Context;
use crate::output;
use anyhow::Result;
use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::json;
use watchbook_api_client::endpoints::media::Media;
use watchbook_api_client::prelude::*;

/// What an id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Media,
    Show,
    Collection,
}

pub async fn run(ctx: &mut Context, kind: Kind, id: &str) -> Result<()> {
    // Signed-in requests carry per-user data
    ctx.session().await?;

    match kind {
        Kind::Media => media(ctx, id).await,
        Kind::Show => show(ctx, id).await,
        Kind::Collection => collection(ctx, id).await,
    }
}

fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<14} {}", label.dimmed(), value);
}

fn describe(media: &Media) {
    field("Type", &media.media_type);
    field("Status", &media.status);
    field("Rating", &media.rating);
    field(
        "Score",
        media.score.map_or_else(|| "-".to_string(), |s| format!("{s:.2}")),
    );
    field("Parts", media.part_count);
    if let Some(season) = &media.airing_season {
        field("Season", season);
    }
    if !media.creators.is_empty() {
        field("Creators", media.creators.join(", "));
    }
    if !media.tags.is_empty() {
        field("Tags", media.tags.join(", "));
    }
    if let Some(list) = media.user.as_ref().and_then(|u| u.list) {
        field("Your list", list.cyan());
    }
    if let Some(next) = media.release.as_ref().and_then(|r| r.next_airing.as_deref()) {
        field("Next part", next.yellow());
    }
    if let Some(description) = media.description.as_deref().filter(|d| !d.is_empty()) {
        println!();
        println!("  {description}");
    }
}

async fn media(ctx: &Context, id: &str) -> Result<()> {
    let media = page_data(ctx.client.media().get_media_by_id(id, None).await)?;

    if ctx.json() {
        return output::print_json(&media);
    }

    output::heading(&media.title);
    describe(&media);
    println!();
    Ok(())
}

async fn show(ctx: &Context, id: &str) -> Result<()> {
    let shows = ctx.client.shows();
    let (show, seasons) = tokio::try_join!(
        shows.get_show_by_id(id, None),
        shows.get_show_seasons(id, None),
    )?;
    let show = unwrap_page(show)?;
    let seasons = unwrap_page(seasons)?.seasons;

    if ctx.json() {
        return output::print_json(&json!({ "show": show, "seasons": seasons }));
    }

    output::heading(&show.name);
    for season in &seasons {
        println!("  {} {}", format!("{:>2}", season.num).bold(), season.name.bold());
        for item in &season.items {
            println!(
                "     {:>3}. {}  {}",
                item.position,
                item.title,
                item.media_id.dimmed()
            );
        }
    }
    println!();
    Ok(())
}

async fn collection(ctx: &Context, id: &str) -> Result<()> {
    let collections = ctx.client.collections();
    let (collection, items) = tokio::try_join!(
        collections.get_collection_by_id(id, None),
        collections.get_collection_items(id, None),
    )?;
    let collection = unwrap_page(collection)?;
    let items = unwrap_page(items)?.items;

    if ctx.json() {
        return output::print_json(&json!({ "collection": collection, "items": items }));
    }

    output::heading(&collection.name);
    for item in &items {
        println!(
            "  {:>3}. {}  {}",
            item.position,
            item.collection_name.bold(),
            item.title
        );
        println!("       {}", item.media_id.dimmed());
    }
    println!();
    Ok(())
}
