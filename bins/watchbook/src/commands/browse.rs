//! Listing pages: media, shows, collections and watchlists
//!
//! Flags are collected into the same query parameters the web pages read,
//! then parsed by the listing filters, so `--type anime-season,movie` behaves
//! like `?filterType=anime-season,movie`.

use crate::context::Context;
use crate::output;
use crate::OutputFormat;
use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use watchbook_api_client::prelude::*;

/// Sorting, paging and dry-run flags shared by every listing
#[derive(Debug, Clone, Default, Args)]
pub struct Paging {
    /// Sort key, e.g. `title-a-z` or `score-high`
    #[arg(long)]
    pub sort: Option<String>,

    /// Zero-based page
    #[arg(long)]
    pub page: Option<u32>,

    /// Print the query that would be sent and exit
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct MediaArgs {
    /// Text to look for in titles
    #[arg(short, long)]
    pub query: Option<String>,

    /// Only these types (comma-separated)
    #[arg(long = "type")]
    pub types: Option<String>,

    /// Only these statuses
    #[arg(long)]
    pub status: Option<String>,

    /// Only these ratings
    #[arg(long)]
    pub rating: Option<String>,

    /// Hide these types
    #[arg(long)]
    pub exclude_type: Option<String>,

    /// Hide these statuses
    #[arg(long)]
    pub exclude_status: Option<String>,

    /// Hide these ratings
    #[arg(long)]
    pub exclude_rating: Option<String>,

    #[command(flatten)]
    pub paging: Paging,
}

/// Flags of the name-searched listings
#[derive(Debug, Clone, Default, Args)]
pub struct NamedArgs {
    /// Text to look for in names
    #[arg(short, long)]
    pub query: Option<String>,

    /// Only these types (comma-separated)
    #[arg(long = "type")]
    pub types: Option<String>,

    /// Hide these types
    #[arg(long)]
    pub exclude_type: Option<String>,

    #[command(flatten)]
    pub paging: Paging,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub named: NamedArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub struct CollectionArgs {
    #[command(flatten)]
    pub named: NamedArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub struct WatchlistArgs {
    /// Whose watchlist; defaults to the signed-in user
    #[arg(long)]
    pub user: Option<String>,

    /// One list, e.g. `in-progress`; every list when omitted
    #[arg(long)]
    pub list: Option<String>,

    /// Only these types (comma-separated)
    #[arg(long = "type")]
    pub types: Option<String>,

    /// Only these statuses
    #[arg(long)]
    pub status: Option<String>,

    #[command(flatten)]
    pub paging: Paging,
}

/// Flags of one listing page
pub trait ListingArgs {
    type Filter: ListingFilter;

    /// Page query parameters equivalent to the flags
    fn params(&self) -> SearchParams;

    fn paging(&self) -> &Paging;

    fn dry_run(&self) -> bool {
        self.paging().dry_run
    }
}

fn insert(params: &mut SearchParams, key: &str, value: Option<&String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        params.insert(key.to_string(), value.clone());
    }
}

fn paging_params(paging: &Paging) -> SearchParams {
    let mut params = SearchParams::new();
    insert(&mut params, "sort", paging.sort.as_ref());
    if let Some(page) = paging.page {
        params.insert("page".to_string(), page.to_string());
    }
    params
}

impl ListingArgs for MediaArgs {
    type Filter = MediaFilter;

    fn params(&self) -> SearchParams {
        let mut params = paging_params(&self.paging);
        insert(&mut params, "query", self.query.as_ref());
        insert(&mut params, "filterType", self.types.as_ref());
        insert(&mut params, "filterStatus", self.status.as_ref());
        insert(&mut params, "filterRating", self.rating.as_ref());
        insert(&mut params, "excludeType", self.exclude_type.as_ref());
        insert(&mut params, "excludeStatus", self.exclude_status.as_ref());
        insert(&mut params, "excludeRating", self.exclude_rating.as_ref());
        params
    }

    fn paging(&self) -> &Paging {
        &self.paging
    }
}

impl NamedArgs {
    fn params(&self) -> SearchParams {
        let mut params = paging_params(&self.paging);
        insert(&mut params, "query", self.query.as_ref());
        insert(&mut params, "filterType", self.types.as_ref());
        insert(&mut params, "excludeType", self.exclude_type.as_ref());
        params
    }
}

impl ListingArgs for ShowArgs {
    type Filter = ShowFilter;

    fn params(&self) -> SearchParams {
        self.named.params()
    }

    fn paging(&self) -> &Paging {
        &self.named.paging
    }
}

impl ListingArgs for CollectionArgs {
    type Filter = CollectionFilter;

    fn params(&self) -> SearchParams {
        self.named.params()
    }

    fn paging(&self) -> &Paging {
        &self.named.paging
    }
}

impl ListingArgs for WatchlistArgs {
    type Filter = WatchlistFilter;

    fn params(&self) -> SearchParams {
        let mut params = paging_params(&self.paging);
        insert(&mut params, "list", self.list.as_ref());
        insert(&mut params, "types", self.types.as_ref());
        insert(&mut params, "status", self.status.as_ref());
        params
    }

    fn paging(&self) -> &Paging {
        &self.paging
    }
}

/// Print the query parameters a listing would send
pub fn dry_run<A: ListingArgs>(args: &A, format: OutputFormat) -> Result<()> {
    let (_, options) = listing_options::<A::Filter>(&args.params())?;

    if format == OutputFormat::Json {
        return output::print_json(&options.query);
    }
    for (key, value) in &options.query {
        println!("{key}={value}");
    }
    Ok(())
}

pub async fn media(ctx: &mut Context, args: &MediaArgs) -> Result<()> {
    // Signed-in requests carry per-user data
    ctx.session().await?;

    let (_, options) = listing_options::<MediaFilter>(&args.params())?;
    let data = page_data(ctx.client.media().get_media(Some(&options)).await)?;

    if ctx.json() {
        return output::print_json(&data);
    }

    output::heading("Media");
    for media in &data.media {
        output::media_line(media);
    }
    output::page_footer(&data.page);
    Ok(())
}

pub async fn shows(ctx: &mut Context, args: &ShowArgs) -> Result<()> {
    ctx.session().await?;

    let (_, options) = listing_options::<ShowFilter>(&args.params())?;
    let data = page_data(ctx.client.shows().get_shows(Some(&options)).await)?;

    if ctx.json() {
        return output::print_json(&data);
    }

    output::heading("Shows");
    for show in &data.shows {
        println!("  {}  {}", show.name.bold(), show.show_type.to_string().dimmed());
        println!("    {}", show.id.dimmed());
    }
    output::page_footer(&data.page);
    Ok(())
}

pub async fn collections(ctx: &mut Context, args: &CollectionArgs) -> Result<()> {
    ctx.session().await?;

    let (_, options) = listing_options::<CollectionFilter>(&args.params())?;
    let data = page_data(ctx.client.collections().get_collections(Some(&options)).await)?;

    if ctx.json() {
        return output::print_json(&data);
    }

    output::heading("Collections");
    for collection in &data.collections {
        println!(
            "  {}  {}",
            collection.name.bold(),
            collection.collection_type.to_string().dimmed()
        );
        println!("    {}", collection.id.dimmed());
    }
    output::page_footer(&data.page);
    Ok(())
}

pub async fn watchlist(ctx: &mut Context, args: &WatchlistArgs) -> Result<()> {
    let state = ctx.session().await?;
    let user_id = match (&args.user, state.user()) {
        (Some(id), _) => id.clone(),
        (None, Some(me)) => me.id.clone(),
        (None, None) => anyhow::bail!("pass --user or sign in first"),
    };

    let owner = page_data(ctx.client.users().get_user(&user_id, None).await)?;

    let (_, mut options) = listing_options::<WatchlistFilter>(&args.params())?;
    options.query.insert("userId".to_string(), user_id);
    let data = page_data(ctx.client.media().get_media(Some(&options)).await)?;

    if ctx.json() {
        return output::print_json(&data);
    }

    let name = owner.display_name.as_deref().unwrap_or(&owner.username);
    output::heading(&format!("Watchlist of {name}"));
    for media in &data.media {
        output::media_line(media);
    }
    output::page_footer(&data.page);
    Ok(())
}
