//! Metadata provider commands: list, search, import, refresh

use crate::context::Context;
use crate::output;
use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use watchbook_api_client::endpoints::providers::{
    ProviderCollectionUpdateBody, ProviderImportBody, ProviderMediaUpdateBody,
};
use watchbook_api_client::prelude::*;

/// What a provider lookup targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Media,
    Collections,
    Shows,
}

#[derive(Subcommand)]
pub enum Action {
    /// List configured providers
    List,

    /// Search a provider
    Search {
        /// Provider name, e.g. `myanimelist`
        provider: String,

        /// Search term
        query: String,

        #[arg(long, value_enum, default_value_t = Target::Media)]
        target: Target,
    },

    /// Import entries by their provider ids
    Import {
        provider: String,

        #[arg(required = true)]
        ids: Vec<String>,

        #[arg(long, value_enum, default_value_t = Target::Media)]
        target: Target,
    },

    /// Refresh one entry from its provider
    Update {
        provider: String,

        /// Library id of the entry
        id: String,

        #[arg(long, value_enum, default_value_t = Target::Media)]
        target: Target,

        /// Replace cover, banner and logo
        #[arg(long)]
        replace_images: bool,

        /// Replace the part list (media only)
        #[arg(long)]
        override_parts: bool,

        /// Take over the provider's release schedule (media only)
        #[arg(long)]
        set_release: bool,
    },

    /// Retry lookups for media with unknown metadata
    UpdateUnknown,
}

pub async fn run(ctx: &mut Context, action: Action) -> Result<()> {
    if !matches!(action, Action::List) {
        ctx.require_user().await?;
    }

    match action {
        Action::List => list(ctx).await,
        Action::Search { provider, query, target } => search(ctx, &provider, &query, target).await,
        Action::Import { provider, ids, target } => {
            let body = ProviderImportBody::new(ids);
            let providers = ctx.client.providers();
            let response = match target {
                Target::Media => providers.import_media(&provider, &body, None).await,
                Target::Collections => providers.import_collections(&provider, &body, None).await,
                Target::Shows => providers.import_shows(&provider, &body, None).await,
            };
            page_data(response)?;
            done(ctx, &format!("Imported {} entries from {provider}", body.ids.len()));
            Ok(())
        }
        Action::Update {
            provider,
            id,
            target,
            replace_images,
            override_parts,
            set_release,
        } => {
            let providers = ctx.client.providers();
            let response = match target {
                Target::Media => {
                    let body = ProviderMediaUpdateBody {
                        replace_images,
                        override_parts,
                        set_release,
                    };
                    providers.update_media(&provider, &id, &body, None).await
                }
                Target::Collections => {
                    let body = ProviderCollectionUpdateBody { replace_images };
                    providers.update_collection(&provider, &id, &body, None).await
                }
                Target::Shows => {
                    let body = ProviderCollectionUpdateBody { replace_images };
                    providers.update_show(&provider, &id, &body, None).await
                }
            };
            page_data(response)?;
            done(ctx, &format!("Refreshed {id} from {provider}"));
            Ok(())
        }
        Action::UpdateUnknown => {
            page_data(ctx.client.providers().update_unknown_media(None).await)?;
            done(ctx, "Queued lookups for unknown media");
            Ok(())
        }
    }
}

async fn list(ctx: &Context) -> Result<()> {
    let data = page_data(ctx.client.providers().get_providers(None).await)?;

    if ctx.json() {
        return output::print_json(&data);
    }

    output::heading("Providers");
    for provider in &data.providers {
        let mark = |on: bool| if on { "✓".green().to_string() } else { "✗".red().to_string() };
        println!("  {} ({})", provider.display_name.bold(), provider.name.dimmed());
        println!(
            "    media {} search {}  collections {} search {}",
            mark(provider.supports.get_media),
            mark(provider.supports.search_media),
            mark(provider.supports.get_collection),
            mark(provider.supports.search_collection),
        );
    }
    println!();
    Ok(())
}

async fn search(ctx: &Context, provider: &str, query: &str, target: Target) -> Result<()> {
    let options = RequestOptions::new().with_query("query", query);
    let providers = ctx.client.providers();
    let response = match target {
        Target::Media => providers.search_media(provider, Some(&options)).await,
        Target::Collections => providers.search_collections(provider, Some(&options)).await,
        Target::Shows => providers.search_shows(provider, Some(&options)).await,
    };
    let data = page_data(response)?;

    if ctx.json() {
        return output::print_json(&data);
    }

    output::heading(&format!("{provider}: {query}"));
    for hit in &data.search_results {
        println!("  {}  {}", hit.title.bold(), hit.provider_id.dimmed());
    }
    println!();
    Ok(())
}

fn done(ctx: &Context, message: &str) {
    if !ctx.json() {
        println!("{} {message}", "✓".green());
    }
}
