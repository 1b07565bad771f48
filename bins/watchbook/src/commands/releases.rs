//! Release schedule

use crate::context::Context;
use crate::output;
use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use watchbook_api_client::prelude::*;
use watchbook_api_client::query::page_options;

/// Backend query passed through as is
#[derive(Debug, Clone, Default, Args)]
pub struct ReleaseArgs {
    /// Filter expression, e.g. `hasType("anime-season")`
    #[arg(long)]
    pub filter: Option<String>,

    /// Sort directive, e.g. `sort=-nextAiring`
    #[arg(long)]
    pub sort: Option<String>,

    /// Zero-based page
    #[arg(long)]
    pub page: Option<u32>,
}

impl ReleaseArgs {
    fn params(&self) -> SearchParams {
        let mut params = SearchParams::new();
        for (key, value) in [("filter", &self.filter), ("sort", &self.sort)] {
            if let Some(value) = value {
                params.insert(key.to_string(), value.clone());
            }
        }
        if let Some(page) = self.page {
            params.insert("page".to_string(), page.to_string());
        }
        params
    }
}

pub async fn run(ctx: &mut Context, args: &ReleaseArgs) -> Result<()> {
    ctx.session().await?;

    let options = page_options(&args.params());
    let data = page_data(ctx.client.releases().get_releases(Some(&options)).await)?;

    if ctx.json() {
        return output::print_json(&data);
    }

    output::heading("Releases");
    if data.releases.is_empty() {
        println!("  {}", "Nothing scheduled".dimmed());
    }
    for release in &data.releases {
        println!(
            "  {}  {} {}",
            release.title.bold(),
            release.media_type.to_string().dimmed(),
            release.release_status.to_string().cyan()
        );
        println!(
            "    part {}/{}  next {}",
            release.current_part,
            release.num_expected_parts,
            release.next_airing.yellow()
        );
        println!("    {}", release.media_id.dimmed());
    }
    output::page_footer(&data.page);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_become_paging_params() {
        let args = ReleaseArgs {
            sort: Some("sort=-nextAiring".to_string()),
            page: Some(1),
            ..ReleaseArgs::default()
        };
        let options = page_options(&args.params());
        assert_eq!(options.query["sort"], "sort=-nextAiring");
        assert_eq!(options.query["page"], "1");
        assert!(!options.query.contains_key("filter"));
    }
}
