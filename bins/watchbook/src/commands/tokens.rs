//! API token management

use crate::context::Context;
use crate::output;
use anyhow::Result;
use clap::Subcommand;
use owo_colors::OwoColorize;
use watchbook_api_client::endpoints::users::CreateApiTokenBody;
use watchbook_api_client::prelude::*;

#[derive(Subcommand)]
pub enum Action {
    /// List tokens
    List,

    /// Create a token; its secret is printed once
    Create {
        /// Label for the token
        name: String,
    },

    /// Delete a token
    Delete {
        /// Token id
        id: String,
    },
}

pub async fn run(ctx: &mut Context, action: Action) -> Result<()> {
    ctx.require_user().await?;
    let tokens = ctx.client.tokens();

    match action {
        Action::List => {
            let data = page_data(tokens.get_all_api_tokens(None).await)?;
            if ctx.json() {
                return output::print_json(&data);
            }
            for token in &data.tokens {
                println!("  {}  {}", token.name.bold(), token.id.dimmed());
            }
            if data.tokens.is_empty() {
                println!("  {}", "No tokens".dimmed());
            }
        }
        Action::Create { name } => {
            let created = page_data(tokens.create_api_token(&CreateApiTokenBody { name }, None).await)?;
            if ctx.json() {
                return output::print_json(&created);
            }
            println!("{} Token created, it will not be shown again:", "✓".green());
            println!("  {}", created.token.bold());
        }
        Action::Delete { id } => {
            page_data(tokens.delete_api_token(&id, None).await)?;
            if !ctx.json() {
                println!("{} Token {} deleted", "✓".green(), id);
            }
        }
    }
    Ok(())
}
