//! Public user profiles and the signed-in user's folders

use crate::context::Context;
use crate::output;
use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::{json, Value};
use watchbook_api_client::prelude::*;

fn stat_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// Profile and statistics of any user
pub async fn profile(ctx: &mut Context, id: &str) -> Result<()> {
    ctx.session().await?;

    let users = ctx.client.users();
    let (user, stats) = tokio::try_join!(users.get_user(id, None), users.get_user_stats(id, None))?;
    let user = unwrap_page(user)?;
    let stats = unwrap_page(stats)?;

    if ctx.json() {
        return output::print_json(&json!({ "user": user, "stats": stats }));
    }

    output::heading(user.display_name.as_deref().unwrap_or(&user.username));
    println!("  {}  {}", user.username.bold(), user.id.dimmed());
    println!();
    for (name, value) in &stats.stats {
        println!("  {:<20} {}", name, stat_value(value).green());
    }
    println!();
    Ok(())
}

/// Folders of the signed-in user, or the items of one folder
pub async fn folders(ctx: &mut Context, id: Option<&str>) -> Result<()> {
    ctx.require_user().await?;

    match id {
        None => list_folders(ctx).await,
        Some(id) => folder(ctx, id).await,
    }
}

async fn list_folders(ctx: &Context) -> Result<()> {
    let data = page_data(ctx.client.folders().get_folders(None).await)?;

    if ctx.json() {
        return output::print_json(&data);
    }

    output::heading("Folders");
    if data.folders.is_empty() {
        println!("  {}", "No folders".dimmed());
    }
    for folder in &data.folders {
        println!(
            "  {}  {}",
            folder.name.bold(),
            format!("{} items", folder.item_count).dimmed()
        );
        println!("    {}", folder.id.dimmed());
    }
    println!();
    Ok(())
}

async fn folder(ctx: &Context, id: &str) -> Result<()> {
    let folders = ctx.client.folders();
    let (folder, items) = tokio::try_join!(
        folders.get_folder_by_id(id, None),
        folders.get_folder_items(id, None),
    )?;
    let folder = unwrap_page(folder)?;
    let items = unwrap_page(items)?.items;

    if ctx.json() {
        return output::print_json(&json!({ "folder": folder, "items": items }));
    }

    output::heading(&folder.name);
    for item in &items {
        println!(
            "  {:>3}. {}  {}",
            item.position,
            item.title.bold(),
            item.media_type.to_string().dimmed()
        );
        println!("       {}", item.media_id.dimmed());
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_values_render_plainly() {
        assert_eq!(stat_value(&json!("anime")), "anime");
        assert_eq!(stat_value(&json!(12)), "12");
        assert_eq!(stat_value(&json!(7.5)), "7.5");
        assert_eq!(stat_value(&Value::Null), "-");
    }
}
