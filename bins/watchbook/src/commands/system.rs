//! Backend info

use crate::context::Context;
use crate::output;
use anyhow::Result;
use owo_colors::OwoColorize;
use watchbook_api_client::prelude::*;

pub async fn info(ctx: &Context) -> Result<()> {
    let info = page_data(ctx.client.system().get_system_info(None).await)?;

    if ctx.json() {
        return output::print_json(&info);
    }

    println!("  Backend: {}", ctx.client.base_url());
    println!("  Version: {}", info.version.green());
    Ok(())
}
