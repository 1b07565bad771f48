//! Sign-in, sign-up, sign-out and account commands

use crate::context::Context;
use crate::output;
use anyhow::{bail, Result};
use owo_colors::OwoColorize;
use serde_json::json;
use watchbook_api_client::endpoints::auth::{ChangePasswordBody, SigninBody, SignupBody};
use watchbook_api_client::loader::capitalize;
use watchbook_api_client::prelude::*;
use watchbook_api_client::session::{sign_in, sign_out, sign_up};

/// Sign in and persist the session
pub async fn login(ctx: &mut Context, username: String, password: String) -> Result<()> {
    let body = SigninBody { username, password };

    match sign_in(&mut ctx.client, &body).await? {
        FormOutcome::Success(signed_in) => {
            ctx.store.save(&signed_in.cookie)?;
            if ctx.json() {
                return output::print_json(&signed_in.cookie.user);
            }
            println!(
                "{} Signed in as {}",
                "✓".green(),
                signed_in.cookie.user.username.bold()
            );
            Ok(())
        }
        FormOutcome::Invalid(errors) => rejected(ctx, &errors),
    }
}

/// Create an account; the password is confirmed with itself
pub async fn register(ctx: &Context, username: String, password: String) -> Result<()> {
    let body = SignupBody {
        username,
        password_confirm: password.clone(),
        password,
    };

    match sign_up(&ctx.client, &body).await? {
        FormOutcome::Success(redirect) => {
            if ctx.json() {
                return output::print_json(&json!({"next": redirect.location}));
            }
            println!(
                "{} Account created, sign in with `watchbook login {}`",
                "✓".green(),
                body.username
            );
            Ok(())
        }
        FormOutcome::Invalid(errors) => rejected(ctx, &errors),
    }
}

/// Forget the stored session
pub fn logout(ctx: &mut Context) -> Result<()> {
    sign_out(&mut ctx.client);
    ctx.store.clear()?;
    if !ctx.json() {
        println!("{} Signed out", "✓".green());
    }
    Ok(())
}

pub async fn whoami(ctx: &mut Context) -> Result<()> {
    let state = ctx.session().await?;

    if ctx.json() {
        return output::print_json(&state.user());
    }

    match state.user() {
        Some(me) => {
            println!("  {} ({})", me.display_name.bold(), me.username);
            println!("  id:   {}", me.id.dimmed());
            println!("  role: {}", me.role);
        }
        None => println!("{}", "Not signed in".yellow()),
    }
    Ok(())
}

pub async fn change_password(ctx: &mut Context, current: String, new: String) -> Result<()> {
    ctx.require_user().await?;

    let body = ChangePasswordBody {
        current_password: current,
        new_password_confirm: new.clone(),
        new_password: new,
    };
    let response = ctx.client.auth().change_password(&body, None).await?;

    let outcome = unwrap_form(response, |failure| {
        failure.is(error_types::VALIDATION_ERROR).then(|| {
            let mut errors = FormErrors::new();
            for field in ["currentPassword", "newPassword", "newPasswordConfirm"] {
                let message = failure.extra.get(field).and_then(|v| v.as_str()).unwrap_or_default();
                errors.set(field, capitalize(message));
            }
            errors
        })
    })?;

    match outcome {
        FormOutcome::Success(_) => {
            if !ctx.json() {
                println!("{} Password changed", "✓".green());
            }
            Ok(())
        }
        FormOutcome::Invalid(errors) => rejected(ctx, &errors),
    }
}

pub async fn import_mal(ctx: &mut Context, username: &str) -> Result<()> {
    ctx.require_user().await?;
    page_data(ctx.client.users().import_mal_anime_list(username, None).await)?;

    if !ctx.json() {
        println!("{} Import of {} queued", "✓".green(), username.bold());
    }
    Ok(())
}

fn rejected(ctx: &Context, errors: &FormErrors) -> Result<()> {
    if ctx.json() {
        output::print_json(errors.fields())?;
    } else {
        output::form_errors(errors);
    }
    bail!("request rejected ({})", errors.status())
}
