//! `tally user` -- account management (identity store).
//!
//! Accounts are identified by email; there is no credential surface. The
//! first account becomes the default account automatically.

use anyhow::{Context, Result, bail};
use chrono::Utc;

use tally_config::save_config;
use tally_core::idgen::{self, id_prefix};
use tally_core::user::User;
use tally_core::validation::validate_email;
use tally_storage::Storage;

use crate::cli::UserCommands;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_table};

/// Execute the `tally user` subcommands.
pub fn run(ctx: &RuntimeContext, cmd: &UserCommands) -> Result<()> {
    match cmd {
        UserCommands::Add { email } => run_add(ctx, email),
        UserCommands::List => run_list(ctx),
        UserCommands::Use { email } => run_use(ctx, email),
    }
}

/// Create an account.
fn run_add(ctx: &RuntimeContext, email: &str) -> Result<()> {
    let project = ctx.open_project()?;

    let email = email.trim();
    validate_email(email)?;

    let now = Utc::now();

    // Try up to 10 nonces to avoid ID collisions
    let mut user = None;
    for nonce in 0..10 {
        let candidate = idgen::generate_id(id_prefix::USER, email, now, nonce);
        match project.store.get_user(&candidate) {
            Err(e) if e.is_not_found() => {
                user = Some(User {
                    id: candidate,
                    email: email.to_string(),
                    created_at: now,
                });
                break;
            }
            Ok(_) => continue,
            Err(e) => return Err(e.into()),
        }
    }
    let user = user.context("failed to generate unique ID after 10 attempts")?;

    project.store.create_user(&user)?;

    // First account becomes the default.
    if project.config.default_user.is_none() {
        let mut config = project.config.clone();
        config.default_user = Some(user.email.clone());
        save_config(&project.tally_dir, &config)?;
    }

    if ctx.json {
        output_json(&user);
    } else if !ctx.quiet {
        println!("Created account {} ({})", user.email, user.id);
    }
    Ok(())
}

/// List accounts.
fn run_list(ctx: &RuntimeContext) -> Result<()> {
    let project = ctx.open_project()?;
    let users = project.store.list_users()?;

    if ctx.json {
        output_json(&users);
        return Ok(());
    }

    if users.is_empty() {
        if !ctx.quiet {
            println!("No accounts yet. Create one with 'tally user add <email>'.");
        }
        return Ok(());
    }

    let default = project.config.default_user.as_deref();
    let headers = &["EMAIL", "ID", "CREATED"];
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| {
            let marker = if Some(u.email.as_str()) == default {
                format!("{} (default)", u.email)
            } else {
                u.email.clone()
            };
            vec![
                marker,
                u.id.clone(),
                u.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect();
    output_table(headers, &rows);
    Ok(())
}

/// Select the default account.
fn run_use(ctx: &RuntimeContext, email: &str) -> Result<()> {
    let project = ctx.open_project()?;

    let email = email.trim();
    let user = match project.store.find_user_by_email(email) {
        Ok(user) => user,
        Err(e) if e.is_not_found() => bail!(
            "no account with email {email}\nHint: run 'tally user add {email}' to create it"
        ),
        Err(e) => return Err(e.into()),
    };

    let mut config = project.config.clone();
    config.default_user = Some(user.email.clone());
    save_config(&project.tally_dir, &config)?;

    if ctx.json {
        output_json(&serde_json::json!({ "default_user": user.email }));
    } else if !ctx.quiet {
        println!("Default account set to {}", user.email);
    }
    Ok(())
}
