//! `tally` -- daily habit tracker CLI.
//!
//! Entry point: parse arguments, build the runtime context, dispatch.
//! Everything that can fail returns `anyhow::Result` and is reported here,
//! once, on stderr (or as a JSON object under `--json`).

mod cli;
mod commands;
mod context;
mod output;

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

fn main() {
    // One Ctrl+C exits cleanly, a second one force-exits. No operation
    // here is long enough to want cancellation points.
    let _ = ctrlc::set_handler(|| {
        let exit_code = if CTRLC_RECEIVED.swap(true, Ordering::SeqCst) {
            1
        } else {
            0
        };
        std::process::exit(exit_code);
    });

    let cli = Cli::parse();
    let ctx = RuntimeContext::from_global_args(&cli.global);

    if ctx.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("tally=debug,tally_storage=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = dispatch(&ctx, cli.command) {
        report_error(ctx.json, &e);
        std::process::exit(1);
    }
}

fn dispatch(ctx: &RuntimeContext, command: Option<Commands>) -> Result<()> {
    let Some(command) = command else {
        // Bare `tally` prints help, like any multi-command tool.
        use clap::CommandFactory;
        Cli::command().print_help().ok();
        println!();
        return Ok(());
    };

    match command {
        Commands::Add(args) => commands::add::run(ctx, &args),
        Commands::List(args) => commands::list::run(ctx, &args),
        Commands::Log(args) => commands::log_cmd::run(ctx, &args),
        Commands::Undo(args) => commands::undo::run(ctx, &args),
        Commands::Rename(args) => commands::rename::run(ctx, &args),
        Commands::Target(args) => commands::target_cmd::run(ctx, &args),
        Commands::Archive(args) => commands::archive::run_archive(ctx, &args),
        Commands::Restore(args) => commands::archive::run_restore(ctx, &args),
        Commands::Stats(args) => commands::stats_cmd::run(ctx, &args),
        Commands::User(cmd) => commands::user_cmd::run(ctx, &cmd),
        Commands::Init(args) => commands::init::run(ctx, &args),
        Commands::Completion(args) => commands::completion::run(ctx, &args),
        Commands::Version => commands::version::run(ctx),
    }
}

fn report_error(json: bool, e: &anyhow::Error) {
    if json {
        let body = serde_json::json!({ "error": format!("{e:#}") });
        if let Ok(s) = serde_json::to_string_pretty(&body) {
            eprintln!("{s}");
        }
    } else {
        eprintln!("Error: {e:#}");
    }
}
