use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use release_bump::cli::orchestration::{run_release_workflow, ReleaseWorkflowArgs};
use release_bump::cli::Args;
use release_bump::config;
use release_bump::git::Git2Repository;
use release_bump::ui;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run(args: Args) -> Result<()> {
    let env = |key: &str| std::env::var(key).ok();
    let bump = args.resolve_bump(env)?;
    let dry_run = args.resolve_dry_run(env);

    let config = config::load_config(args.config.as_deref(), &args.dir)
        .context("Error loading config")?;

    let repo = Git2Repository::open(&args.dir).context("Git repository error")?;

    let workflow_args = ReleaseWorkflowArgs {
        root: args.dir.clone(),
        bump,
        dry_run,
        push: config.push && !args.no_push,
    };

    ui::display_status(&format!("Preparing {} release...", bump));
    let result = run_release_workflow(&workflow_args, &config, &repo)?;

    ui::display_version_change(&result.old_version, &result.new_version);
    for warning in &result.warnings {
        ui::display_warning(warning);
    }

    if result.dry_run {
        ui::display_dry_run(&result.steps);
        return Ok(());
    }

    if let Some(commit) = &result.commit {
        ui::display_success(&format!("Created release commit {}", &commit[..commit.len().min(7)]));
    }
    ui::display_success(&format!("Created tag: {}", result.tag));
    if result.pushed {
        ui::display_success(&format!("Pushed {} to {}", result.tag, config.remote));
    }
    ui::display_released(&result.tag, &result.old_version, result.pushed);

    Ok(())
}
