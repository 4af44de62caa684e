//! The `cascade` command: promote one change through the whole chain.

use crate::cli::prompt::TerminalPrompter;
use crate::cli::style::{Stylize, check, spinner_style};
use crate::cli::{Cli, CliProgress};
use anstream::println;
use anyhow::Context;
use chrono::Local;
use clap::Parser;
use indicatif::ProgressBar;
use pr_cascade::chain::{ChainContext, ChainOutcome, run_chain, validate_prerequisites};
use pr_cascade::config::RunConfig;
use pr_cascade::platform::GitHubService;
use pr_cascade::progress::Progress;
use pr_cascade::types::{EnvironmentSpec, RunState, filter_environments, short_hash};
use pr_cascade::vcs::{GitCli, Vcs};
use std::time::Duration;

/// Parse arguments and execute a full run.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = RunConfig::new(
        &cli.token,
        &cli.repo,
        &cli.api_url,
        cli.reviewers.clone(),
        cli.envs.clone(),
    )
    .context("invalid configuration")?;

    let envs = filter_environments(config.env_keys.as_deref())?;
    let mut state = RunState::new(cli.base_branch.clone(), cli.cherry_pick.clone());

    let vcs = GitCli::new();
    let platform = GitHubService::new(&config)?;
    let progress = CliProgress;
    let prompter = TerminalPrompter;

    print_banner(&config, &state, &envs);

    // Refresh local refs before validating anything.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message("Fetching latest changes...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    vcs.fetch_all();
    vcs.pull_current_branch();
    spinner.finish_with_message(format!("{} Fetched latest changes", check()));

    validate_prerequisites(&vcs, &progress, &state)?;

    let ctx = ChainContext {
        vcs: &vcs,
        platform: &platform,
        confirm: &prompter,
        progress: &progress,
        reviewers: &config.reviewers,
    };
    let outcome = run_chain(&ctx, &mut state, &envs).await?;

    // An operator stop terminates without the summary.
    if outcome.stopped {
        return Ok(());
    }

    print_summary(&outcome, envs.len());
    Ok(())
}

fn print_banner(config: &RunConfig, state: &RunState, envs: &[EnvironmentSpec]) {
    CliProgress.header("Sequential PR Creation");

    println!("{} {}/{}", "Repository:".emphasis(), config.owner, config.repo);
    println!("{} {}", "Base Branch:".emphasis(), state.base_branch);

    if state.is_cherry_pick() {
        println!("{} Cherry-Pick", "Mode:".emphasis());
        println!("{}", "Commits:".emphasis());
        for hash in &state.cherry_pick_commits {
            println!("  - {}", short_hash(hash));
        }
    } else {
        println!("{} Merge", "Mode:".emphasis());
    }

    let names: Vec<&str> = envs.iter().map(|env| env.name).collect();
    println!(
        "{} {}",
        "Target Environments:".emphasis(),
        names.join(", ").accent()
    );

    if !config.reviewers.is_empty() {
        println!("{} {}", "Reviewers:".emphasis(), config.reviewers.join(", "));
    }

    println!(
        "{} {}\n",
        "Timestamp:".emphasis(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
}

fn print_summary(outcome: &ChainOutcome, env_count: usize) {
    let progress = CliProgress;
    progress.header("Execution Summary");

    for result in &outcome.results {
        if result.success {
            println!("{}", format!("✓ {}:", result.environment).success());
            if let Some(branch) = &result.staging_branch {
                println!("  Branch: {branch}");
            }
            if let (Some(number), Some(url)) = (result.pr_number, &result.pr_url) {
                println!("  PR #{number}: {url}");
            }
        } else if result.skipped {
            println!(
                "{}",
                format!("⊘ {}: Skipped by user", result.environment).warn()
            );
            if let Some(branch) = &result.staging_branch {
                println!("  Branch: {branch}");
            }
        } else if result.has_conflicts {
            println!(
                "{}",
                format!("⚠ {}: Conflicts detected", result.environment).warn()
            );
            if let Some(branch) = &result.staging_branch {
                println!("  Branch: {branch}");
            }
        } else {
            println!("{}", format!("✗ {}: Failed", result.environment).err());
        }
        println!();
    }

    let successful = outcome.results.iter().filter(|r| r.success).count();
    let skipped = outcome.results.iter().filter(|r| r.skipped).count();

    if successful == env_count {
        progress.success("All PRs created successfully! 🎉");
    } else if successful > 0 {
        progress.success(&format!("{successful} PR(s) created successfully"));
        if skipped > 0 {
            progress.info(&format!("{skipped} environment(s) skipped"));
        }
    } else {
        progress.warning("No PRs were created");
    }
}
