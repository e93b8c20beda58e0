//! jarvis — LLM-backed code review CLI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use jarvis::batch;
use jarvis::config::ServiceConfig;
use jarvis::constants;
use jarvis::dispatcher::{self, BackendTarget, Dispatcher};
use jarvis::env::Env;
use jarvis::models::ReviewType;
use jarvis::output::ReviewReport;
use jarvis::prompts;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::args::{BatchArgs, Cli, Command, PromptArgs, ReviewArgs};

#[tokio::main]
async fn main() {
    // Before logging starts, so `JARVIS_LOG` may come from `.env`. A missing
    // file is fine; variables already in the process win.
    dotenvy::dotenv().ok();
    init_tracing(&Env::real());

    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

/// Log to stderr, filtered by `JARVIS_LOG` (default: warn).
fn init_tracing(env: &Env) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(env))
        .init();
}

fn log_filter(env: &Env) -> EnvFilter {
    env.non_empty(constants::ENV_LOG)
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = ServiceConfig::load(&Env::real());

    match cli.command {
        Command::Review(args) => run_review(args, &config).await,
        Command::Prompt(args) => run_prompt(args).await,
        Command::Batch(args) => run_batch(args, &config).await,
        Command::Config => run_config(&config),
        Command::Types => run_types(),
    }
}

/// Review one snippet and print the result.
async fn run_review(args: ReviewArgs, config: &ServiceConfig) -> Result<()> {
    let source = args.input.validate_input().map_err(anyhow::Error::msg)?;
    let snippet = cli::read_snippet(&source).await?;
    let request = args.input.to_request(snippet)?;

    let dispatcher = Dispatcher::initialize(config).context("backend configuration")?;
    let outcome = dispatcher.review(&request.snippet, request.review_type).await?;
    let failed = !outcome.is_reviewed();

    let report = ReviewReport {
        review_type: request.review_type,
        backend: dispatcher.kind(),
        outcome,
    };
    print!("{}", args.format.render(&report));

    if failed {
        process::exit(1);
    }
    Ok(())
}

/// Print the prompt for a snippet without contacting any backend.
async fn run_prompt(args: PromptArgs) -> Result<()> {
    let source = args.input.validate_input().map_err(anyhow::Error::msg)?;
    let snippet = cli::read_snippet(&source).await?;
    let request = args.input.to_request(snippet)?;

    let prompt = prompts::build(&request.snippet, request.review_type);
    print!("{prompt}");
    if !prompt.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Review every file in a directory and write the text report.
async fn run_batch(args: BatchArgs, config: &ServiceConfig) -> Result<()> {
    let review_type = args.parsed_review_type()?;
    let dispatcher = Dispatcher::initialize(config).context("backend configuration")?;

    let report = batch::run(&dispatcher, &args.dir, review_type, Some(&args.output)).await?;
    report.write_to(&args.output).await?;

    eprintln!(
        "  {} {} reviewed, {} failed, {} skipped in {:.2}s → {}",
        "✔".green().bold(),
        report.reviewed_count(),
        report.entries.len() - report.reviewed_count(),
        report.skipped.len(),
        report.elapsed.as_secs_f64(),
        args.output.display().to_string().bold()
    );
    Ok(())
}

/// Show which settings are present and what they select.
fn run_config(config: &ServiceConfig) -> Result<()> {
    fn show(value: &Option<String>) -> String {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => "(not set)".dimmed().to_string(),
        }
    }

    let api_key = if config.cloud_api_key.as_deref().is_some_and(|k| !k.trim().is_empty()) {
        "[REDACTED]".to_string()
    } else {
        "(not set)".dimmed().to_string()
    };

    println!("{}", "Cloud backend".bold());
    println!("  {:<10} {api_key}", "api key:");
    println!("  {:<10} {}", "base url:", show(&config.cloud_base_url));
    println!("{}", "Local backend".bold());
    println!("  {:<10} {}", "model:", show(&config.local_model_name));
    println!("  {:<10} {}", "base url:", show(&config.local_base_url));
    println!("{} {}s", "Request timeout:".bold(), config.request_timeout.as_secs());
    println!();

    match dispatcher::select_backend(config) {
        Ok(BackendTarget::Cloud { base_url, .. }) => {
            println!("{} cloud ({base_url})", "Selected:".green().bold());
            Ok(())
        }
        Ok(BackendTarget::Local { model, base_url }) => {
            println!("{} local {model} ({base_url})", "Selected:".green().bold());
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// List the review types.
fn run_types() -> Result<()> {
    for review_type in ReviewType::ALL {
        let marker = if review_type == ReviewType::default() {
            " (default)".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "  {} {}{marker}",
            format!("{:<18}", review_type.tag()).bold(),
            review_type.description()
        );
    }
    Ok(())
}
