use clap::{Parser, Subcommand};
use event_scanner::prelude::*;
use event_scanner::logging;
use std::path::PathBuf;
use std::time::Duration;

/// Let a language model pick the events worth going to
#[derive(Parser, Debug)]
#[command(name = "event-scanner")]
#[command(about = "Fetch an event feed and ask a hosted model to filter it by fixed interests")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// TOML config file
    #[arg(long, global = true, env = "EVENT_SCANNER_CONFIG")]
    config: Option<PathBuf>,

    /// Event source endpoint
    #[arg(long = "events-url", global = true, env = "EVENT_API_URL")]
    events_url: Option<String>,

    /// Completion API credential (falls back to ANTHROPIC_API_KEY)
    #[arg(long = "api-key", global = true, env = "CLAUDE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model identifier (default: claude-3-sonnet)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Maximum output tokens (default: 500)
    #[arg(long = "max-tokens", global = true)]
    max_tokens: Option<u32>,

    /// Completion API base URL (default: https://api.anthropic.com)
    #[arg(long = "api-base-url", global = true)]
    api_base_url: Option<String>,

    /// Per-request timeout in seconds (default: 60)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Fetch events, ask the model to filter them, print the answer (default)
    Scan,
    /// Fetch events and print the raw batch as JSON
    Events,
    /// Fetch events and print the prompt that would be sent
    Prompt,
}

/// An empty flag or environment value counts as unset
fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

/// Flags beat environment (handled by clap), which beats the config file.
/// `fallback_api_key` is the value of ANTHROPIC_API_KEY.
fn config_builder(args: &Args, fallback_api_key: Option<String>) -> anyhow::Result<ConfigBuilder> {
    let mut builder = match &args.config {
        Some(path) => ConfigBuilder::from_file(FileConfig::load(path)?),
        None => ConfigBuilder::new(),
    };

    if let Some(url) = non_empty(args.events_url.as_ref()) {
        builder = builder.events_url(url);
    }
    let api_key = non_empty(args.api_key.as_ref()).or(non_empty(fallback_api_key.as_ref()));
    if let Some(key) = api_key {
        builder = builder.api_key(key);
    }
    if let Some(model) = non_empty(args.model.as_ref()) {
        builder = builder.model(model);
    }
    if let Some(max_tokens) = args.max_tokens {
        builder = builder.max_tokens(max_tokens);
    }
    if let Some(url) = non_empty(args.api_base_url.as_ref()) {
        builder = builder.api_base_url(url);
    }
    if let Some(secs) = args.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder)
}

async fn run_scan_command(builder: ConfigBuilder) -> anyhow::Result<()> {
    let scanner = Scanner::from_config(builder.build()?)?;
    let text = scanner.scan().await?;
    println!("{}", text);
    Ok(())
}

async fn run_events_command(builder: ConfigBuilder) -> anyhow::Result<()> {
    let scanner = Scanner::from_source_config(&builder.build_source()?)?;
    let events = scanner.fetch_events().await?;
    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}

async fn run_prompt_command(builder: ConfigBuilder) -> anyhow::Result<()> {
    let scanner = Scanner::from_source_config(&builder.build_source()?)?;
    let prompt = scanner.build_prompt().await?;
    print!("{}", prompt.as_str());
    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    let builder = config_builder(&args, std::env::var("ANTHROPIC_API_KEY").ok())?;

    match args.command.unwrap_or(Command::Scan) {
        Command::Scan => run_scan_command(builder).await,
        Command::Events => run_events_command(builder).await,
        Command::Prompt => run_prompt_command(builder).await,
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
