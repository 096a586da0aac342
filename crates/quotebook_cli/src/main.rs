//! Terminal front end for the quote handlers.
//!
//! # Responsibility
//! - Map subcommands onto `QuoteApi` calls with a logged-in session.
//! - Print the response body as pretty JSON.
//!
//! # Invariants
//! - The process exit code is non-zero for any non-2xx response.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use quotebook_api::{ApiConfig, ApiResponse, QuoteApi, RequestContext};
use quotebook_core::{default_log_level, init_logging};
use serde_json::{json, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    if let Some(dir) = cli.log_dir.as_deref() {
        start_logging(dir, cli.log_level.as_deref())?;
    }

    let response = execute(&cli, &mut std::io::stdin().lock())?;
    println!("{}", serde_json::to_string_pretty(&response.body)?);

    if response.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn execute(cli: &Cli, stdin: &mut impl Read) -> Result<ApiResponse> {
    let config = resolve_config(cli);
    let user = non_blank(cli.user.as_deref()).unwrap_or(&config.username).to_string();
    let password = non_blank(cli.password.as_deref())
        .unwrap_or(&config.password)
        .to_string();
    let api = QuoteApi::new(config);

    let response = match &cli.command {
        Commands::Ping => ping_response(),
        command => match api.login(&user, &password) {
            Ok(ctx) => dispatch(&api, &ctx, command, stdin)?,
            Err(rejected) => rejected,
        },
    };
    log::info!("event=cli_command module=cli status={}", response.status);
    Ok(response)
}

fn dispatch(
    api: &QuoteApi,
    ctx: &RequestContext,
    command: &Commands,
    stdin: &mut impl Read,
) -> Result<ApiResponse> {
    let response = match command {
        Commands::Ping => ping_response(),
        Commands::List { query } => api.list_quotes(ctx, query.as_deref()),
        Commands::Suggest { term } => api.autocomplete(ctx, Some(term)),
        Commands::Show { order_number } => api.get_quote(ctx, *order_number),
        Commands::Create { file } => {
            let body = read_body(file.as_deref(), stdin)?;
            api.create_quote(ctx, &body)
        }
        Commands::Update { order_number, file } => {
            let body = read_body(file.as_deref(), stdin)?;
            api.update_quote(ctx, *order_number, &body)
        }
        Commands::Delete { order_number } => api.delete_quote(ctx, *order_number),
    };
    Ok(response)
}

fn ping_response() -> ApiResponse {
    ApiResponse::new(
        ApiResponse::OK,
        json!({
            "ping": quotebook_core::ping(),
            "version": quotebook_core::core_version(),
        }),
    )
}

fn resolve_config(cli: &Cli) -> ApiConfig {
    let mut config = ApiConfig::from_env();
    if let Some(db) = cli.db.as_ref().filter(|path| !path.as_os_str().is_empty()) {
        config.db_path = db.clone();
    }
    config
}

fn read_body(file: Option<&Path>, stdin: &mut impl Read) -> Result<Value> {
    let raw = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut raw = String::new();
            stdin
                .read_to_string(&mut raw)
                .context("failed to read quote JSON from stdin")?;
            raw
        }
    };

    serde_json::from_str(&raw).context("quote body is not valid JSON")
}

fn start_logging(dir: &Path, level: Option<&str>) -> Result<()> {
    let dir = absolute_dir(dir)?;
    let Some(dir) = dir.to_str() else {
        bail!("log directory is not valid UTF-8: {}", dir.display());
    };
    let level = non_blank(level).unwrap_or(default_log_level());
    init_logging(level, dir).context("failed to initialize logging")
}

fn absolute_dir(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    Ok(cwd.join(dir))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
