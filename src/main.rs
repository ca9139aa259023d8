use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;

use urban_lookup::config::{LogFormat, SkillConfig};
use urban_lookup::event::Event;
use urban_lookup::lookup::urban::UrbanDictionary;
use urban_lookup::response::ResponseEnvelope;
use urban_lookup::skill::{Handler, InvocationError};
use urban_lookup::skill::dispatcher::Dispatcher;
use urban_lookup::telemetry;

#[derive(Parser)]
#[command(
    name = "urban-lookup",
    version,
    about = "Answers voice skill events with Urban Dictionary definitions."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Event JSON file (reads stdin when omitted)
    #[arg(short, long)]
    event: Option<PathBuf>,

    /// Config file (default: ~/.urban-lookup/config.json if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Define endpoint, overrides config
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Lookup timeout in seconds, overrides config
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    /// Only accept events from this application id
    #[arg(long, global = true)]
    application_id: Option<String>,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    /// Log filter directive, e.g. `debug` or `urban_lookup=trace`
    #[arg(long, global = true)]
    log_filter: Option<String>,

    /// Pretty-print the response
    #[arg(long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Define a word or phrase without writing an event by hand
    Define {
        /// Word or phrase to look up
        term: String,
    },
}

impl Cli {
    fn resolve_config(&self) -> Result<SkillConfig> {
        let mut config =
            SkillConfig::load(self.config.as_deref()).context("failed to load configuration")?;
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = Some(timeout);
        }
        if let Some(id) = &self.application_id {
            config.application_id = Some(id.clone());
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(filter) = &self.log_filter {
            config.log_filter = filter.clone();
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    telemetry::init(config.log_format, &config.log_filter)?;

    let lookup = UrbanDictionary::new(&config.endpoint, config.timeout())
        .context("failed to build lookup client")?;
    let mut dispatcher = Dispatcher::new(Arc::new(lookup));
    if let Some(id) = &config.application_id {
        dispatcher = dispatcher.with_application_id(id.clone());
    }

    let event: Result<serde_json::Value, InvocationError> = match &cli.command {
        Some(Command::Define { term }) => {
            let mut event = Event::lookup_intent(term);
            if let Some(id) = &config.application_id {
                event.session.application.application_id = id.clone();
            }
            Ok(serde_json::to_value(event)?)
        }
        None => {
            let raw = read_event(cli.event.as_deref()).await?;
            serde_json::from_str(&raw).map_err(InvocationError::from)
        }
    };

    let outcome = match event {
        Ok(event) => dispatcher.handle(event).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(Some(response)) => print_response(&response, cli.pretty),
        Ok(None) => Ok(()),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Read raw event text from `path`, or stdin when `None`.
async fn read_event(path: Option<&std::path::Path>) -> Result<String> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read event {}", path.display()))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("failed to read event from stdin")?;
            raw
        }
    };
    Ok(raw)
}

fn print_response(response: &ResponseEnvelope, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        serde_json::to_string(response)?
    };
    println!("{out}");
    Ok(())
}
