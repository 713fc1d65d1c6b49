// MIT License - Copyright (c) 2026 Peter Wright
// Command-line front end

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::{debug, error};

use christie_lan_control::constants::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_PORT, DEFAULT_RESPONSE_LENGTH, DEFAULT_TIMEOUT,
};
use christie_lan_control::{ChristieProjector, ProjectorConfig, Response, Transport};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "christie-ctl")]
#[command(about = "Send TruLife+ commands to a Christie projector over TCP")]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Projector host name or IP address
    #[arg(long)]
    host: Option<String>,

    /// Projector TCP port
    #[arg(long)]
    port: Option<u16>,

    /// Receive timeout per command, in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// TCP connect timeout, in milliseconds
    #[arg(long)]
    connect_timeout_ms: Option<u64>,

    /// Maximum reply size in bytes
    #[arg(long)]
    response_length: Option<usize>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Print the raw system status
    Status,
    /// Query the power state, or set it to on/off and print the confirmed state
    Power { state: Option<String> },
    /// Query the shutter state, or close/open it
    Shutter { state: Option<String> },
    /// Send a raw command such as "(LMP?)" and print the reply
    Raw { command: String },
    /// Type commands line by line; "exit" quits
    Interactive,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct Config {
    #[serde(default)]
    projector: ProjectorToml,
}

#[derive(Debug, Deserialize)]
struct ProjectorToml {
    #[serde(default)]
    host: Option<String>,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_timeout")]
    timeout_ms: u64,
    #[serde(default = "default_connect_timeout")]
    connect_timeout_ms: u64,
    #[serde(default = "default_response_length")]
    response_length: usize,
}

impl Default for ProjectorToml {
    fn default() -> Self {
        Self {
            host: None,
            port: default_port(),
            timeout_ms: default_timeout(),
            connect_timeout_ms: default_connect_timeout(),
            response_length: default_response_length(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}
fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT.as_millis() as u64
}
fn default_response_length() -> usize {
    DEFAULT_RESPONSE_LENGTH
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&text).context("Failed to parse config file")
}

/// Command-line flags override the config file.
fn build_projector_config(cli: &Cli, toml: &ProjectorToml) -> Result<ProjectorConfig> {
    let host = cli
        .host
        .clone()
        .or_else(|| toml.host.clone())
        .context("No projector host configured; pass --host or set [projector].host")?;

    Ok(ProjectorConfig::builder()
        .host(host)
        .port(cli.port.unwrap_or(toml.port))
        .timeout_ms(cli.timeout_ms.unwrap_or(toml.timeout_ms))
        .connect_timeout_ms(cli.connect_timeout_ms.unwrap_or(toml.connect_timeout_ms))
        .response_length(cli.response_length.unwrap_or(toml.response_length))
        .build())
}

// ---------------------------------------------------------------------------
// Interactive loop
// ---------------------------------------------------------------------------

/// Forward each input line as one transaction until EOF or `exit`.
///
/// Connection failures are reported and the loop keeps going.
fn run_interactive<T, R, W>(projector: &ChristieProjector<T>, input: R, mut output: W) -> Result<()>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    writeln!(output, "Interactive mode. Type projector commands, \"exit\" to quit.")?;

    for line in input.lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().eq_ignore_ascii_case("exit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        match projector.raw(&line) {
            Ok(Response::Text(text)) => writeln!(output, "Projector: {}", text)?,
            Ok(response @ Response::NoResponse) => writeln!(output, "{}", response)?,
            Err(e) => error!("Command {} failed: {}", line, e),
        }
        output.flush()?;
    }

    debug!("Leaving interactive mode");
    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // RUST_LOG controls verbosity (e.g. RUST_LOG=christie_lan_control=debug).
    // Default: info.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // systemd journal already adds timestamps, so omit them when running under systemd
    if std::env::var_os("JOURNAL_STREAM").is_some() {
        tracing_subscriber::fmt()
            .without_time()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let projector_config = build_projector_config(&cli, &config.projector)?;
    let projector = ChristieProjector::new(projector_config);

    run_command(&projector, &cli.command, std::io::stdout())
}

/// Run a subcommand, printing its result to `output`.
fn run_command<T, W>(projector: &ChristieProjector<T>, command: &CliCommand, mut output: W) -> Result<()>
where
    T: Transport,
    W: Write,
{
    match command {
        CliCommand::Status => writeln!(output, "{}", projector.get_status()?)?,
        CliCommand::Power { state: None } => writeln!(output, "{}", projector.get_power_state()?)?,
        CliCommand::Power { state: Some(state) } => {
            writeln!(output, "{}", projector.set_power_state_str(state)?)?
        }
        CliCommand::Shutter { state: None } => {
            writeln!(output, "{}", projector.get_shutter_state()?)?
        }
        CliCommand::Shutter { state: Some(state) } => {
            writeln!(output, "{}", projector.set_shutter_state_str(state)?)?
        }
        CliCommand::Raw { command } => writeln!(output, "{}", projector.raw(command)?)?,
        CliCommand::Interactive => {
            let stdin = std::io::stdin();
            run_interactive(projector, stdin.lock(), &mut output)?
        }
    }
    output.flush()?;
    Ok(())
}
