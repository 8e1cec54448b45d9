// # tophost-ddns - Dynamic DNS updater
//
// The binary is a thin integration layer:
// 1. Parse the command line
// 2. Load the settings file and apply command-line overrides
// 3. Initialize tracing
// 4. Log in, resolve the value to publish, run the reconciler
//
// All reconciliation logic lives in tophost-core; everything coupled to the
// panel's markup lives in tophost-panel.
//
// ## Configuration
//
// Settings come from a JSON file (default `config.json`, see `--config`)
// overridden by command-line arguments:
//
// ```json
// {
//   "username": "panel-user",
//   "password": "panel-pass",
//   "names": ["@", "www"],
//   "update_value_url": "https://ipinfo.io/ip",
//   "force_update": false,
//   "user_agent": ""
// }
// ```
//
// The log level is taken from the `TOPHOST_DDNS_LOG_LEVEL` environment
// variable (trace, debug, info, warn, error; default info).
//
// ## Exit codes
//
// - 0: run completed (or help was printed). Per-name failures and
//   page-access/scrape failures are reported through logging only.
// - 1: startup failure (configuration load, missing credentials, login,
//   or update-value lookup).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use tophost_core::config::{Credentials, Overrides, Settings};
use tophost_core::engine::Reconciler;
use tophost_core::traits::UpdateValueSource;
use tophost_panel::PanelClient;
use tophost_value_http::HttpValueSource;

/// Environment variable controlling the log level
const LOG_LEVEL_ENV: &str = "TOPHOST_DDNS_LOG_LEVEL";

/// Exit codes for different termination scenarios
///
/// Only startup failures are fatal to the exit code; failures during the
/// reconciliation phase are reported and leave the code at 0.
#[derive(Debug, Clone, Copy)]
enum UpdaterExitCode {
    /// Run completed (per-name failures included)
    Success = 0,
    /// Configuration, login or update-value failure
    StartupError = 1,
}

impl From<UpdaterExitCode> for ExitCode {
    fn from(code: UpdaterExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Keep Tophost DNS records pointed at a dynamic address
#[derive(Debug, Parser)]
#[command(name = "tophost-ddns", version)]
struct Cli {
    /// Control panel username
    #[arg(short = 'u', long)]
    username: Option<String>,

    /// Control panel password
    #[arg(short = 'p', long)]
    password: Option<String>,

    /// Name of a DNS record to update; repeat for several names
    /// (e.g. -n @ -n www). Replaces any names from the settings file.
    #[arg(short = 'n', long = "name")]
    names: Vec<String>,

    /// Value to publish (the public address is looked up when omitted)
    #[arg(short = 'v', long)]
    value: Option<String>,

    /// Update records even when the value is unchanged
    #[arg(short = 'f', long)]
    force: bool,

    /// User-agent header sent with every request
    #[arg(short = 'U', long)]
    user_agent: Option<String>,

    /// Path to the JSON settings file
    #[arg(short = 'c', long, default_value = "config.json")]
    config: PathBuf,
}

impl Cli {
    fn into_overrides(self) -> (PathBuf, Overrides) {
        let overrides = Overrides {
            username: self.username,
            password: self.password,
            names: self.names,
            update_value: self.value,
            user_agent: self.user_agent,
            force_update: self.force,
        };
        (self.config, overrides)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
        return UpdaterExitCode::StartupError.into();
    }

    let (config_path, overrides) = cli.into_overrides();

    // Resolve configuration: file first, command line on top
    let settings = match Settings::load(&config_path) {
        Ok(mut settings) => {
            settings.apply_overrides(overrides);
            settings
        }
        Err(e) => {
            error!("Failed to load config: {}", e);
            return UpdaterExitCode::StartupError.into();
        }
    };

    // Credentials must be present before any network call
    let credentials = match settings.credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("{}", e);
            return UpdaterExitCode::StartupError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return UpdaterExitCode::StartupError.into();
        }
    };

    rt.block_on(run(settings, credentials)).into()
}

/// Run one update pass: login, resolve value, reconcile
async fn run(settings: Settings, credentials: Credentials) -> UpdaterExitCode {
    let panel = match PanelClient::new(&settings.user_agent) {
        Ok(panel) => panel,
        Err(e) => {
            error!("{}", e);
            return UpdaterExitCode::StartupError;
        }
    };

    if let Err(e) = panel.login(&credentials).await {
        error!("{}", e);
        return UpdaterExitCode::StartupError;
    }

    let value = match resolve_update_value(&settings).await {
        Ok(value) => value,
        Err(e) => {
            error!("{}", e);
            return UpdaterExitCode::StartupError;
        }
    };

    info!("reconciling {} record name(s)", settings.names.len());

    let reconciler = Reconciler::new(Box::new(panel), settings.force_update);
    if let Err(e) = reconciler.run(&settings.names, &value).await {
        // Reconciliation-phase failures are reported but do not change the
        // exit code; per-name outcomes were already logged by the reconciler.
        error!("{}", e);
    }

    UpdaterExitCode::Success
}

/// The value to publish: explicit from configuration, or looked up over HTTP
async fn resolve_update_value(settings: &Settings) -> tophost_core::Result<String> {
    match &settings.update_value {
        Some(value) => Ok(value.clone()),
        None => {
            let source = HttpValueSource::new(&settings.update_value_url, &settings.user_agent)?;
            source.fetch().await
        }
    }
}

fn init_tracing() -> Result<()> {
    let level = match std::env::var(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
