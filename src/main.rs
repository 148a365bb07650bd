//! PokerNow table watcher.
//!
//! Main entry point: attaches Chrome to a PokerNow game, prints the table
//! state on a fixed cadence and performs single table actions.

mod cli;
mod display;
mod table_session;
mod watcher;

use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use pokernow_browser::{BrowserManager, BrowserManagerConfig, CdpPage, CookieStore};
use pokernow_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use pokernow_protocols::DomAccessor;
use pokernow_runloop::{until_cancelled, PollLoop, StopReason};
use pokernow_table::{Action, ActionHelper, ActionOutcome};

use crate::cli::{Cli, Commands};
use crate::table_session::TableSession;
use crate::watcher::TableWatcher;

/// Initialize tracing with console and optional daily-rolling file output.
///
/// `RUST_LOG` overrides the configured level. The returned guard flushes the
/// file writer on drop.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let console = fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let (file, guard) = if logging.file {
        let log_dir = ConfigLoader::expand_path(&logging.dir);
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("pokernow")
            .filename_suffix("log")
            .max_log_files(14)
            .build(&log_dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let layer = fmt::layer().with_writer(non_blocking).with_ansi(false).boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    Ok(guard)
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let path = ConfigLoader::expand_path(path);
    let config = ConfigLoader::load_or_default(&path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    Ok(config)
}

/// Report validation problems; errors abort.
fn check_config(config: &Config) -> anyhow::Result<()> {
    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    for err in &result.errors {
        error!("Config {}: {}", err.path, err.message);
    }
    if !result.is_valid() {
        bail!("Invalid configuration ({} errors)", result.errors.len());
    }
    Ok(())
}

fn browser_config(config: &Config) -> BrowserManagerConfig {
    let browser = &config.browser;
    BrowserManagerConfig {
        debug_port: browser.debug_port,
        profile_dir: Some(ConfigLoader::expand_path(&browser.profile_dir())),
        chrome_path: browser.chrome_path.as_deref().map(ConfigLoader::expand_path),
        headless: browser.headless,
        launch: browser.launch,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;
    let _guard = init_tracing(&config.logging)?;

    info!("Starting pokernow v{}", env!("CARGO_PKG_VERSION"));

    let command = cli.command.unwrap_or_else(Commands::watch_default);
    if let Commands::Watch { budget, interval, .. } = &command {
        if let Some(budget) = budget {
            config.poll.budget_seconds = *budget;
        }
        if let Some(interval) = interval {
            config.poll.interval_seconds = *interval;
        }
    }
    check_config(&config)?;

    let manager = BrowserManager::new(browser_config(&config));
    let cookies = CookieStore::new(ConfigLoader::expand_path(&config.session.cookie_path));

    let url = match &command {
        Commands::Watch { url, .. } | Commands::Act { url, .. } => cli::resolve_url(url.clone())?,
    };

    // Installed before Chrome is touched so an interrupt always reaches shutdown.
    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, stopping");
                cancel.cancel();
            }
        })
    };

    let result = match command {
        Commands::Watch { .. } => run_watch(&manager, &cookies, &config, &url, &cancel).await,
        Commands::Act { action, amount, .. } => {
            run_act(&manager, &cookies, &config, &url, action, amount, &cancel).await
        }
    };
    ctrl_c.abort();

    if let Err(e) = manager.shutdown().await {
        warn!("Browser shutdown failed: {}", e);
    }
    result
}

/// Watch the table until the budget is spent, Ctrl-C or a dead session.
async fn run_watch(
    manager: &BrowserManager,
    cookies: &CookieStore,
    config: &Config,
    url: &str,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let Some(session) = until_cancelled(cancel, TableSession::open(manager, cookies, config, url)).await
    else {
        println!("Script interrupted by user.");
        return Ok(());
    };
    let session = session?;

    let page: Arc<dyn DomAccessor> = Arc::new(session.page().clone());
    let mut watcher = TableWatcher::new(page, std::io::stdout());
    let poll_loop = PollLoop::new(config.poll.interval(), config.poll.budget());
    let report = poll_loop.run(&mut watcher, cancel.clone()).await;

    match &report.stop {
        StopReason::BudgetExhausted => {
            println!(
                "Script ran for {} seconds and will now exit.",
                config.poll.budget_seconds
            );
        }
        StopReason::Cancelled => println!("Script interrupted by user."),
        StopReason::Fatal(msg) => error!("Browser session lost: {}", msg),
    }

    session.close(cookies).await;

    match report.stop {
        StopReason::Fatal(msg) => bail!("Watch ended early: {}", msg),
        _ => Ok(()),
    }
}

/// Perform one action on the table.
async fn run_act(
    manager: &BrowserManager,
    cookies: &CookieStore,
    config: &Config,
    url: &str,
    action: Action,
    amount: Option<u64>,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let Some(session) = until_cancelled(cancel, TableSession::open(manager, cookies, config, url)).await
    else {
        bail!("{} interrupted before the table loaded", action);
    };
    let session = session?;

    let helper = ActionHelper::new(config.poll.element_timeout());
    let page: &CdpPage = session.page();
    let outcome = until_cancelled(cancel, helper.perform(page, action, amount)).await;
    session.close(cookies).await;

    let Some(outcome) = outcome else {
        bail!("{} interrupted", action);
    };
    match outcome? {
        ActionOutcome::Performed => {
            println!("{} done.", action);
            Ok(())
        }
        ActionOutcome::Unavailable => bail!("{} is not available right now", action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A manager that fails if anything tries to reach Chrome.
    fn offline_manager() -> BrowserManager {
        BrowserManager::new(BrowserManagerConfig {
            debug_port: 9,
            launch: false,
            ..Default::default()
        })
    }

    fn interrupted() -> CancellationToken {
        let cancel = CancellationToken::new();
        cancel.cancel();
        cancel
    }

    const URL: &str = "https://www.pokernow.club/games/pglXyz";

    #[tokio::test]
    async fn test_watch_interrupted_before_table_loads_reaches_teardown() {
        let manager = offline_manager();
        let cookies = CookieStore::new(std::env::temp_dir().join("pokernow-unused-cookies.json"));

        let result = run_watch(&manager, &cookies, &Config::default(), URL, &interrupted()).await;

        assert!(result.is_ok());
        assert!(manager.shutdown().await.is_ok());
    }

    #[tokio::test]
    async fn test_act_interrupted_before_table_loads_reports_it() {
        let manager = offline_manager();
        let cookies = CookieStore::new(std::env::temp_dir().join("pokernow-unused-cookies.json"));

        let err = run_act(
            &manager,
            &cookies,
            &Config::default(),
            URL,
            Action::Fold,
            None,
            &interrupted(),
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Fold interrupted"));
        assert!(manager.shutdown().await.is_ok());
    }

    #[tokio::test]
    async fn test_watch_without_browser_fails_when_not_interrupted() {
        let manager = offline_manager();
        let cookies = CookieStore::new(std::env::temp_dir().join("pokernow-unused-cookies.json"));

        let result =
            run_watch(&manager, &cookies, &Config::default(), URL, &CancellationToken::new()).await;

        assert!(result.is_err());
    }
}
