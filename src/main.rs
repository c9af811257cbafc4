//! userdesk console entry point.
//!
//! Wires the session core together (file-backed token store, session
//! evaluator, guard, HTTP client) and dispatches the parsed subcommand.
//! Configuration comes from the environment; see `config.rs`.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use userdesk::auth::guard::{Navigator, RouteGuard};
use userdesk::auth::session::Session;
use userdesk::auth::store::{FileStateStore, TokenStore};
use userdesk::cli::{App, Cli, TerminalNavigator};
use userdesk::client::ApiClient;
use userdesk::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Default to warnings only so command output stays clean; RUST_LOG
    // overrides.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let state = Arc::new(FileStateStore::new(&config.state_dir)?);
    let token_store: Arc<dyn TokenStore> = state.clone();
    let navigator: Arc<dyn Navigator> = Arc::new(TerminalNavigator);

    let session = Session::new(token_store.clone());
    let guard = RouteGuard::new(session.clone(), navigator.clone());
    let client = ApiClient::new(
        &config.api_base_url,
        Duration::from_secs(config.request_timeout_secs),
        token_store,
        navigator,
    )?;

    let app = App {
        client,
        session,
        guard,
        state,
    };

    userdesk::cli::run(&app, cli.command).await
}
