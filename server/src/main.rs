use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use platform_obs::{ObsConfig, init_tracing};
use platform_storage::{PersistedState, StateBackend};
use products_hr::HrStore;
use tracing::{error, info};

use server::config::AppConfig;
use server::http::{self, AppState, ServeConfig};
use server::seed;

#[derive(Parser, Debug)]
#[command(name = "staffboard", version, about = "Staffboard HR dashboard backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the JSON API server.
    Serve(ServeCommand),
    /// Fetch seed employees and write the state file.
    Seed,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();
    let config = Arc::new(AppConfig::load()?);
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, config).await,
        Command::Seed => run_seed(config).await,
    }
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let backend: Arc<dyn StateBackend> = Arc::new(config.storage.backend());
    let initial = backend.load()?.unwrap_or_default();
    let needs_seed = initial.employees.is_empty();
    let store = HrStore::new(initial.employees, initial.filters);
    let state = AppState::new(store, backend, config);

    // Fire-and-forget: a failed fetch leaves the roster empty.
    if needs_seed {
        let seed_state = state.clone();
        tokio::spawn(async move {
            match seed::fetch_employees(&seed_state.config().seed_url).await {
                Ok(employees) => {
                    info!(count = employees.len(), "seeded employee roster");
                    seed_state.replace_employees(employees);
                }
                Err(err) => error!(error = %err, "seed fetch failed; starting with an empty roster"),
            }
        });
    }

    http::serve(cmd.into(), state).await
}

async fn run_seed(config: Arc<AppConfig>) -> Result<()> {
    let employees = seed::fetch_employees(&config.seed_url).await?;
    let state = PersistedState {
        employees,
        filters: Default::default(),
    };
    config.storage.backend().save(&state)?;
    info!(
        count = state.employees.len(),
        path = %config.storage.path().display(),
        "seed data written"
    );
    Ok(())
}
