use anyhow::{Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use axum::Router;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use users_info::{UsersInfo, UsersInfoConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USERS_INFO: &str = "users_info";
const API_INGRESS: &str = "api_ingress";

/// Users Server - in-memory users CRUD over HTTP
#[derive(Parser)]
#[command(name = "users-server")]
#[command(about = "Users Server - in-memory users CRUD over HTTP")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Users Server starting");

    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

/// Typed module configs, with the ingress address defaulting to `server.host:server.port`.
fn module_configs(config: &AppConfig) -> Result<(UsersInfoConfig, ApiIngressConfig)> {
    let users: UsersInfoConfig = config.module_config(USERS_INFO)?;

    let mut ingress: ApiIngressConfig = config.module_config(API_INGRESS)?;
    if ingress.bind_addr.trim().is_empty() {
        ingress.bind_addr = config.bind_addr();
    }

    Ok((users, ingress))
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");
    let (users_cfg, ingress_cfg) = module_configs(&config)?;

    let users = UsersInfo::new(users_cfg);
    let ingress = ApiIngress::new(ingress_cfg);
    let router = ingress.build_router(users.register_rest(Router::new()));

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = runtime::shutdown::wait_for_shutdown().await {
            tracing::error!(error = %e, "Signal handler failed; stopping");
        }
        on_signal.cancel();
    });

    ingress
        .serve(router, cancel)
        .await
        .context("users-server terminated with an error")?;

    tracing::info!("Users Server stopped");
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let (users_cfg, ingress_cfg) = module_configs(&config)?;
    tracing::debug!(?users_cfg, ?ingress_cfg, "Module configuration");

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Listening address: {}", ingress_cfg.bind_addr);
    println!("{}", config.to_yaml()?);

    Ok(())
}
