mod cmd;

use cis365::{admin, checks, config, error, session};
use clap::{Parser, Subcommand};
use colored::Colorize;

#[derive(Parser, Debug)]
#[command(
    name = "cis365",
    about = "CIS Microsoft 365 Foundations Benchmark checks",
    version,
    long_about = "Read-only compliance checks for the CIS Microsoft 365 Foundations Benchmark\n\n\
                  Runs benchmark controls against Exchange Online, Entra ID, SharePoint and Teams\n\
                  using a session established by your sign-in tooling."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List benchmark controls in the catalog
    List(cmd::catalog::ListArgs),

    /// Show the metadata of one control
    Show(cmd::catalog::ShowArgs),

    /// Run controls against a tenant
    Run(cmd::run::RunArgs),

    /// Manage tenant configurations
    #[command(subcommand)]
    Tenant(TenantCommands),
}

#[derive(Subcommand, Debug)]
enum TenantCommands {
    /// Add a new tenant
    Add(cmd::tenant::TenantAddArgs),

    /// List configured tenants
    List(cmd::tenant::TenantListArgs),

    /// Switch the active tenant
    Switch(cmd::tenant::TenantSwitchArgs),

    /// Remove a tenant
    Remove(cmd::tenant::TenantRemoveArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

async fn run() -> error::Result<i32> {
    let cli = Cli::parse();

    // Initialize logging: --verbose wins over log_level in config.toml
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config::ConfigManager::load()
            .and_then(|manager| manager.load_config())
            .map(|config| config.log_level)
            .unwrap_or_default()
    };

    if !log_level.trim().is_empty() {
        tracing_subscriber::fmt()
            .with_env_filter(format!("cis365={}", log_level.trim()))
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::List(args) => cmd::catalog::list(args).await?,
        Commands::Show(args) => cmd::catalog::show(args).await?,
        Commands::Run(args) => return cmd::run::run(args).await,
        Commands::Tenant(tenant_cmd) => match tenant_cmd {
            TenantCommands::Add(args) => cmd::tenant::add(args).await?,
            TenantCommands::List(args) => cmd::tenant::list(args).await?,
            TenantCommands::Switch(args) => cmd::tenant::switch(args).await?,
            TenantCommands::Remove(args) => cmd::tenant::remove(args).await?,
        },
    }

    Ok(0)
}
