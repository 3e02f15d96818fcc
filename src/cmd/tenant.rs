use crate::config::{ConfigManager, TenantConfig};
use crate::error::Result;
use crate::session::Service;
use chrono::Utc;
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct TenantAddArgs {
    /// Tenant name
    name: String,

    /// Tenant ID (Entra ID directory ID or primary domain)
    #[arg(long)]
    tenant_id: String,

    /// Tenant description
    #[arg(long)]
    description: Option<String>,
}

#[derive(Args, Debug)]
pub struct TenantListArgs {
    /// Show tenant IDs and session cache status
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
pub struct TenantSwitchArgs {
    /// Tenant name to switch to
    name: String,
}

#[derive(Args, Debug)]
pub struct TenantRemoveArgs {
    /// Tenant name to remove
    name: String,
}

pub async fn add(args: TenantAddArgs) -> Result<()> {
    let config_manager = ConfigManager::new()?;

    let tenant = TenantConfig {
        name: args.name.clone(),
        tenant_id: args.tenant_id,
        description: args.description,
    };

    config_manager.add_tenant(tenant)?;

    println!("{} Tenant '{}' added successfully", "✓".green(), args.name);
    println!(
        "\n{} Write a session cache to {} with your sign-in tooling",
        "→".cyan(),
        config_manager
            .session_cache_file(&args.name)
            .display()
            .to_string()
            .bold()
    );

    Ok(())
}

pub async fn list(args: TenantListArgs) -> Result<()> {
    let config_manager = ConfigManager::new()?;
    let tenants = config_manager.load_tenants()?;
    let config = config_manager.load_config()?;

    if tenants.is_empty() {
        println!("{} No tenants configured", "!".yellow());
        println!(
            "\n{} Run {} to add a tenant",
            "→".cyan(),
            "cis365 tenant add".bold()
        );
        return Ok(());
    }

    println!("\n{}", "Configured Tenants:".bold());
    println!("{}", "─".repeat(60));

    for tenant in &tenants {
        let is_current = config
            .current_tenant
            .as_deref()
            .is_some_and(|current| current.eq_ignore_ascii_case(&tenant.name));
        let marker = if is_current {
            "●".green()
        } else {
            "○".dimmed()
        };

        println!("\n{} {}", marker, tenant.name.bold());

        if args.verbose {
            println!("  Tenant ID:    {}", tenant.tenant_id);

            if let Some(desc) = &tenant.description {
                println!("  Description:  {}", desc);
            }

            print_session_status(&config_manager, &tenant.name);
        }
    }

    println!("\n{}", "─".repeat(60));
    println!("{} {} tenant(s) total", "→".cyan(), tenants.len());

    if let Some(current) = &config.current_tenant {
        println!("{} Active: {}", "→".cyan(), current.bold());
    }

    Ok(())
}

fn print_session_status(config_manager: &ConfigManager, tenant_name: &str) {
    let cache = match config_manager.load_session_cache(tenant_name) {
        Ok(cache) => cache,
        Err(_) => {
            println!("  Session:      {}", "No session cache".yellow());
            return;
        }
    };

    let now = Utc::now();
    for service in Service::all() {
        match cache.tokens.iter().find(|t| t.service == *service) {
            Some(token) if token.expires_at > now => println!(
                "  {:<18}{} (expires: {})",
                format!("{}:", service),
                "Valid".green(),
                token.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            Some(_) => println!("  {:<18}{}", format!("{}:", service), "Expired".red()),
            None => println!("  {:<18}{}", format!("{}:", service), "No token".dimmed()),
        }
    }
}

pub async fn switch(args: TenantSwitchArgs) -> Result<()> {
    let config_manager = ConfigManager::new()?;
    config_manager.set_active_tenant(&args.name)?;

    println!("{} Switched to tenant '{}'", "✓".green(), args.name);

    Ok(())
}

pub async fn remove(args: TenantRemoveArgs) -> Result<()> {
    let config_manager = ConfigManager::new()?;
    config_manager.remove_tenant(&args.name)?;

    println!("{} Tenant '{}' removed", "✓".green(), args.name);

    Ok(())
}
