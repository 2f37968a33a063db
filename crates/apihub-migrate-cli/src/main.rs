mod cli;
mod client;
mod config;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use apihub_migrate::AccessControlMigration;
use apihub_registry::TenantDirectory;

use cli::{Cli, Commands};
use client::HttpRegistry;
use output::{print_error, print_success};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let profile = &cli.profile;
    match &cli.command {
        Commands::AccessControl(args) => {
            let url = config::resolve_registry_url(&cli.registry_url, profile)?;
            let registry = Arc::new(HttpRegistry::new(&url, cli.token.clone()));
            let filter = args.filter()?;

            let migration =
                AccessControlMigration::new(registry.clone()).with_dry_run(args.dry_run);
            let report = migration.run_directory(registry.as_ref(), &filter).await?;

            output::print_report(&report, args.dry_run);
            if report.is_clean() {
                print_success("access control migration finished");
            } else {
                anyhow::bail!(
                    "{} failure(s) during migration, see above",
                    report.failures.len()
                );
            }
        }
        Commands::Tenants => {
            let url = config::resolve_registry_url(&cli.registry_url, profile)?;
            let registry = HttpRegistry::new(&url, cli.token.clone());
            let tenants = registry.tenants().await?;
            output::print_tenants(&tenants);
        }
        Commands::Config(args) => match &args.command {
            cli::ConfigCommands::Show => {
                let cfg = config::load_profile(profile)?;
                println!("{}: {}", "Profile".cyan(), profile);
                println!(
                    "{}: {}",
                    "Registry".cyan(),
                    cfg.registry_url.as_deref().unwrap_or("(not set)")
                );
            }
            cli::ConfigCommands::Set(set_args) => {
                let mut cfg = config::load_profile(profile)?;
                match set_args.key.as_str() {
                    "registry-url" => cfg.registry_url = Some(set_args.value.clone()),
                    other => {
                        anyhow::bail!("Unknown config key: {other}. Valid keys: registry-url")
                    }
                }
                config::save_profile(profile, &cfg)?;
                print_success(&format!("Set {} = {}", set_args.key, set_args.value));
            }
        },
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("APIHUB_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
