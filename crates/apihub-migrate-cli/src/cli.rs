use clap::{Parser, Subcommand};

use apihub_migrate::{SelectionError, TenantFilter, TenantSelection, parse_id_range};

#[derive(Parser)]
#[command(name = "apihub-migrate")]
#[command(about = "ApiHub registry migration tool")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Registry base URL (overrides config and APIHUB_URL env var)
    #[arg(short = 'r', long, global = true, env = "APIHUB_URL")]
    pub registry_url: Option<String>,

    /// Config profile name
    #[arg(short, long, global = true, env = "APIHUB_PROFILE", default_value = "default")]
    pub profile: String,

    /// Bearer token for the admin API
    #[arg(long, global = true, env = "APIHUB_TOKEN")]
    pub token: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Repair publisher and store visibility role properties
    AccessControl(AccessControlArgs),
    /// List the tenants the registry knows about
    Tenants,
    /// Manage CLI configuration
    Config(ConfigArgs),
}

#[derive(clap::Args)]
pub struct AccessControlArgs {
    /// Comma-separated tenant domains to migrate (default: all tenants)
    #[arg(long, value_delimiter = ',')]
    pub tenants: Vec<String>,

    /// Tenant id range to migrate, e.g. 30-210
    #[arg(long, conflicts_with = "tenants")]
    pub tenant_range: Option<String>,

    /// Comma-separated tenant domains to skip
    #[arg(long, value_delimiter = ',')]
    pub deny_tenants: Vec<String>,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl AccessControlArgs {
    /// Builds the tenant filter described by the arguments.
    pub fn filter(&self) -> Result<TenantFilter, SelectionError> {
        let selection = if let Some(range) = &self.tenant_range {
            parse_id_range(range)?
        } else if !self.tenants.is_empty() {
            TenantSelection::Domains(self.tenants.clone())
        } else {
            TenantSelection::All
        };
        Ok(TenantFilter::new(selection).with_deny_list(self.deny_tenants.clone()))
    }
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Set config value
    Set(ConfigSetArgs),
}

#[derive(clap::Args)]
pub struct ConfigSetArgs {
    /// Config key (valid keys: registry-url)
    pub key: String,
    /// Value to store
    pub value: String,
}
