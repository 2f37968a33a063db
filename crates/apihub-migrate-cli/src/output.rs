use colored::Colorize;
use tabled::builder::Builder;
use tabled::settings::Style;

use apihub_core::Tenant;
use apihub_migrate::MigrationReport;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_tenants(tenants: &[Tenant]) {
    if tenants.is_empty() {
        println!("No tenants found.");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(["Id", "Domain"]);
    for tenant in tenants {
        builder.push_record([tenant.id.to_string(), tenant.domain.clone()]);
    }
    let table = builder.build().with(Style::rounded()).to_string();
    println!("{table}");
    println!("Total: {}", tenants.len());
}

pub fn print_report(report: &MigrationReport, dry_run: bool) {
    if dry_run {
        println!("{}", "Dry run — nothing was written.".yellow());
    }
    println!("{report}");
    for failure in &report.failures {
        match &failure.path {
            Some(path) => print_error(&format!(
                "{}: {} — {}",
                failure.tenant, path, failure.message
            )),
            None => print_error(&format!("{}: {}", failure.tenant, failure.message)),
        }
    }
}
