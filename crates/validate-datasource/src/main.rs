mod load;

use anyhow::{Context, Result};
use clap::Parser;
use datasource_validation::{
    DatasourceConfig, DisabledBranches, HasErrors, PackageDefinition, SchemaTables,
    ValidationOptions, validate_with,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Validate a datasource configuration against a package definition
#[derive(Parser, Debug)]
#[command(name = "validate-datasource")]
#[command(version)]
#[command(about = "Validate datasource configurations against package definitions", long_about = None)]
struct Args {
    /// Path to the package definition (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    package: PathBuf,

    /// Path to the datasource configuration (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    datasource: PathBuf,

    /// List the variables of disabled inputs and streams with no error
    /// instead of leaving them out
    #[arg(long)]
    report_disabled: bool,

    /// Print the error tree on a single line
    #[arg(long)]
    compact: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "validate_datasource=info,datasource_validation=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Returns whether the datasource is free of errors
fn run() -> Result<bool> {
    let args = Args::parse();

    let package: PackageDefinition = load::load_document(&args.package)?;
    let datasource: DatasourceConfig = load::load_document(&args.datasource)?;

    let disabled_branches = if args.report_disabled {
        DisabledBranches::ReportNull
    } else {
        DisabledBranches::Omit
    };
    let options = ValidationOptions::new().with_disabled_branches(disabled_branches);

    let tables = SchemaTables::index(&package);
    let result = validate_with(&datasource, &tables, &options);

    let output = if args.compact {
        serde_json::to_string(&result)
    } else {
        serde_json::to_string_pretty(&result)
    }
    .context("Failed to serialize validation result")?;
    println!("{}", output);

    let errors = result.error_count();
    if errors == 0 {
        tracing::info!(
            datasource = %args.datasource.display(),
            package = %args.package.display(),
            "validation successful"
        );
    } else {
        tracing::info!(
            datasource = %args.datasource.display(),
            errors,
            "validation found errors"
        );
    }
    Ok(errors == 0)
}
