use clap::Parser;
use people_lookup::config::env;
use people_lookup::run_lookup;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Look up people by first name in a MongoDB collection.
#[derive(Parser, Debug)]
#[command(name = "people-lookup")]
#[command(version, about, long_about = None)]
struct Cli {
    /// First name to match exactly
    #[arg(default_value = "kim")]
    name: String,

    /// Environment file to load instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Print matching documents as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match &cli.env_file {
        Some(path) => env::load_from(path),
        None => env::load(),
    };

    tracing::info!("Starting the application");

    match run_lookup(&config, &cli.name).await {
        Ok(people) => {
            tracing::info!(name = %cli.name, count = people.len(), "Lookup finished");
            for person in &people {
                if cli.json {
                    match serde_json::to_string(person) {
                        Ok(line) => println!("{line}"),
                        Err(e) => tracing::warn!(error = %e, "Could not encode person as JSON"),
                    }
                } else {
                    println!("{} {} {}", person.id_hex(), person.first, person.rest);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "Lookup failed");
            eprintln!("Error ({}): {e}", e.kind());
            ExitCode::from(e.exit_code())
        }
    }
}
