use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use hoteldesk::cli::{Cli, Commands, ConfigAction, generate_completions};
use hoteldesk::commands::{
    ListOptions, cmd_browse, cmd_config_get, cmd_config_set, cmd_config_show, cmd_list,
    cmd_login, cmd_logout, cmd_resources,
};

/// Environment variable holding the log filter (e.g. `hoteldesk=debug`).
const LOG_ENV: &str = "HOTELDESK_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List {
            resource,
            page,
            limit,
            search,
            filters,
            sort,
            json,
        } => {
            cmd_list(
                resource,
                ListOptions {
                    page,
                    limit,
                    search,
                    filters,
                    sort,
                    json,
                },
            )
            .await
        }
        Commands::Browse { resource } => cmd_browse(resource).await,
        Commands::Resources { json } => cmd_resources(json),
        Commands::Login { token, json } => cmd_login(token, json),
        Commands::Logout { json } => cmd_logout(json),
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => cmd_config_show(json),
            ConfigAction::Get { key, json } => cmd_config_get(&key, json),
            ConfigAction::Set { key, value, json } => cmd_config_set(&key, &value, json),
        },
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
