//! ScreenRec CLI entry point

use std::process::ExitCode;

use clap::Parser;

use screenrec::cli::{
    app::{load_merged_config, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    ctl_cmd::handle_ctl_command,
    presenter::Presenter,
    service::run_service,
};
use screenrec::domain::capture::VideoProfile;
use screenrec::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut presenter = Presenter::new();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Ctl { action }) => {
            if let Err(e) = handle_ctl_command(action, &mut presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    // Merge config: defaults < file < env < cli
    let config = load_merged_config(cli.to_config()).await;

    // Reject an unparseable profile instead of silently recording at
    // the default geometry.
    if let Some(profile) = config.profile.as_ref() {
        if let Err(e) = profile.parse::<VideoProfile>() {
            presenter.error(&format!("Invalid profile: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    }

    run_service(config).await
}
