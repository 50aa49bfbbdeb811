//! PasteDeck CLI entry point

use std::process::ExitCode;

use clap::Parser;

use pastedeck::cli::{
    app::{run, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use pastedeck::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let presenter = Presenter::new();
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    run(cli).await
}
