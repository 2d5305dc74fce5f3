use clap::Parser;
use taskgroups::cli::commands::Cli;
use taskgroups::cli::handlers;
use taskgroups::io::config_io;
use taskgroups::io::logging::{self, LogTarget};

fn main() {
    let cli = Cli::parse();

    let config = match config_io::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    let data_path = cli.file.clone().unwrap_or_else(|| config.data.file.clone());

    match cli.command {
        None => {
            // No subcommand → launch TUI; logs go to a file
            let _guard = logging::init_logging(&config.log, LogTarget::File);
            if let Err(e) = taskgroups::tui::run(data_path, &config) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(command) => {
            logging::init_logging(&config.log, LogTarget::Stderr);
            if let Err(e) = handlers::dispatch(command, &data_path, cli.json) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
