use clap::Parser;
use textdesk::cli::commands::Cli;
use textdesk::cli::handlers;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = handlers::load_config(cli.config.as_deref(), cli.api_url.as_deref())?;
    match cli.command {
        // No subcommand → launch TUI
        None => textdesk::tui::run(&config),
        Some(command) => handlers::dispatch(command, cli.json, &config),
    }
}
