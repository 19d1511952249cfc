use anyhow::Result;
use clap::Parser;
use segsheet::cli::{Cli, USAGE};
use segsheet::error::AppError;

fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --debug
    let default_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Run the main application logic from the library
    if let Err(e) = segsheet::run(&cli) {
        if let Some(AppError::MissingRequiredArgs) = e.downcast_ref::<AppError>() {
            eprintln!();
            eprintln!("{}", USAGE);
            eprintln!();
            eprintln!("Please see help menu for details.");
            eprintln!();
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
