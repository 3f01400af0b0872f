//! Dedicated TUI entry point

use anyhow::Result;
use tracing::{error, info};

use uniadmin::config::Config;
use uniadmin::tui;

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "uniadmin=info");
    }

    // Log to file only; writing to the terminal would corrupt the display
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("uniadmin-tui.log")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    info!("Starting uniadmin TUI");

    let config = Config::from_env()?;
    config.validate()?;

    match tui::run_tui(config).await {
        Ok(_) => {
            info!("TUI exited successfully");
            Ok(())
        }
        Err(e) => {
            error!("TUI encountered an error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
