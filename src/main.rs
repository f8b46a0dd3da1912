//! isoftrepo CLI entry point
//!
//! Parses arguments, runs the command and reports failures with suggestions.
//!
//! - `render` - Render a catalog page (categories, module, version, build)
//! - `config` - Show or initialize the server configuration

use anyhow::Result;
use clap::Parser;
use isoftrepo::cli;
use isoftrepo::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
