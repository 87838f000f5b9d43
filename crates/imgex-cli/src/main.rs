use imgex_core::logging;

mod cli;

use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.log_file {
        if let Err(e) = logging::init_logging() {
            logging::init_logging_stderr();
            tracing::warn!("file logging unavailable, using stderr: {:#}", e);
        }
    } else {
        logging::init_logging_stderr();
    }

    if let Err(err) = cli.run().await {
        eprintln!("imgex error: {:#}", err);
        std::process::exit(1);
    }
}
