// src/main.rs

use devserve::errors::DevserveError;
use devserve::{cli, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(()) => {}
        Err(DevserveError::Cancelled) => {
            // Interrupt already killed every child; this is a clean exit.
            tracing::info!("exiting");
        }
        Err(err) => {
            eprintln!("devserve error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> devserve::errors::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
