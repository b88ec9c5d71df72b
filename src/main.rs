use anyhow::Result;
use clap::Parser;
use deepfake_check::cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    if let Err(err) = cli::dispatch(args).await {
        // config and input errors can happen before the subscriber exists
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
    Ok(())
}
