// src/main.rs
use anyhow::Result;
use clap::Parser;
use quicknotes::cli::args::Args;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Diagnostics go to stderr so list/show output stays pipeable
    let directive = format!("quicknotes={}", args.log_level()).parse()?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    quicknotes::run(args).await
}
