//! ec2it CLI - EC2 instance and AMI lifecycle with tag conventions
//!
//! This is the main entry point for the ec2it command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands, ListArgs};
use ec2it_aws::AwsEc2;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI args
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    // One client per invocation, shared by every handler
    let client = AwsEc2::from_env().await;
    let config_path = cli.config.as_deref();

    // Run command; bare `ec2it` is `ec2it list`
    match cli.command.unwrap_or(Commands::List(ListArgs::default())) {
        Commands::List(args) => commands::list::run(args, &client).await,
        Commands::Start(args) => commands::start::run(args, &client).await,
        Commands::Stop(args) => commands::stop::run(args, &client).await,
        Commands::Launch(args) => commands::launch::run(args, &client, config_path).await,
        Commands::Terminate(args) => commands::terminate::run(args, &client).await,
        Commands::ListAmi(args) => commands::list_ami::run(args, &client).await,
        Commands::CreateAmi(args) => commands::create_ami::run(args, &client).await,
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
