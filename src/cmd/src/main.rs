use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use tracing_subscriber::FmtSubscriber;

use crate::error::Result;

mod command;
mod config;
mod error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the HTTP server
    Server {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Server { config: path } => {
            let cfg = config::load(path.as_deref())?;
            let cfg: common::config::Config = cfg.try_into()?;

            let subscriber = FmtSubscriber::builder()
                .with_max_level(cfg.log.level)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|err| anyhow::anyhow!(err))?;

            command::server::start(cfg).await
        }
    }
}
