mod commands;
mod terminal;

use std::net::SocketAddr;

use commands::{CommandLine, Commands, options, scan, serve};
use terminal::{logging, print};
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    let commands = CommandLine::parse_args();

    logging::init(commands.quiet);
    match dotenv {
        Err(err) if !err.not_found() => warn!(error = %err, "failed to load .env file"),
        _ => {}
    }

    let cfg = commands.config();
    let quiet = commands.quiet;

    match commands.command {
        Commands::Serve { host, port } => {
            print::header("starting server", quiet);
            serve::serve(SocketAddr::new(host, port), &cfg).await
        }
        Commands::Scan(args) => {
            print::header("starting scanner", quiet);
            scan::scan(args, &cfg, quiet).await
        }
        Commands::Options => {
            options::options(quiet);
            Ok(())
        }
    }
}
