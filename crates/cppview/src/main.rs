use std::io;
use std::sync::Arc;

use clap::Parser;
use cppview::app::App;
use cppview::app::tree::CppTreeProvider;
use cppview::config::{Cli, ExplorerConfig, OutputMode};
use cppview::infra::fs::RealFileSystem;
use cppview::infra::logging;
use cppview::runtime::{self, print};
use tracing::{error, info};

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let current_dir = std::env::current_dir()?;
    let config = ExplorerConfig::from_cli(cli, &current_dir).map_err(io::Error::other)?;
    logging::init(&config.log_file, config.log_level)?;
    info!(root = %config.root.display(), output = ?config.output, "starting cppview");

    let provider = CppTreeProvider::new(Arc::new(RealFileSystem), config.root);

    match config.output {
        OutputMode::Print { depth, format } => {
            print::print_tree(&provider, depth, format, &mut io::stdout())
                .await
                .map_err(|print_error| {
                    error!(%print_error, "failed to print tree");

                    io::Error::other(print_error)
                })
        }
        OutputMode::Interactive => {
            let mut app = App::new(provider);

            runtime::run(&mut app).await
        }
    }
}
