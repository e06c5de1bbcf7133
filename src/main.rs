//! c2s-train - train spike-prediction ensembles from calcium recordings

use c2s_train::cli::Cli;
use c2s_train::{logging, Orchestrator};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbosity);

    let config = cli.into_config();
    match Orchestrator::default().run(&config) {
        Ok(outcome) => {
            println!("Saved experiment to {}", outcome.path.display());
            Ok(())
        }
        Err(err) if err.is_graceful() => {
            println!("{err}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
