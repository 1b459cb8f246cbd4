use anyhow::Context;
use clap::Parser;
use log::{Level, info, warn};
use oncoxtract::Pipeline;
use simple_logger::init_with_level;

mod cli;

use cli::{Cli, Step};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_with_level(if cli.verbose { Level::Debug } else { Level::Info })
        .context("Could not initialise logging")?;

    let start = std::time::Instant::now();
    let step = cli.command.step();
    let config = cli
        .command
        .config()
        .context("Could not build the run configuration")?;
    let mut pipeline = Pipeline::try_from(config).context("Invalid run configuration")?;

    match step {
        Step::Extract => {
            pipeline.extract_configured()?;
        }
        Step::Oncoprint => {
            if pipeline.oncoprint()?.is_none() {
                warn!("No patients selected. Nothing written.");
            }
        }
        Step::Clinical => {
            pipeline.clinical()?;
        }
        Step::MutationMap => {
            let written = pipeline.mutation_map()?;
            info!("Wrote {} mutation map files", written.len());
        }
        Step::GeneCounts => {
            pipeline.gene_counts()?;
        }
        Step::Run => pipeline.run()?,
    }

    info!("Elapsed time: {:?}", start.elapsed());
    Ok(())
}
