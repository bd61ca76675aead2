use clap::Parser;

use autoserialize::cli::Args;
use autoserialize::{logging, run};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.silent);

    tracing::debug!(?args, "parsed arguments");

    run(args)
}
