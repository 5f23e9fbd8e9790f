use clap::Parser;
use lib::{DatasetLoader, ExploreConfig, ExploreError, Session, SimpleLogger};
use log::debug;
use std::io;
use std::path::PathBuf;

static LOGGER: SimpleLogger = SimpleLogger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Log level for output
    #[arg(long, default_value = "false")]
    debug: bool,
}

fn main() -> Result<(), ExploreError> {
    log::set_logger(&LOGGER).map_err(|e| ExploreError::Data(e.to_string()))?;

    let args = Args::parse();
    if args.debug {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Warn);
    }

    let config = ExploreConfig {
        data_dir: args.data_dir,
    };
    debug!("Reading city data from {}", config.data_dir.display());

    let loader = DatasetLoader::new(config.city_table());
    let stdin = io::stdin();
    let mut session = Session::new(loader, stdin.lock(), io::stdout());
    session.run()
}
