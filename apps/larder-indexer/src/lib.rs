pub mod indexer;

use std::path::PathBuf;

use clap::Parser;
use qdrant_client::Qdrant;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
	version = larder_cli::VERSION,
	rename_all = "kebab",
	styles = larder_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = larder_config::load(&args.config)?;
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();

	let client = Qdrant::from_url(&config.storage.qdrant.url).build()?;

	indexer::run_index(&config, &client).await
}
