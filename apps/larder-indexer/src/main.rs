use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = larder_indexer::Args::parse();

	larder_indexer::run(args).await
}
