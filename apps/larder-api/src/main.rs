use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = larder_api::Args::parse();

	larder_api::run(args).await
}
