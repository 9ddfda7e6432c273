use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = cvmatch_runner::Args::parse();

	cvmatch_runner::run(args).await
}
