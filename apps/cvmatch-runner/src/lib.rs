pub mod pipeline;
pub mod read;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
	version = cvmatch_cli::VERSION,
	rename_all = "kebab",
	styles = cvmatch_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = cvmatch_config::load(&args.config)?;

	init_tracing(&config);

	pipeline::run(config).await
}

fn init_tracing(config: &cvmatch_config::Config) {
	let filter = EnvFilter::try_new(&config.runner.log_level)
		.unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
