use anyhow::Context;
use backlog_api::runtime::{self, Config};
use clap::Parser;

mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()>
{
	if let Err(error) = dotenvy::dotenv() {
		eprintln!("WARNING: no `.env` file found ({error})");
	}

	let config = Config::parse();
	let _guard = logging::init(config.log_dir.as_deref()).context("initialize logging")?;

	runtime::panic_hook::install();

	if cfg!(not(feature = "production")) {
		tracing::warn!("running in development mode");
	}

	backlog_api::run(config).await
}
