//! Log capturing facilities.

use std::path::Path;

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

mod stderr;
mod files;

/// Keeps file logging alive.
#[derive(Debug)]
pub struct Guard
{
	/// The guard returned by [`tracing-appender`]'s logging thread.
	#[allow(dead_code)]
	appender_guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Initializes [`tracing-subscriber`].
///
/// Levels are controlled through `RUST_LOG`. Logs always go to stderr, and
/// additionally to daily rotated files if `log_dir` is set.
///
/// NOTE: the returned [`Guard`] will perform cleanup for the layer that emits
/// logs to files, which means it has to stay alive until the program exits!
pub fn init(log_dir: Option<&Path>) -> anyhow::Result<Option<Guard>>
{
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new("backlog_api=info,tower_http=info,warn"));

	let (files, appender_guard) = log_dir
		.map(|log_dir| files::layer(log_dir))
		.transpose()
		.context("initialize file logging")?
		.unzip();

	let layer = Layer::and_then(stderr::layer(), files);

	tracing_subscriber::registry()
		.with(layer.with_filter(filter))
		.try_init()
		.context("install global subscriber")?;

	tracing::info!(file_logging = appender_guard.is_some(), "initialized logging");

	Ok(appender_guard.map(|appender_guard| Guard { appender_guard }))
}
