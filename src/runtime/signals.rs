//! This module contains OS signal handlers.
//!
//! These are used for graceful shutdown.

use tokio::signal;

/// The future returned by this function will resolve when the program receives
/// a `SIGINT` signal from the OS.
#[tracing::instrument(target = "backlog_api::runtime")]
pub async fn sigint()
{
	match signal::ctrl_c().await {
		Ok(()) => tracing::warn!(target: "backlog_api::audit_log", "received SIGINT, shutting down"),
		Err(error) => tracing::error!(target: "backlog_api::audit_log", %error, "failed to receive SIGINT"),
	}
}

/// The future returned by this function will resolve when the program receives
/// a `SIGTERM` signal from the OS.
///
/// On platforms without `SIGTERM` it never resolves.
#[tracing::instrument(target = "backlog_api::runtime")]
pub async fn sigterm()
{
	#[cfg(unix)]
	{
		use tokio::signal::unix::{signal, SignalKind};

		match signal(SignalKind::terminate()) {
			Ok(mut sigterm) => {
				sigterm.recv().await;
				tracing::warn!(target: "backlog_api::audit_log", "received SIGTERM, shutting down");
				return;
			}
			Err(error) => {
				tracing::error!(target: "backlog_api::audit_log", %error, "failed to listen for SIGTERM");
			}
		}
	}

	std::future::pending::<()>().await
}

/// Resolves on whichever of `SIGINT` and `SIGTERM` arrives first.
pub async fn shutdown()
{
	tokio::select! {
		() = sigint() => {}
		() = sigterm() => {}
	}
}
