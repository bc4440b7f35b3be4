//! A very basic service that acts as a healthcheck.

use std::fmt;

use axum::extract::FromRef;

pub(crate) mod http;

/// What the healthcheck responds with.
pub const HEALTHY: &str = "Game backlog API is up and running.";

/// A service that simply responds if the API is healthy.
#[derive(Clone, Copy, FromRef)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct HealthService {}

impl fmt::Debug for HealthService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("HealthService").finish_non_exhaustive()
	}
}

impl HealthService
{
	/// Create a new [`HealthService`].
	#[tracing::instrument]
	pub fn new() -> Self
	{
		Self {}
	}

	/// Reports that the API is healthy.
	#[tracing::instrument(level = "debug")]
	pub fn hello(&self) -> &'static str
	{
		HEALTHY
	}
}
