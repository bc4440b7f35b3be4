//! This module contains the [`Config`] struct - a set of configuration options
//! that will be read from the command line and the environment on startup.
//!
//! See the `.env.example` file in the root of the repository for all the
//! relevant variables and example values.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::services::auth::MAX_SESSION_TTL;

/// Secret used to encrypt per-user Steam API keys when `API_KEY_SECRET` is
/// not set in development builds.
#[cfg(not(feature = "production"))]
const DEV_FALLBACK_SECRET: &str = "dev-fallback-change-me-REPLACE_BEFORE_COMMIT";

/// The API's runtime configuration.
#[derive(Clone, clap::Parser)]
#[command(version, about)]
pub struct Config
{
	/// Address to open a TCP socket on.
	#[arg(long, env = "BACKLOG_API_ADDR", default_value = "127.0.0.1:3000")]
	pub addr: SocketAddr,

	/// The public URL.
	///
	/// Used as the base for problem type URIs in error responses.
	#[arg(long, env = "BACKLOG_API_PUBLIC_URL", default_value = "http://localhost:3000")]
	pub public_url: Url,

	/// Directory holding `users.json` and `backlog.json`.
	#[arg(long, env = "BACKLOG_DATA_DIR", default_value = "./data")]
	pub data_dir: PathBuf,

	/// Directory holding the dashboard's static files.
	#[arg(long, env = "BACKLOG_CLIENT_DIR", default_value = "./client")]
	pub client_dir: PathBuf,

	/// How long a login session stays valid, in seconds.
	#[arg(
		long,
		env = "BACKLOG_SESSION_TTL",
		default_value_t = 3600,
		value_parser = clap::value_parser!(u64).range(1..=MAX_SESSION_TTL.as_secs()),
	)]
	pub session_ttl_secs: u64,

	/// Secret from which the key for encrypting stored Steam API keys is
	/// derived.
	#[arg(long, env = "API_KEY_SECRET")]
	pub api_key_secret: Option<String>,

	/// Server-wide Steam Web API key, used for users who did not store their
	/// own.
	#[arg(long, env = "STEAM_API_KEY")]
	pub steam_api_key: Option<String>,

	/// Base URL of the Steam Web API.
	#[arg(long, env = "STEAM_API_URL", default_value = "https://api.steampowered.com")]
	pub steam_api_url: Url,

	/// Timeout for requests to the Steam Web API, in seconds.
	#[arg(long, env = "STEAM_API_TIMEOUT", default_value_t = 10)]
	pub steam_api_timeout_secs: u64,

	/// Directory for rolling log files.
	///
	/// File logging is disabled if this is not set.
	#[arg(long, env = "BACKLOG_LOG_DIR")]
	pub log_dir: Option<PathBuf>,
}

/// Error that can occur while resolving configuration values at startup.
#[derive(Debug, Error)]
pub enum ConfigError
{
	/// `API_KEY_SECRET` is required in production builds.
	#[error("missing required environment variable `API_KEY_SECRET`")]
	MissingApiKeySecret,

	/// A required configuration option was empty.
	#[error("`{var}` cannot be empty")]
	EmptyValue
	{
		/// The environment variable we read.
		var: &'static str,
	},
}

impl Config
{
	/// Returns how long sessions stay valid.
	pub fn session_ttl(&self) -> Duration
	{
		Duration::from_secs(self.session_ttl_secs)
	}

	/// Returns the timeout for Steam Web API requests.
	pub fn steam_api_timeout(&self) -> Duration
	{
		Duration::from_secs(self.steam_api_timeout_secs)
	}

	/// Returns the secret used for encrypting per-user API keys.
	///
	/// Development builds fall back to a fixed value if none was configured.
	#[tracing::instrument(level = "debug", skip(self), err(Debug))]
	pub fn api_key_secret(&self) -> Result<String, ConfigError>
	{
		match self.api_key_secret.as_deref() {
			Some("") => Err(ConfigError::EmptyValue { var: "API_KEY_SECRET" }),
			Some(secret) => Ok(secret.to_owned()),

			#[cfg(feature = "production")]
			None => Err(ConfigError::MissingApiKeySecret),

			#[cfg(not(feature = "production"))]
			None => {
				tracing::warn!("`API_KEY_SECRET` not set; using development fallback secret");
				Ok(DEV_FALLBACK_SECRET.to_owned())
			}
		}
	}

	/// Returns the server-wide Steam API key, if a non-blank one is configured.
	pub fn steam_api_key(&self) -> Option<&str>
	{
		self.steam_api_key
			.as_deref()
			.map(str::trim)
			.filter(|key| !key.is_empty())
	}
}

impl fmt::Debug for Config
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("Config")
			.field("addr", &self.addr)
			.field("public_url", &format_args!("{:?}", self.public_url.as_str()))
			.field("data_dir", &self.data_dir)
			.field("client_dir", &self.client_dir)
			.field("session_ttl_secs", &self.session_ttl_secs)
			.field("api_key_secret", &"*****")
			.field("steam_api_key", &"*****")
			.field("steam_api_url", &format_args!("{:?}", self.steam_api_url.as_str()))
			.field("steam_api_timeout_secs", &self.steam_api_timeout_secs)
			.field("log_dir", &self.log_dir)
			.finish()
	}
}
