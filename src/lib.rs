#![doc = include_str!("../README.md")]
// TODO: remove once https://github.com/tokio-rs/tracing/issues/2912 lands
#![allow(clippy::blocks_in_conditions)]

use std::future::Future;
use std::net::SocketAddr;

use anyhow::Context;
use axum::extract::connect_info::IntoMakeServiceWithConnectInfo;
use axum::extract::ConnectInfo;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

pub mod runtime;
pub use runtime::Config;

pub mod http;
pub mod middleware;
pub mod store;
pub mod crypto;
pub mod services;

#[cfg(test)]
mod testing;

#[cfg(test)]
mod tests;

use crate::crypto::SecretCipher;
use crate::services::auth::SessionStore;
use crate::services::{
	AuthService,
	BacklogService,
	ChartService,
	HealthService,
	LibraryService,
	SteamService,
	UserService,
};
use crate::store::JsonFile;

/// Name of the file holding all user accounts.
pub const USERS_FILE: &str = "users.json";

/// Name of the file holding all backlog items.
pub const BACKLOG_FILE: &str = "backlog.json";

#[allow(clippy::missing_docs_in_private_items)]
type Server = axum::serve::Serve<
	IntoMakeServiceWithConnectInfo<Router, SocketAddr>,
	axum::middleware::AddExtension<Router, ConnectInfo<SocketAddr>>,
>;

/// Run the API.
///
/// This function will not exit until a SIGINT or SIGTERM signal is received.
/// If you want to supply a custom signal for graceful shutdown, use
/// [`run_until()`] instead.
pub async fn run(config: Config) -> anyhow::Result<()>
{
	server(config)
		.await
		.context("build http server")?
		.with_graceful_shutdown(runtime::signals::shutdown())
		.await
		.context("run http server")
}

/// Run the API until a given future completes.
///
/// This function is the same as [`run()`], except that it also waits for the
/// provided `until` future, and shuts down the server when that future
/// resolves.
pub async fn run_until<Until>(config: Config, until: Until) -> anyhow::Result<()>
where
	Until: Future<Output = ()> + Send + 'static,
{
	server(config)
		.await
		.context("build http server")?
		.with_graceful_shutdown(async move {
			tokio::select! {
				() = until => {}
				() = runtime::signals::shutdown() => {}
			}
		})
		.await
		.context("run http server")
}

/// Runs the necessary setup for the API and returns a future that will run the
/// server when polled.
///
/// See [`run()`] and [`run_until()`].
async fn server(config: Config) -> anyhow::Result<Server>
{
	tracing::debug!(?config, "establishing TCP connection");

	let tcp_listener = TcpListener::bind(config.addr)
		.await
		.context("bind tcp socket")?;

	let addr = tcp_listener.local_addr().context("get tcp addr")?;
	tracing::info!(%addr, prod = cfg!(feature = "production"), "listening for requests");

	let service = router(&config)?.into_make_service_with_connect_info::<SocketAddr>();

	Ok(axum::serve(tcp_listener, service))
}

/// Builds all services and wires them up into the final [`Router`].
///
/// Everything under `/api` is handled by the services; every other path is
/// served from the client directory.
pub fn router(config: &Config) -> anyhow::Result<Router>
{
	http::problem_details::problem_type::set_base_url(config.public_url.clone());

	let http_client = reqwest::Client::builder()
		.timeout(config.steam_api_timeout())
		.build()
		.context("build http client")?;

	let cipher = SecretCipher::new(&config.api_key_secret()?);
	let sessions = SessionStore::new(config.session_ttl());

	tracing::info!(data_dir = ?config.data_dir, client_dir = ?config.client_dir, "initializing services");

	let steam_svc = SteamService::new(
		config.steam_api_url.clone(),
		config.steam_api_key().map(ToOwned::to_owned),
		http_client,
	);

	let user_svc = UserService::new(
		JsonFile::new(config.data_dir.join(USERS_FILE)),
		cipher,
		sessions.clone(),
	);

	let auth_svc = AuthService::new(user_svc.clone(), sessions.clone());
	let backlog_svc =
		BacklogService::new(JsonFile::new(config.data_dir.join(BACKLOG_FILE)), sessions.clone());

	let library_svc = LibraryService::new(
		user_svc.clone(),
		steam_svc,
		backlog_svc.clone(),
		sessions.clone(),
	);

	let chart_svc = ChartService::new(library_svc.clone(), sessions);

	let api = Router::new()
		.nest("/health", Router::from(HealthService::new()))
		.nest("/auth", Router::from(auth_svc))
		.nest("/user", Router::from(user_svc))
		.nest("/backlog", Router::from(backlog_svc))
		.nest("/library", Router::from(library_svc))
		.nest("/charts", Router::from(chart_svc))
		.fallback(http::api_not_found);

	let router = Router::new()
		.nest("/api", api)
		.fallback_service(ServeDir::new(&config.client_dir))
		.layer(middleware::cors::layer())
		.layer(middleware::logging::layer!())
		.layer(middleware::panic_handler::layer());

	Ok(router)
}
