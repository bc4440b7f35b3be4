//! End-to-end tests that drive the full [`Router`] with in-memory requests.

use std::fs;

use axum::body::Body;
use axum::Router;
use clap::Parser;
use http::{header, Method, Request, StatusCode};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

use crate::Config;

mod backlog;

const STEAM_ID: &str = "76561198282622073";

/// Options every test app starts with, unless it asks for others.
const DEFAULT_OPTIONS: &[&str] = &[
	"--api-key-secret=integration test secret",
	"--steam-api-timeout-secs=5",
];

/// A running application backed by a temporary data directory.
struct Context
{
	router: Router,
	data_dir: tempfile::TempDir,
	client_dir: tempfile::TempDir,
	steam_api_url: String,
	steam_api_key: String,
}

/// The parts of a response the tests look at.
#[derive(Debug)]
struct TestResponse
{
	status: StatusCode,
	set_cookie: Option<String>,
	body: JsonValue,
}

impl Context
{
	/// Builds the app, talking to the Steam Web API at `steam_api_url`.
	fn new(steam_api_url: &str, steam_api_key: &str) -> color_eyre::Result<Self>
	{
		Self::with_options(steam_api_url, steam_api_key, DEFAULT_OPTIONS)
	}

	/// Builds the app without a reachable Steam Web API.
	fn offline() -> color_eyre::Result<Self>
	{
		Self::new("http://127.0.0.1:1", "")
	}

	/// Builds the app with `options` in place of [`DEFAULT_OPTIONS`].
	fn with_options(
		steam_api_url: &str,
		steam_api_key: &str,
		options: &[&str],
	) -> color_eyre::Result<Self>
	{
		let data_dir = tempfile::tempdir()?;
		let client_dir = tempfile::tempdir()?;

		fs::write(client_dir.path().join("index.html"), "<h1>backlog</h1>")?;

		let router = build_router(&data_dir, &client_dir, steam_api_url, steam_api_key, options)?;

		Ok(Self {
			router,
			data_dir,
			client_dir,
			steam_api_url: steam_api_url.to_owned(),
			steam_api_key: steam_api_key.to_owned(),
		})
	}

	/// Restarts the app with `options`, keeping its data directory.
	///
	/// Sessions live in memory, so every session cookie is invalid afterwards.
	fn restart(&mut self, options: &[&str]) -> color_eyre::Result<()>
	{
		self.router = build_router(
			&self.data_dir,
			&self.client_dir,
			&self.steam_api_url,
			&self.steam_api_key,
			options,
		)?;

		Ok(())
	}

	async fn send(&self, req: Request<Body>) -> color_eyre::Result<TestResponse>
	{
		let res = self.router.clone().oneshot(req).await?;
		let status = res.status();
		let set_cookie = res
			.headers()
			.get(header::SET_COOKIE)
			.map(|value| value.to_str())
			.transpose()?
			.map(ToOwned::to_owned);

		let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
		let body = if bytes.is_empty() {
			JsonValue::Null
		} else {
			serde_json::from_slice(&bytes).unwrap_or_else(|_| {
				JsonValue::String(String::from_utf8_lossy(&bytes).into_owned())
			})
		};

		Ok(TestResponse { status, set_cookie, body })
	}

	/// Sends a request, optionally with a JSON body and a session cookie.
	async fn request(
		&self,
		method: Method,
		uri: &str,
		cookie: Option<&str>,
		body: Option<JsonValue>,
	) -> color_eyre::Result<TestResponse>
	{
		let mut req = Request::builder().method(method).uri(uri);

		if let Some(cookie) = cookie {
			req = req.header(header::COOKIE, cookie);
		}

		let req = match body {
			None => req.body(Body::empty())?,
			Some(body) => req
				.header(header::CONTENT_TYPE, "application/json")
				.body(Body::from(body.to_string()))?,
		};

		self.send(req).await
	}

	/// Registers a new user and returns their ID and session cookie.
	async fn register(&self, username: &str) -> color_eyre::Result<(String, String)>
	{
		let res = self
			.request(
				Method::POST,
				"/api/auth/register",
				None,
				Some(serde_json::json!({
					"username": username,
					"password": "hunter22",
					"steamId64": STEAM_ID,
				})),
			)
			.await?;

		color_eyre::eyre::ensure!(res.status == StatusCode::CREATED, "{res:?}");

		let user_id = res.body["userId"]
			.as_str()
			.ok_or_else(|| color_eyre::eyre::eyre!("missing userId"))?
			.to_owned();

		Ok((user_id, session_cookie(&res)?))
	}

	/// Logs in an existing user and returns their session cookie.
	async fn login(&self, username: &str) -> color_eyre::Result<String>
	{
		let res = self
			.request(
				Method::POST,
				"/api/auth/login",
				None,
				Some(serde_json::json!({ "username": username, "password": "hunter22" })),
			)
			.await?;

		color_eyre::eyre::ensure!(res.status == StatusCode::OK, "{res:?}");

		session_cookie(&res)
	}
}

fn build_router(
	data_dir: &tempfile::TempDir,
	client_dir: &tempfile::TempDir,
	steam_api_url: &str,
	steam_api_key: &str,
	options: &[&str],
) -> color_eyre::Result<Router>
{
	let args = [
		String::from("backlog-api"),
		format!("--data-dir={}", data_dir.path().display()),
		format!("--client-dir={}", client_dir.path().display()),
		format!("--steam-api-key={steam_api_key}"),
		format!("--steam-api-url={steam_api_url}"),
	]
	.into_iter()
	.chain(options.iter().map(|&option| option.to_owned()));

	let config = Config::try_parse_from(args)?;

	crate::router(&config).map_err(|error| color_eyre::eyre::eyre!("{error:#}"))
}

/// Turns a response's `Set-Cookie` header into a `Cookie` header value.
fn session_cookie(res: &TestResponse) -> color_eyre::Result<String>
{
	res.set_cookie
		.as_deref()
		.and_then(|cookie| cookie.split(';').next())
		.map(ToOwned::to_owned)
		.ok_or_else(|| color_eyre::eyre::eyre!("response did not set a cookie"))
}
