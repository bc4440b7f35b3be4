//! The [`SteamService`] is responsible for communicating with Steam.
//!
//! It fetches the list of games a user owns, along with their playtime, and
//! decides which Steam Web API key to use for doing so.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use url::Url;

mod error;
pub use error::{Error, Result, MISSING_API_KEY_ERROR_CODE};

mod steam_id;
pub use steam_id::{InvalidSteamID, SteamID};

mod app_id;
pub use app_id::AppID;

mod owned_game;
pub use owned_game::OwnedGame;

/// Path of the `GetOwnedGames` endpoint, relative to the API URL.
const OWNED_GAMES_PATH: &str = "IPlayerService/GetOwnedGames/v0001/";

/// A service for interacting with Steam.
#[derive(Clone)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct SteamService
{
	api_url: Arc<Url>,
	fallback_api_key: Option<Arc<str>>,
	http_client: reqwest::Client,
}

impl fmt::Debug for SteamService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("SteamService")
			.field("api_url", &format_args!("{:?}", self.api_url.as_str()))
			.field("has_fallback_api_key", &self.fallback_api_key.is_some())
			.finish_non_exhaustive()
	}
}

impl SteamService
{
	/// Creates a new [`SteamService`].
	///
	/// `fallback_api_key` is used for users who did not store a key of their
	/// own. Blank keys are ignored.
	#[tracing::instrument(skip(fallback_api_key, http_client))]
	pub fn new(
		api_url: Url,
		fallback_api_key: Option<String>,
		http_client: reqwest::Client,
	) -> Self
	{
		let fallback_api_key = fallback_api_key
			.filter(|key| !key.trim().is_empty())
			.map(|key| Arc::from(key.trim()));

		Self { api_url: Arc::new(api_url), fallback_api_key, http_client }
	}

	/// Picks the API key to use for a request on behalf of a user.
	///
	/// The user's own key wins over the server-wide one.
	#[tracing::instrument(level = "debug", skip_all, err(Debug, level = "debug"))]
	pub fn resolve_api_key(&self, user_key: Option<String>) -> Result<String>
	{
		if let Some(key) = user_key.filter(|key| !key.trim().is_empty()) {
			tracing::debug!("using the user's own API key");
			return Ok(key.trim().to_owned());
		}

		if let Some(key) = self.fallback_api_key.as_deref() {
			tracing::debug!("using the server-wide API key");
			return Ok(key.to_owned());
		}

		Err(Error::MissingApiKey)
	}

	/// Fetches all games owned by `steam_id`, in the order Steam returns them.
	///
	/// Free games the user has played are included.
	#[tracing::instrument(level = "debug", skip(self, api_key), err(Debug, level = "debug"))]
	pub async fn fetch_owned_games(&self, steam_id: SteamID, api_key: &str) -> Result<Vec<OwnedGame>>
	{
		#[derive(Serialize)]
		#[allow(clippy::missing_docs_in_private_items)]
		struct Query<'a>
		{
			key: &'a str,
			steamid: u64,
			format: &'static str,
			include_appinfo: u8,
			include_played_free_games: u8,
		}

		let url = format!("{}/{OWNED_GAMES_PATH}", self.api_url.as_str().trim_end_matches('/'));

		tracing::debug!(%url, "making http request to steam");

		let response = self
			.http_client
			.get(&url)
			.query(&Query {
				key: api_key,
				steamid: steam_id.as_u64(),
				format: "json",
				include_appinfo: 1,
				include_played_free_games: 1,
			})
			.send()
			.await?;

		let status = response.status();

		if matches!(status, http::StatusCode::UNAUTHORIZED | http::StatusCode::FORBIDDEN) {
			tracing::debug!(%status, "steam refused to hand out library");
			return Err(Error::ProfileInaccessible { steam_id });
		}

		if let Err(error) = response.error_for_status_ref() {
			let response_body = response.text().await.ok();

			tracing::error! {
				?error,
				?response_body,
				"failed to fetch owned games from steam",
			};

			return Err(Error::Http(error));
		}

		let games = response
			.json::<owned_game::OwnedGamesResponse>()
			.await?
			.into_games();

		tracing::debug!(count = games.len(), "fetched owned games");

		Ok(games)
	}
}
