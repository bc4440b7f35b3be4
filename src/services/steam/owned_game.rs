//! Games in a user's Steam library.

use serde::Deserialize;

use super::AppID;

/// CDN URL templates for an app's header image, in order of preference.
const HEADER_IMAGE_URLS: [&str; 3] = [
	"https://cdn.cloudflare.steamstatic.com/steam/apps/{}/header.jpg",
	"https://steamcdn-a.akamaihd.net/steam/apps/{}/header.jpg",
	"https://cdn.akamai.steamstatic.com/steam/apps/{}/header.jpg",
];

/// A game owned by a Steam user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedGame
{
	/// The game's app ID.
	pub app_id: AppID,

	/// The game's name. Empty if Steam did not report one.
	pub name: String,

	/// Total playtime in minutes.
	pub playtime_minutes: u64,

	/// Header image URLs on different CDNs.
	pub img_urls: Vec<String>,
}

impl OwnedGame
{
	/// Creates a new [`OwnedGame`], filling in the image URLs.
	pub fn new(app_id: AppID, name: impl Into<String>, playtime_minutes: u64) -> Self
	{
		Self { app_id, name: name.into(), playtime_minutes, img_urls: header_image_urls(app_id) }
	}
}

/// Builds the header image URLs for `app_id`.
fn header_image_urls(app_id: AppID) -> Vec<String>
{
	let app_id = app_id.to_string();

	HEADER_IMAGE_URLS
		.iter()
		.map(|template| template.replace("{}", &app_id))
		.collect()
}

/// The shape of a `GetOwnedGames` response.
#[derive(Debug, Deserialize)]
pub(super) struct OwnedGamesResponse
{
	/// Steam wraps everything in a `response` object, which is empty for
	/// private profiles.
	#[serde(default)]
	response: OwnedGamesPayload,
}

/// The payload of a `GetOwnedGames` response.
#[derive(Debug, Default, Deserialize)]
struct OwnedGamesPayload
{
	#[allow(clippy::missing_docs_in_private_items)]
	#[serde(default)]
	games: Vec<RawOwnedGame>,
}

/// A single game as reported by Steam.
#[derive(Debug, Deserialize)]
#[allow(clippy::missing_docs_in_private_items)]
struct RawOwnedGame
{
	appid: AppID,
	name: Option<String>,
	title: Option<String>,
	playtime_forever: Option<u64>,
	playtime: Option<u64>,
}

impl OwnedGamesResponse
{
	/// Converts the raw response into [`OwnedGame`]s, keeping Steam's order.
	pub(super) fn into_games(self) -> Vec<OwnedGame>
	{
		self.response
			.games
			.into_iter()
			.map(|game| {
				let name = game
					.name
					.filter(|name| !name.is_empty())
					.or(game.title)
					.unwrap_or_default();

				let playtime = game.playtime_forever.or(game.playtime).unwrap_or(0);

				OwnedGame::new(game.appid, name, playtime)
			})
			.collect()
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	#[test]
	fn falls_back_to_title_and_playtime() -> color_eyre::Result<()>
	{
		let response = serde_json::from_str::<OwnedGamesResponse>(
			r#"{
				"response": {
					"game_count": 3,
					"games": [
						{ "appid": 620, "name": "Portal 2", "playtime_forever": 754 },
						{ "appid": 400, "title": "Portal", "playtime": 30 },
						{ "appid": 70 }
					]
				}
			}"#,
		)?;

		let games = response.into_games();

		testing::assert_eq!(
			games,
			vec![
				OwnedGame::new(AppID(620), "Portal 2", 754),
				OwnedGame::new(AppID(400), "Portal", 30),
				OwnedGame::new(AppID(70), "", 0),
			]
		);
		testing::assert_eq!(
			games.first().and_then(|game| game.img_urls.first()).map(String::as_str),
			Some("https://cdn.cloudflare.steamstatic.com/steam/apps/620/header.jpg")
		);

		Ok(())
	}

	#[test]
	fn private_profile_has_no_games() -> color_eyre::Result<()>
	{
		let response = serde_json::from_str::<OwnedGamesResponse>(r#"{ "response": {} }"#)?;

		testing::assert!(response.into_games().is_empty());

		Ok(())
	}
}
