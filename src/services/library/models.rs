//! Request / Response types for this service.

use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::http::extract::Json;
use crate::services::backlog::{BacklogID, BacklogStatus, TargetDate, UserRating};
use crate::services::steam::AppID;

/// A game from a user's Steam library, combined with their backlog record for
/// it (if any).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry
{
	/// The game's app ID.
	pub app_id: AppID,

	/// The game's name.
	pub name: String,

	/// Total playtime in minutes, as reported by Steam.
	pub playtime_minutes: u64,

	/// Header image URLs on different CDNs.
	pub img_urls: Vec<String>,

	/// Whether the user tracks this game.
	pub is_backlogged: bool,

	/// The tracked status.
	pub status: Option<BacklogStatus>,

	/// The user's rating.
	pub user_rating: Option<UserRating>,

	/// The user's target date.
	pub target_finish_date: Option<TargetDate>,

	/// ID of the backlog item, for follow-up updates.
	pub backlog_id: Option<BacklogID>,
}

/// Response for `GET /library/sync`.
#[derive(Debug)]
pub struct Library(pub Vec<LibraryEntry>);

impl IntoResponse for Library
{
	fn into_response(self) -> Response
	{
		Json(self.0).into_response()
	}
}
