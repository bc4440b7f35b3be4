//! Request / Response types for this service.

use std::fmt;
use std::str::FromStr;

use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use time::Date;
use uuid::Uuid;

use crate::http::extract::Json;
use crate::services::steam::AppID;
use crate::services::users::UserID;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// The ID of a backlog item.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BacklogID(Uuid);

impl BacklogID
{
	/// Generates a new random ID.
	pub fn new() -> Self
	{
		Self(Uuid::new_v4())
	}
}

impl fmt::Display for BacklogID
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt::Display::fmt(self.0.as_hyphenated(), f)
	}
}

impl fmt::Debug for BacklogID
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_tuple("BacklogID")
			.field(self.0.as_hyphenated())
			.finish()
	}
}

impl FromStr for BacklogID
{
	type Err = uuid::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err>
	{
		s.parse::<Uuid>().map(Self)
	}
}

/// Where a game stands in a user's backlog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BacklogStatus
{
	/// The user intends to play the game.
	Planning,

	/// The user is currently playing the game.
	Playing,

	/// The user finished the game.
	Completed,

	/// The user has not started the game.
	///
	/// This is also how untracked games are reported in charts.
	#[serde(rename = "Not Started", alias = "NotStarted")]
	NotStarted,
}

impl BacklogStatus
{
	/// Returns the label used for this status in responses.
	pub fn as_str(&self) -> &'static str
	{
		match self {
			Self::Planning => "Planning",
			Self::Playing => "Playing",
			Self::Completed => "Completed",
			Self::NotStarted => "Not Started",
		}
	}
}

impl fmt::Display for BacklogStatus
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.write_str(self.as_str())
	}
}

/// A rating from 1 to 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct UserRating(u8);

/// Error returned for ratings outside of 1..=10.
#[derive(Debug, Clone, Copy, Error)]
#[error("rating must be between 1 and 10, got {0}")]
pub struct InvalidRating(u8);

impl UserRating
{
	/// The lowest rating.
	pub const MIN: u8 = 1;

	/// The highest rating.
	pub const MAX: u8 = 10;

	/// Returns the rating as a number.
	pub fn get(&self) -> u8
	{
		self.0
	}
}

impl TryFrom<u8> for UserRating
{
	type Error = InvalidRating;

	fn try_from(value: u8) -> Result<Self, Self::Error>
	{
		if (Self::MIN..=Self::MAX).contains(&value) {
			Ok(Self(value))
		} else {
			Err(InvalidRating(value))
		}
	}
}

impl From<UserRating> for u8
{
	fn from(rating: UserRating) -> Self
	{
		rating.0
	}
}

/// The date a user wants to finish a game by, as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetDate(#[serde(with = "iso_date")] pub Date);

/// A user's tracking record for a single game, as stored in `backlog.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklogItem
{
	/// The item's ID.
	pub id: BacklogID,

	/// The user tracking the game.
	pub user_id: UserID,

	/// The game being tracked.
	pub app_id: AppID,

	/// Where the game stands.
	pub status: BacklogStatus,

	/// The user's rating, if any.
	#[serde(default)]
	pub user_rating: Option<UserRating>,

	/// When the user wants to finish the game, if ever.
	#[serde(default)]
	pub target_finish_date: Option<TargetDate>,
}

/// Request payload for tracking a new game.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBacklogItem
{
	/// The game to track. Required.
	#[serde(default)]
	pub app_id: Option<AppID>,

	/// Where the game stands. Required.
	#[serde(default)]
	pub status: Option<BacklogStatus>,

	/// Optional rating.
	#[serde(default)]
	pub user_rating: Option<UserRating>,

	/// Optional target date.
	#[serde(default)]
	pub target_finish_date: Option<TargetDate>,
}

/// Request payload for changing a backlog item.
///
/// Absent fields are left unchanged. `userRating` and `targetFinishDate` can
/// be cleared by sending an explicit `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklogItemUpdate
{
	/// New status.
	#[serde(default)]
	pub status: Option<BacklogStatus>,

	/// New rating. `Some(None)` clears it.
	#[serde(default, deserialize_with = "present")]
	pub user_rating: Option<Option<UserRating>>,

	/// New target date. `Some(None)` clears it.
	#[serde(default, deserialize_with = "present")]
	pub target_finish_date: Option<Option<TargetDate>>,
}

impl BacklogItemUpdate
{
	/// Returns whether this update would not touch any field.
	pub fn is_empty(&self) -> bool
	{
		self.status.is_none() && self.user_rating.is_none() && self.target_finish_date.is_none()
	}

	/// Applies this update to `item`.
	pub fn apply(self, item: &mut BacklogItem)
	{
		if let Some(status) = self.status {
			item.status = status;
		}

		if let Some(user_rating) = self.user_rating {
			item.user_rating = user_rating;
		}

		if let Some(target_finish_date) = self.target_finish_date {
			item.target_finish_date = target_finish_date;
		}
	}
}

/// Deserializes a field that is known to be present, so that `null` becomes
/// `Some(None)` rather than `None`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
	T: Deserialize<'de>,
	D: Deserializer<'de>,
{
	Option::<T>::deserialize(deserializer).map(Some)
}

/// Response for `GET /backlog`.
#[derive(Debug)]
pub struct BacklogItems(pub Vec<BacklogItem>);

impl IntoResponse for BacklogItems
{
	fn into_response(self) -> Response
	{
		Json(self.0).into_response()
	}
}

/// Response for `POST /backlog`.
#[derive(Debug)]
pub struct CreatedBacklogItem(pub BacklogItem);

impl IntoResponse for CreatedBacklogItem
{
	fn into_response(self) -> Response
	{
		(http::StatusCode::CREATED, Json(self.0)).into_response()
	}
}

/// Response for `PUT /backlog/{id}`.
#[derive(Debug)]
pub struct UpdatedBacklogItem(pub BacklogItem);

impl IntoResponse for UpdatedBacklogItem
{
	fn into_response(self) -> Response
	{
		Json(self.0).into_response()
	}
}

#[cfg(test)]
mod tests
{
	use time::macros::date;

	use super::*;
	use crate::testing;

	#[test]
	fn status_accepts_both_spellings() -> color_eyre::Result<()>
	{
		let spaced = serde_json::from_str::<BacklogStatus>(r#""Not Started""#)?;
		let compact = serde_json::from_str::<BacklogStatus>(r#""NotStarted""#)?;

		testing::assert_eq!(spaced, BacklogStatus::NotStarted);
		testing::assert_eq!(compact, BacklogStatus::NotStarted);
		testing::assert_eq!(serde_json::to_string(&compact)?, r#""Not Started""#);

		Ok(())
	}

	#[test]
	fn ratings_are_bounded() -> color_eyre::Result<()>
	{
		testing::assert!(serde_json::from_str::<UserRating>("0").is_err());
		testing::assert!(serde_json::from_str::<UserRating>("11").is_err());
		testing::assert_eq!(serde_json::from_str::<UserRating>("10")?.get(), 10);

		Ok(())
	}

	#[test]
	fn dates_use_iso_format() -> color_eyre::Result<()>
	{
		let parsed = serde_json::from_str::<TargetDate>(r#""2024-12-31""#)?;

		testing::assert_eq!(parsed, TargetDate(date!(2024 - 12 - 31)));
		testing::assert_eq!(serde_json::to_string(&parsed)?, r#""2024-12-31""#);
		testing::assert!(serde_json::from_str::<TargetDate>(r#""31.12.2024""#).is_err());

		Ok(())
	}

	#[test]
	fn update_distinguishes_null_from_absent() -> color_eyre::Result<()>
	{
		let absent = serde_json::from_str::<BacklogItemUpdate>(r#"{ "status": "Playing" }"#)?;
		let cleared = serde_json::from_str::<BacklogItemUpdate>(
			r#"{ "userRating": null, "targetFinishDate": null }"#,
		)?;
		let unknown = serde_json::from_str::<BacklogItemUpdate>(r#"{ "appId": "620" }"#)?;

		testing::assert_eq!(absent.user_rating, None);
		testing::assert_eq!(cleared.user_rating, Some(None));
		testing::assert_eq!(cleared.target_finish_date, Some(None));
		testing::assert!(!cleared.is_empty());
		testing::assert!(unknown.is_empty());

		Ok(())
	}
}
