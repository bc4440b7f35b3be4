//! The [`LibraryService`] combines a user's Steam library with their backlog.
//!
//! The merged view is what the dashboard lists, and what the charts are
//! computed from.

use std::collections::HashMap;
use std::fmt;

use axum::extract::FromRef;

use crate::services::auth::SessionStore;
use crate::services::backlog::{BacklogItem, BacklogService};
use crate::services::steam::{OwnedGame, SteamService};
use crate::services::users::{UserID, UserService};

pub(crate) mod http;

mod error;
pub use error::{Error, Result};

pub(crate) mod models;
pub use models::LibraryEntry;

/// A service for syncing Steam libraries.
#[derive(Clone, FromRef)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct LibraryService
{
	user_svc: UserService,
	steam_svc: SteamService,
	backlog_svc: BacklogService,
	sessions: SessionStore,
}

impl fmt::Debug for LibraryService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("LibraryService")
			.field("steam_svc", &self.steam_svc)
			.finish_non_exhaustive()
	}
}

impl LibraryService
{
	/// Create a new [`LibraryService`].
	#[tracing::instrument(skip(sessions))]
	pub fn new(
		user_svc: UserService,
		steam_svc: SteamService,
		backlog_svc: BacklogService,
		sessions: SessionStore,
	) -> Self
	{
		Self { user_svc, steam_svc, backlog_svc, sessions }
	}

	/// Fetches the user's Steam library and merges their backlog into it.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn sync(&self, user_id: UserID) -> Result<Vec<LibraryEntry>>
	{
		let user = self
			.user_svc
			.find_by_id(user_id)
			.await?
			.ok_or(Error::UserNotFound { user_id })?;

		let steam_id = user
			.steam_id()
			.map_err(|source| Error::InvalidSteamID { user_id, source })?;

		let user_key = self.user_svc.decrypt_api_key(&user)?;
		let api_key = self.steam_svc.resolve_api_key(user_key)?;
		let items = self.backlog_svc.list(user_id).await?;
		let games = self
			.steam_svc
			.fetch_owned_games(steam_id, &api_key)
			.await?;

		Ok(merge_library(games, items))
	}
}

/// Attaches backlog records to the games they track.
///
/// The result has one entry per game, in the order the games were given.
/// Backlog items for games the user does not own are ignored.
pub fn merge_library(games: Vec<OwnedGame>, items: Vec<BacklogItem>) -> Vec<LibraryEntry>
{
	let mut items = items
		.into_iter()
		.map(|item| (item.app_id, item))
		.collect::<HashMap<_, _>>();

	games
		.into_iter()
		.map(|game| {
			let item = items.remove(&game.app_id);

			LibraryEntry {
				app_id: game.app_id,
				name: game.name,
				playtime_minutes: game.playtime_minutes,
				img_urls: game.img_urls,
				is_backlogged: item.is_some(),
				status: item.as_ref().map(|item| item.status),
				user_rating: item.as_ref().and_then(|item| item.user_rating),
				target_finish_date: item.as_ref().and_then(|item| item.target_finish_date),
				backlog_id: item.as_ref().map(|item| item.id),
			}
		})
		.collect()
}
