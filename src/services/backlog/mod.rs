//! The [`BacklogService`] owns `backlog.json`.
//!
//! Every item belongs to exactly one user, and all operations are scoped to
//! the user making the request: other users' items are indistinguishable from
//! items that do not exist.

use std::fmt;

use axum::extract::FromRef;

use crate::services::auth::SessionStore;
use crate::services::users::UserID;
use crate::store::JsonFile;

pub(crate) mod http;

mod error;
pub use error::{Error, Result};

pub(crate) mod models;
pub use models::{
	BacklogID,
	BacklogItem,
	BacklogItemUpdate,
	BacklogStatus,
	NewBacklogItem,
	TargetDate,
	UserRating,
};

/// A service for managing backlog items.
#[derive(Clone, FromRef)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct BacklogService
{
	items: JsonFile<BacklogItem>,
	sessions: SessionStore,
}

impl fmt::Debug for BacklogService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("BacklogService")
			.field("items", &self.items.path())
			.finish_non_exhaustive()
	}
}

impl BacklogService
{
	/// Create a new [`BacklogService`].
	#[tracing::instrument(skip(sessions))]
	pub fn new(items: JsonFile<BacklogItem>, sessions: SessionStore) -> Self
	{
		Self { items, sessions }
	}

	/// Returns all of a user's backlog items.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn list(&self, user_id: UserID) -> Result<Vec<BacklogItem>>
	{
		let items = self
			.items
			.read_all()
			.await?
			.into_iter()
			.filter(|item| item.user_id == user_id)
			.collect();

		Ok(items)
	}

	/// Starts tracking a game.
	///
	/// A user can track every game at most once.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn create(&self, user_id: UserID, new_item: NewBacklogItem) -> Result<BacklogItem>
	{
		let app_id = new_item.app_id.ok_or(Error::MissingField { field: "appId" })?;
		let status = new_item.status.ok_or(Error::MissingField { field: "status" })?;

		let item = self
			.items
			.update(|items| {
				if items
					.iter()
					.any(|item| item.user_id == user_id && item.app_id == app_id)
				{
					return Err(Error::AlreadyTracked { app_id });
				}

				let item = BacklogItem {
					id: BacklogID::new(),
					user_id,
					app_id,
					status,
					user_rating: new_item.user_rating,
					target_finish_date: new_item.target_finish_date,
				};

				items.push(item.clone());

				Ok(item)
			})
			.await?;

		tracing::debug!(item.id = %item.id, %app_id, "created backlog item");

		Ok(item)
	}

	/// Changes some fields of a backlog item.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn update(
		&self,
		user_id: UserID,
		backlog_id: BacklogID,
		update: BacklogItemUpdate,
	) -> Result<BacklogItem>
	{
		if update.is_empty() {
			return Err(Error::NoChanges);
		}

		self.items
			.update(|items| {
				let item = items
					.iter_mut()
					.find(|item| item.id == backlog_id && item.user_id == user_id)
					.ok_or(Error::ItemDoesNotExist { backlog_id })?;

				update.apply(item);

				Ok(item.clone())
			})
			.await
	}

	/// Stops tracking a game.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn delete(&self, user_id: UserID, backlog_id: BacklogID) -> Result<()>
	{
		self.items
			.update(|items| {
				let idx = items
					.iter()
					.position(|item| item.id == backlog_id && item.user_id == user_id)
					.ok_or(Error::ItemDoesNotExist { backlog_id })?;

				items.remove(idx);

				Ok(())
			})
			.await
	}
}

#[cfg(test)]
mod tests
{
	use std::time::Duration;

	use time::macros::date;

	use super::*;
	use crate::services::steam::AppID;
	use crate::testing;

	fn backlog_svc(dir: &tempfile::TempDir) -> BacklogService
	{
		BacklogService::new(
			JsonFile::new(dir.path().join("backlog.json")),
			SessionStore::new(Duration::from_secs(60)),
		)
	}

	fn new_item(app_id: u32, status: BacklogStatus) -> NewBacklogItem
	{
		NewBacklogItem { app_id: Some(AppID(app_id)), status: Some(status), ..Default::default() }
	}

	#[tokio::test]
	async fn items_are_scoped_to_users() -> color_eyre::Result<()>
	{
		let dir = tempfile::tempdir()?;
		let svc = backlog_svc(&dir);
		let (ada, bob) = (UserID::new(), UserID::new());

		let item = svc.create(ada, new_item(620, BacklogStatus::Planning)).await?;
		svc.create(bob, new_item(620, BacklogStatus::Playing)).await?;

		testing::assert_eq!(svc.list(ada).await?, vec![item.clone()]);
		testing::assert_eq!(svc.list(bob).await?.len(), 1);
		testing::assert_matches!(
			svc.delete(bob, item.id).await,
			Err(Error::ItemDoesNotExist { .. })
		);
		testing::assert_matches!(
			svc.update(
				bob,
				item.id,
				BacklogItemUpdate { status: Some(BacklogStatus::Completed), ..Default::default() }
			)
			.await,
			Err(Error::ItemDoesNotExist { .. })
		);

		Ok(())
	}

	#[tokio::test]
	async fn duplicates_are_rejected() -> color_eyre::Result<()>
	{
		let dir = tempfile::tempdir()?;
		let svc = backlog_svc(&dir);
		let user_id = UserID::new();

		svc.create(user_id, new_item(620, BacklogStatus::Planning)).await?;

		testing::assert_matches!(
			svc.create(user_id, new_item(620, BacklogStatus::Completed)).await,
			Err(Error::AlreadyTracked { app_id: AppID(620) })
		);

		Ok(())
	}

	#[tokio::test]
	async fn required_fields() -> color_eyre::Result<()>
	{
		let dir = tempfile::tempdir()?;
		let svc = backlog_svc(&dir);
		let user_id = UserID::new();

		testing::assert_matches!(
			svc.create(user_id, NewBacklogItem::default()).await,
			Err(Error::MissingField { field: "appId" })
		);
		testing::assert_matches!(
			svc.create(user_id, NewBacklogItem { app_id: Some(AppID(620)), ..Default::default() })
				.await,
			Err(Error::MissingField { field: "status" })
		);

		Ok(())
	}

	#[tokio::test]
	async fn partial_updates() -> color_eyre::Result<()>
	{
		let dir = tempfile::tempdir()?;
		let svc = backlog_svc(&dir);
		let user_id = UserID::new();
		let item = svc
			.create(user_id, NewBacklogItem {
				app_id: Some(AppID(620)),
				status: Some(BacklogStatus::Planning),
				user_rating: Some(UserRating::try_from(7)?),
				target_finish_date: Some(TargetDate(date!(2025 - 01 - 31))),
			})
			.await?;

		let updated = svc
			.update(user_id, item.id, BacklogItemUpdate {
				status: Some(BacklogStatus::Playing),
				user_rating: Some(None),
				..Default::default()
			})
			.await?;

		testing::assert_eq!(updated.status, BacklogStatus::Playing);
		testing::assert_eq!(updated.user_rating, None);
		testing::assert_eq!(updated.target_finish_date, item.target_finish_date);
		testing::assert_eq!(svc.list(user_id).await?, vec![updated]);
		testing::assert_matches!(
			svc.update(user_id, item.id, BacklogItemUpdate::default()).await,
			Err(Error::NoChanges)
		);

		Ok(())
	}

	#[tokio::test]
	async fn delete_removes_item() -> color_eyre::Result<()>
	{
		let dir = tempfile::tempdir()?;
		let svc = backlog_svc(&dir);
		let user_id = UserID::new();
		let item = svc.create(user_id, new_item(620, BacklogStatus::Planning)).await?;

		svc.delete(user_id, item.id).await?;

		testing::assert!(svc.list(user_id).await?.is_empty());
		testing::assert_matches!(
			svc.delete(user_id, item.id).await,
			Err(Error::ItemDoesNotExist { .. })
		);

		Ok(())
	}
}
