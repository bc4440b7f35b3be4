//! The [`ChartService`] aggregates a user's library for the dashboard charts.

use std::fmt;

use axum::extract::FromRef;

use crate::services::auth::SessionStore;
use crate::services::backlog::BacklogStatus;
use crate::services::library::{self, LibraryEntry, LibraryService};
use crate::services::users::UserID;

pub(crate) mod http;

pub(crate) mod models;
pub use models::{ChartData, Dataset, PLAYTIME_DATASET_LABEL};

/// A service for computing chart data.
#[derive(Clone, FromRef)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct ChartService
{
	library_svc: LibraryService,
	sessions: SessionStore,
}

impl fmt::Debug for ChartService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("ChartService").finish_non_exhaustive()
	}
}

impl ChartService
{
	/// Create a new [`ChartService`].
	#[tracing::instrument(skip(sessions))]
	pub fn new(library_svc: LibraryService, sessions: SessionStore) -> Self
	{
		Self { library_svc, sessions }
	}

	/// Syncs the user's library and sums up its playtime per status.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn playtime_by_status(&self, user_id: UserID) -> library::Result<ChartData>
	{
		let entries = self.library_svc.sync(user_id).await?;

		Ok(playtime_by_status(&entries))
	}
}

/// Groups playtime by backlog status.
///
/// Untracked games count as [`BacklogStatus::NotStarted`]. Labels appear in the
/// order their status first shows up in `entries`, and values are whole hours,
/// rounded half up.
pub fn playtime_by_status(entries: &[LibraryEntry]) -> ChartData
{
	let mut totals = Vec::<(BacklogStatus, u64)>::new();

	for entry in entries {
		let status = entry.status.unwrap_or(BacklogStatus::NotStarted);

		match totals.iter_mut().find(|(seen, _)| *seen == status) {
			Some((_, minutes)) => *minutes += entry.playtime_minutes,
			None => totals.push((status, entry.playtime_minutes)),
		}
	}

	let (labels, data): (Vec<_>, Vec<_>) = totals
		.into_iter()
		.map(|(status, minutes)| (status.as_str().to_owned(), (minutes + 30) / 60))
		.unzip();

	ChartData {
		labels,
		datasets: vec![Dataset { label: PLAYTIME_DATASET_LABEL.to_owned(), data }],
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::services::backlog::BacklogID;
	use crate::services::steam::AppID;
	use crate::testing;

	fn entry(playtime_minutes: u64, status: Option<BacklogStatus>) -> LibraryEntry
	{
		LibraryEntry {
			app_id: AppID(620),
			name: String::from("Portal 2"),
			playtime_minutes,
			img_urls: Vec::new(),
			is_backlogged: status.is_some(),
			status,
			user_rating: None,
			target_finish_date: None,
			backlog_id: status.map(|_| BacklogID::new()),
		}
	}

	#[test]
	fn groups_by_first_appearance() -> color_eyre::Result<()>
	{
		let chart = playtime_by_status(&[
			entry(1200, Some(BacklogStatus::Completed)),
			entry(600, Some(BacklogStatus::Playing)),
			entry(180, None),
			entry(300, Some(BacklogStatus::Completed)),
			entry(0, Some(BacklogStatus::NotStarted)),
			entry(1500, Some(BacklogStatus::Playing)),
		]);

		testing::assert_eq!(chart.labels, ["Completed", "Playing", "Not Started"]);
		testing::assert_eq!(chart.datasets, [Dataset {
			label: String::from("Total playtime (hours)"),
			data: vec![25, 35, 3],
		}]);

		Ok(())
	}

	#[test]
	fn hours_round_half_up() -> color_eyre::Result<()>
	{
		let chart = playtime_by_status(&[
			entry(89, Some(BacklogStatus::Planning)),
			entry(90, Some(BacklogStatus::Playing)),
			entry(29, Some(BacklogStatus::Completed)),
		]);

		testing::assert_eq!(chart.datasets.first().map(|set| set.data.clone()), Some(vec![1, 2, 0]));

		Ok(())
	}

	#[test]
	fn empty_library() -> color_eyre::Result<()>
	{
		let chart = playtime_by_status(&[]);
		let json = serde_json::to_value(&chart)?;

		testing::assert!(chart.labels.is_empty());
		testing::assert_eq!(json["datasets"][0]["label"], "Total playtime (hours)");
		testing::assert_eq!(json["datasets"][0]["data"], serde_json::json!([]));

		Ok(())
	}
}
