//! The errors that can occur when interacting with this service.

use thiserror::Error;

use super::BacklogID;
use crate::http::problem_details::{self, IntoProblemDetails, ProblemType};
use crate::services::steam::AppID;
use crate::store::StoreError;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the backlog service.
#[derive(Debug, Error)]
pub enum Error
{
	/// A required field was missing.
	#[error("`{field}` is required.")]
	MissingField
	{
		/// Name of the field, as it appears in the request body.
		field: &'static str,
	},

	/// An update did not contain any field that can be changed.
	#[error("No updatable fields provided; expected `status`, `userRating` or `targetFinishDate`.")]
	NoChanges,

	/// The user already tracks this game.
	#[error("This game is already in your backlog.")]
	AlreadyTracked
	{
		/// The game the user tried to add.
		app_id: AppID,
	},

	/// The requested item does not exist, or belongs to another user.
	#[error("Backlog item not found.")]
	ItemDoesNotExist
	{
		/// The requested item.
		backlog_id: BacklogID,
	},

	/// The requested item ID is not a valid backlog ID, so no item can have
	/// it.
	#[error("Backlog item not found.")]
	UnknownItemID
	{
		/// The ID from the request path.
		raw: String,
	},

	/// Reading or writing `backlog.json` failed.
	#[error(transparent)]
	Store(#[from] StoreError),
}

impl IntoProblemDetails for Error
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::MissingField { .. } | Self::NoChanges => ProblemType::InvalidInput,
			Self::AlreadyTracked { .. } => ProblemType::ResourceAlreadyExists,
			Self::ItemDoesNotExist { .. } | Self::UnknownItemID { .. } => {
				ProblemType::ResourceNotFound
			}
			Self::Store(source) => source.problem_type(),
		}
	}

	fn add_extension_members(&self, ext: &mut problem_details::ExtensionMembers)
	{
		match self {
			Self::MissingField { field } => ext.add("field", field),
			Self::AlreadyTracked { app_id } => ext.add("appId", app_id),
			Self::ItemDoesNotExist { backlog_id } => ext.add("id", backlog_id),
			Self::UnknownItemID { raw } => ext.add("id", raw),
			Self::NoChanges | Self::Store(_) => {}
		}
	}
}
