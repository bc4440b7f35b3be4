//! The errors that can occur when interacting with this service.

use thiserror::Error;

use crate::http::problem_details::{self, IntoProblemDetails, ProblemType};
use crate::services::steam::InvalidSteamID;
use crate::services::users::UserID;
use crate::services::{backlog, steam, users};

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the library service.
#[derive(Debug, Error)]
pub enum Error
{
	/// The session belongs to a user that is no longer on record.
	#[error("SteamID64 not found; make sure your account was registered correctly.")]
	UserNotFound
	{
		/// The user from the session.
		user_id: UserID,
	},

	/// The user's stored SteamID64 is unusable.
	#[error("Stored SteamID64 is invalid; please register again with a valid one.")]
	InvalidSteamID
	{
		/// The user whose record is broken.
		user_id: UserID,

		/// Why the stored value was rejected.
		#[source]
		source: InvalidSteamID,
	},

	/// An operation using the user service failed.
	#[error(transparent)]
	Users(#[from] users::Error),

	/// Fetching the library from Steam failed.
	#[error(transparent)]
	Steam(#[from] steam::Error),

	/// Reading the user's backlog failed.
	#[error(transparent)]
	Backlog(#[from] backlog::Error),
}

impl IntoProblemDetails for Error
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::UserNotFound { .. } | Self::InvalidSteamID { .. } => ProblemType::InvalidInput,
			Self::Users(source) => source.problem_type(),
			Self::Steam(source) => source.problem_type(),
			Self::Backlog(source) => source.problem_type(),
		}
	}

	fn add_extension_members(&self, ext: &mut problem_details::ExtensionMembers)
	{
		match self {
			Self::UserNotFound { .. } | Self::InvalidSteamID { .. } => {}
			Self::Users(source) => source.add_extension_members(ext),
			Self::Steam(source) => source.add_extension_members(ext),
			Self::Backlog(source) => source.add_extension_members(ext),
		}
	}
}
