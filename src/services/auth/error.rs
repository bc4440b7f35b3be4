//! The errors that can occur when interacting with this service.

use thiserror::Error;

use crate::http::problem_details::{self, IntoProblemDetails, ProblemType};
use crate::services::steam::InvalidSteamID;
use crate::services::users;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the auth service.
#[derive(Debug, Error)]
pub enum Error
{
	/// A required field was missing or blank.
	#[error("`{field}` is required.")]
	MissingField
	{
		/// Name of the field, as it appears in the request body.
		field: &'static str,
	},

	/// The chosen password is too short.
	#[error("Password must be at least {min} characters long.")]
	PasswordTooShort
	{
		/// The minimum number of characters.
		min: usize,
	},

	/// The submitted SteamID could not be parsed.
	#[error(transparent)]
	InvalidSteamID(#[from] InvalidSteamID),

	/// An operation using the user service failed.
	#[error(transparent)]
	Users(#[from] users::Error),
}

impl IntoProblemDetails for Error
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::MissingField { .. } | Self::PasswordTooShort { .. } | Self::InvalidSteamID(_) => {
				ProblemType::InvalidInput
			}
			Self::Users(source) => source.problem_type(),
		}
	}

	fn add_extension_members(&self, ext: &mut problem_details::ExtensionMembers)
	{
		match self {
			Self::MissingField { field } => ext.add("field", field),
			Self::PasswordTooShort { min } => ext.add("minLength", min),
			Self::InvalidSteamID(_) => ext.add("field", "steamId64"),
			Self::Users(source) => source.add_extension_members(ext),
		}
	}
}
