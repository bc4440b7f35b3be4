//! The errors that can occur when interacting with this service.

use thiserror::Error;

use super::SteamID;
use crate::http::problem_details::{self, IntoProblemDetails, ProblemType};

/// Error code the dashboard looks for to prompt the user for an API key.
pub const MISSING_API_KEY_ERROR_CODE: &str = "E_MISSING_STEAM_API_KEY";

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the steam service.
#[derive(Debug, Error)]
pub enum Error
{
	/// Neither the user nor the server have a Steam Web API key configured.
	#[error("no Steam Web API key configured; please provide your own key")]
	MissingApiKey,

	/// Steam refused to return the user's library.
	///
	/// This happens for private profiles and rejected API keys.
	#[error(
		"could not access the Steam library of {steam_id}; make sure your profile and game \
		 details are public and your API key is valid"
	)]
	ProfileInaccessible
	{
		/// The SteamID we requested the library for.
		steam_id: SteamID,
	},

	/// We failed to make an HTTP request to Steam's Web API, or could not
	/// understand its response.
	#[error("failed to fetch library from Steam")]
	Http(#[from] reqwest::Error),
}

impl IntoProblemDetails for Error
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::MissingApiKey => ProblemType::MissingSteamApiKey,
			Self::ProfileInaccessible { .. } => ProblemType::SteamProfileInaccessible,
			Self::Http(_) => ProblemType::ExternalService,
		}
	}

	fn add_extension_members(&self, ext: &mut problem_details::ExtensionMembers)
	{
		match self {
			Self::MissingApiKey => {
				ext.add("errorCode", MISSING_API_KEY_ERROR_CODE);
			}
			Self::ProfileInaccessible { steam_id } => {
				ext.add("steamId64", steam_id);
			}
			Self::Http(_) => {}
		}
	}
}
