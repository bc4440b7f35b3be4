//! The errors that can occur when interacting with this service.

use thiserror::Error;

use super::UserID;
use crate::crypto::CryptoError;
use crate::http::problem_details::{self, IntoProblemDetails, ProblemType};
use crate::store::StoreError;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the user service.
#[derive(Debug, Error)]
pub enum Error
{
	/// A user with the requested name already exists.
	#[error("User already exists.")]
	UserAlreadyExists
	{
		/// The requested name.
		username: String,
	},

	/// The username or password was wrong.
	///
	/// Unknown users and wrong passwords are deliberately indistinguishable.
	#[error("Invalid credentials.")]
	InvalidCredentials,

	/// The requested user does not exist.
	#[error("User not found.")]
	UserDoesNotExist
	{
		/// The requested user ID.
		user_id: UserID,
	},

	/// The session user tried to change another user's account.
	#[error("You can only change your own account.")]
	NotYourAccount,

	/// A required field was missing or blank.
	#[error("`{field}` is required.")]
	MissingField
	{
		/// Name of the field, as it appears in the request body.
		field: &'static str,
	},

	/// We failed to hash a password.
	#[error("something went wrong")]
	HashPassword(#[source] CryptoError),

	/// We failed to encrypt an API key.
	#[error("something went wrong")]
	EncryptApiKey(#[source] CryptoError),

	/// A stored API key could not be decrypted.
	///
	/// This usually means the server secret changed since the key was stored.
	#[error("failed to decrypt your stored Steam API key; please save it again")]
	DecryptApiKey(#[source] CryptoError),

	/// Reading or writing `users.json` failed.
	#[error(transparent)]
	Store(#[from] StoreError),
}

impl IntoProblemDetails for Error
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::UserAlreadyExists { .. } => ProblemType::ResourceAlreadyExists,
			Self::InvalidCredentials => ProblemType::Unauthorized,
			Self::UserDoesNotExist { .. } => ProblemType::ResourceNotFound,
			Self::NotYourAccount => ProblemType::Forbidden,
			Self::MissingField { .. } => ProblemType::InvalidInput,
			Self::HashPassword(_) | Self::EncryptApiKey(_) | Self::DecryptApiKey(_) => {
				ProblemType::Internal
			}
			Self::Store(source) => source.problem_type(),
		}
	}

	fn add_extension_members(&self, ext: &mut problem_details::ExtensionMembers)
	{
		match self {
			Self::UserAlreadyExists { username } => ext.add("username", username),
			Self::UserDoesNotExist { user_id } => ext.add("userId", user_id),
			Self::MissingField { field } => ext.add("field", field),
			_ => {}
		}
	}
}
