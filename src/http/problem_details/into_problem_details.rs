//! This module contains the [`IntoProblemDetails`] trait.
//!
//! It defines the contract for how an error type can be turned into an HTTP
//! error response.

use super::{ExtensionMembers, ProblemType};

/// A trait for creating [`ProblemDetails`] from error types.
///
/// [`ProblemDetails`]: super::ProblemDetails
pub trait IntoProblemDetails: std::error::Error
{
	/// Returns the problem type for this error.
	fn problem_type(&self) -> ProblemType;

	/// Adds [extension members] to the HTTP response.
	///
	/// [extension members]: https://www.rfc-editor.org/rfc/rfc9457.html#name-extension-members
	fn add_extension_members(&self, ext: &mut ExtensionMembers)
	{
		_ = ext;
	}
}
