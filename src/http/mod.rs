//! HTTP plumbing shared by all services.
//!
//! This contains error responses in the form of [`ProblemDetails`] and
//! wrappers around [`axum`]'s extractors that produce them.

pub mod problem_details;
pub use problem_details::ProblemDetails;

pub mod extract;

mod not_found;
pub(crate) use not_found::api_not_found;
