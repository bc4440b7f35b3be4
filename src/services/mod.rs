//! API services.
//!
//! These contain the core business logic.
//!
//! If a service directly maps to an HTTP route, it will have an `http` module
//! containing the handlers and an `Into<axum::Router>` implementation.

pub mod steam;
pub use steam::SteamService;

pub mod users;
pub use users::UserService;

pub mod auth;
pub use auth::AuthService;

pub mod backlog;
pub use backlog::BacklogService;

pub mod library;
pub use library::LibraryService;

pub mod charts;
pub use charts::ChartService;

pub mod health;
pub use health::HealthService;
