//! In-memory session storage.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::SessionID;
use crate::services::users::UserID;

/// The longest a session can stay valid.
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// A single stored session.
#[derive(Debug, Clone, Copy)]
struct Entry
{
	/// The user this session belongs to.
	user_id: UserID,

	/// When this session stops being valid.
	expires_on: Instant,
}

/// Maps session IDs to users.
///
/// Sessions live for a fixed duration and are lost when the process exits.
/// Expired sessions are removed when they are looked up, and whenever a new
/// session is created.
#[derive(Clone)]
pub struct SessionStore
{
	#[allow(clippy::missing_docs_in_private_items)]
	sessions: Arc<Mutex<HashMap<SessionID, Entry>>>,

	/// How long new sessions stay valid.
	ttl: Duration,
}

impl fmt::Debug for SessionStore
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("SessionStore")
			.field("ttl", &self.ttl)
			.finish_non_exhaustive()
	}
}

impl SessionStore
{
	/// Creates an empty store whose sessions live for `ttl`.
	///
	/// `ttl` is capped at [`MAX_SESSION_TTL`].
	pub fn new(ttl: Duration) -> Self
	{
		Self { sessions: Default::default(), ttl: ttl.min(MAX_SESSION_TTL) }
	}

	/// Returns how long new sessions stay valid.
	pub fn ttl(&self) -> Duration
	{
		self.ttl
	}

	/// Starts a new session for `user_id`.
	#[tracing::instrument(level = "debug", skip(self))]
	pub fn create(&self, user_id: UserID) -> SessionID
	{
		let now = Instant::now();
		let session_id = SessionID::new();
		let mut sessions = self.lock();

		sessions.retain(|_, entry| entry.expires_on > now);
		sessions.insert(session_id, Entry { user_id, expires_on: now + self.ttl });

		tracing::debug!(%session_id, active = sessions.len(), "created session");

		session_id
	}

	/// Returns the user a session belongs to, if it exists and has not
	/// expired yet.
	#[tracing::instrument(level = "debug", skip(self))]
	pub fn lookup(&self, session_id: SessionID) -> Option<UserID>
	{
		let mut sessions = self.lock();
		let entry = *sessions.get(&session_id)?;

		if entry.expires_on <= Instant::now() {
			tracing::debug!("session expired");
			sessions.remove(&session_id);
			return None;
		}

		Some(entry.user_id)
	}

	/// Ends a session. Returns whether it existed.
	#[tracing::instrument(level = "debug", skip(self))]
	pub fn destroy(&self, session_id: SessionID) -> bool
	{
		self.lock().remove(&session_id).is_some()
	}

	/// Locks the session map.
	///
	/// A panic while holding the lock cannot leave the map in an inconsistent
	/// state, so poisoning is ignored.
	fn lock(&self) -> MutexGuard<'_, HashMap<SessionID, Entry>>
	{
		self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	#[test]
	fn lookup_finds_live_sessions() -> color_eyre::Result<()>
	{
		let store = SessionStore::new(Duration::from_secs(60));
		let user_id = UserID::new();
		let session_id = store.create(user_id);

		testing::assert_eq!(store.lookup(session_id), Some(user_id));
		testing::assert_eq!(store.lookup(SessionID::new()), None);

		Ok(())
	}

	#[test]
	fn expired_sessions_are_removed() -> color_eyre::Result<()>
	{
		let store = SessionStore::new(Duration::ZERO);
		let session_id = store.create(UserID::new());

		testing::assert_eq!(store.lookup(session_id), None);
		testing::assert!(!store.destroy(session_id), "expired session should be gone");

		Ok(())
	}

	#[test]
	fn huge_ttls_are_capped() -> color_eyre::Result<()>
	{
		let store = SessionStore::new(Duration::from_secs(u64::MAX));
		let user_id = UserID::new();
		let session_id = store.create(user_id);

		testing::assert_eq!(store.ttl(), MAX_SESSION_TTL);
		testing::assert_eq!(store.lookup(session_id), Some(user_id));

		Ok(())
	}

	#[test]
	fn destroyed_sessions_are_gone() -> color_eyre::Result<()>
	{
		let store = SessionStore::new(Duration::from_secs(60));
		let session_id = store.create(UserID::new());

		testing::assert!(store.destroy(session_id));
		testing::assert_eq!(store.lookup(session_id), None);

		Ok(())
	}
}
