//! Flat-file persistence.
//!
//! Every collection (users, backlog items) lives in its own JSON file holding a
//! single array of records. A [`JsonFile`] serializes all read-modify-write
//! cycles on its file, so concurrent requests within this process never
//! overwrite each other's changes. Other processes writing the same file are
//! not accounted for.

use std::fmt;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::Mutex;

mod error;
pub use error::{Result, StoreError};

/// A handle to a JSON file containing a list of `T`.
pub struct JsonFile<T>
{
	/// Location of the file.
	path: Arc<Path>,

	/// Held for the duration of every read and read-modify-write cycle.
	lock: Arc<Mutex<()>>,

	#[allow(clippy::missing_docs_in_private_items)]
	_records: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonFile<T>
{
	fn clone(&self) -> Self
	{
		Self {
			path: Arc::clone(&self.path),
			lock: Arc::clone(&self.lock),
			_records: PhantomData,
		}
	}
}

impl<T> fmt::Debug for JsonFile<T>
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("JsonFile")
			.field("path", &self.path)
			.finish_non_exhaustive()
	}
}

impl<T> JsonFile<T>
where
	T: Serialize + DeserializeOwned,
{
	/// Creates a handle for the file at `path`.
	///
	/// The file does not need to exist yet; it is created on the first write.
	pub fn new(path: impl Into<PathBuf>) -> Self
	{
		let path: PathBuf = path.into();

		Self {
			path: Arc::from(path),
			lock: Arc::new(Mutex::new(())),
			_records: PhantomData,
		}
	}

	/// Returns the location of the file.
	pub fn path(&self) -> &Path
	{
		&self.path
	}

	/// Reads all records.
	///
	/// A missing or blank file counts as an empty list.
	#[tracing::instrument(level = "trace", skip(self), fields(path = ?self.path), err(Debug, level = "debug"))]
	pub async fn read_all(&self) -> Result<Vec<T>>
	{
		let _guard = self.lock.lock().await;

		self.read_unlocked().await
	}

	/// Runs a read-modify-write cycle.
	///
	/// `f` receives all records and may change them freely. The records are
	/// written back only if `f` returns `Ok`. No other cycle on the same file
	/// can interleave with this one.
	#[tracing::instrument(level = "trace", skip_all, fields(path = ?self.path), err(Debug, level = "debug"))]
	pub async fn update<F, R, E>(&self, f: F) -> Result<R, E>
	where
		F: FnOnce(&mut Vec<T>) -> Result<R, E>,
		E: From<StoreError> + fmt::Debug,
	{
		let _guard = self.lock.lock().await;
		let mut records = self.read_unlocked().await?;
		let output = f(&mut records)?;

		self.write_unlocked(&records).await?;

		Ok(output)
	}

	/// Reads and parses the file. The caller must hold `self.lock`.
	async fn read_unlocked(&self) -> Result<Vec<T>>
	{
		let bytes = match fs::read(&*self.path).await {
			Ok(bytes) => bytes,
			Err(error) if error.kind() == io::ErrorKind::NotFound => {
				tracing::trace!("data file does not exist yet");
				return Ok(Vec::new());
			}
			Err(source) => {
				return Err(StoreError::Io { path: self.path.to_path_buf(), source });
			}
		};

		if bytes.iter().all(u8::is_ascii_whitespace) {
			return Ok(Vec::new());
		}

		serde_json::from_slice(&bytes)
			.map_err(|source| StoreError::Malformed { path: self.path.to_path_buf(), source })
	}

	/// Replaces the file's contents with `records`. The caller must hold
	/// `self.lock`.
	///
	/// The new contents are written to a sibling file first and then moved into
	/// place, so readers never observe a partially written file.
	async fn write_unlocked(&self, records: &[T]) -> Result<()>
	{
		let io_error = |source| StoreError::Io { path: self.path.to_path_buf(), source };
		let json = serde_json::to_vec_pretty(records).map_err(StoreError::Encode)?;

		if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
			fs::create_dir_all(parent).await.map_err(io_error)?;
		}

		let mut tmp_path = self.path.as_os_str().to_owned();
		tmp_path.push(".tmp");

		fs::write(&tmp_path, &json).await.map_err(io_error)?;
		fs::rename(&tmp_path, &*self.path).await.map_err(io_error)?;

		tracing::trace!(records = records.len(), "wrote data file");

		Ok(())
	}
}
