//! Steam application IDs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The ID of a Steam application (game).
///
/// Steam reports these as numbers, while our data files and the dashboard
/// store them as strings. Both forms are accepted; a string is produced.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppID(pub u32);

impl fmt::Display for AppID
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt::Display::fmt(&self.0, f)
	}
}

impl fmt::Debug for AppID
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		write!(f, "AppID({})", self.0)
	}
}

impl FromStr for AppID
{
	type Err = std::num::ParseIntError;

	fn from_str(s: &str) -> Result<Self, Self::Err>
	{
		s.trim().parse::<u32>().map(Self)
	}
}

impl Serialize for AppID
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for AppID
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		#[allow(clippy::missing_docs_in_private_items)]
		enum Helper
		{
			U32(u32),
			Str(String),
		}

		match Helper::deserialize(deserializer)? {
			Helper::U32(value) => Ok(Self(value)),
			Helper::Str(value) => value.parse::<Self>().map_err(serde::de::Error::custom),
		}
	}
}
