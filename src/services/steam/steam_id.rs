//! SteamID64s of individual Steam accounts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A 64-bit SteamID of an individual account.
///
/// Serialized as a decimal string, since the value does not fit into a
/// JavaScript number.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SteamID(u64);

/// Error returned when parsing an invalid [`SteamID`].
#[derive(Debug, Clone, Error)]
#[error("`{input}` is not a valid SteamID64")]
pub struct InvalidSteamID
{
	/// The rejected input.
	input: String,
}

impl SteamID
{
	/// The smallest valid SteamID64.
	pub const MIN: u64 = 76561197960265729_u64;

	/// The largest valid SteamID64.
	pub const MAX: u64 = 76561202255233023_u64;

	/// Creates a new [`SteamID`] if `value` is in the valid range.
	pub const fn new(value: u64) -> Option<Self>
	{
		if value >= Self::MIN && value <= Self::MAX {
			Some(Self(value))
		} else {
			None
		}
	}

	/// Returns the raw 64-bit value.
	pub const fn as_u64(&self) -> u64
	{
		self.0
	}
}

impl TryFrom<u64> for SteamID
{
	type Error = InvalidSteamID;

	fn try_from(value: u64) -> Result<Self, Self::Error>
	{
		Self::new(value).ok_or_else(|| InvalidSteamID { input: value.to_string() })
	}
}

impl FromStr for SteamID
{
	type Err = InvalidSteamID;

	fn from_str(input: &str) -> Result<Self, Self::Err>
	{
		input
			.trim()
			.parse::<u64>()
			.ok()
			.and_then(Self::new)
			.ok_or_else(|| InvalidSteamID { input: input.to_owned() })
	}
}

impl fmt::Display for SteamID
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt::Display::fmt(&self.0, f)
	}
}

impl fmt::Debug for SteamID
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_tuple("SteamID").field(&self.0).finish()
	}
}

impl Serialize for SteamID
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for SteamID
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
			U64(u64),
			Str(String),
		}

		match Helper::deserialize(deserializer)? {
			Helper::U64(value) => Self::try_from(value),
			Helper::Str(value) => value.parse::<Self>(),
		}
		.map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	#[test]
	fn parses_strings_and_numbers() -> color_eyre::Result<()>
	{
		let from_str = serde_json::from_str::<SteamID>(r#""76561198282622073""#)?;
		let from_int = serde_json::from_str::<SteamID>("76561198282622073")?;

		testing::assert_eq!(from_str, from_int);
		testing::assert_eq!(from_str.as_u64(), 76561198282622073_u64);
		testing::assert_eq!(serde_json::to_string(&from_str)?, r#""76561198282622073""#);

		Ok(())
	}

	#[test]
	fn rejects_out_of_range() -> color_eyre::Result<()>
	{
		testing::assert!("76561197960265728".parse::<SteamID>().is_err());
		testing::assert!("76561202255233024".parse::<SteamID>().is_err());
		testing::assert!("STEAM_1:1:161178172".parse::<SteamID>().is_err());
		testing::assert!(" 76561197960265729 ".parse::<SteamID>().is_ok());

		Ok(())
	}
}
