use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::filter::BannedWords;
use crate::error::NameSetError;

/// Default number of generation attempts per candidate slot.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Default number of candidates generated before picking one.
pub const DEFAULT_N_CANDIDATES: usize = 2;

/// Default Markov order of a new name-set.
pub const DEFAULT_ORDER: usize = 3;

/// Policy used to pick one name among the valid candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
	/// Smallest length metric.
	Min,
	/// Largest length metric.
	Max,
	/// Closest (relative deviation) to the training data's average length.
	#[default]
	Avg,
}

impl FromStr for Preference {
	type Err = NameSetError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"min" => Ok(Preference::Min),
			"max" => Ok(Preference::Max),
			"avg" => Ok(Preference::Avg),
			_ => Err(NameSetError::InvalidPreference(s.to_owned())),
		}
	}
}

/// Numeric codes 0, 1 and 2 map to `Min`, `Max` and `Avg`.
impl TryFrom<u8> for Preference {
	type Error = NameSetError;

	fn try_from(code: u8) -> Result<Self, Self::Error> {
		match code {
			0 => Ok(Preference::Min),
			1 => Ok(Preference::Max),
			2 => Ok(Preference::Avg),
			_ => Err(NameSetError::InvalidPreference(code.to_string())),
		}
	}
}

impl fmt::Display for Preference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Preference::Min => "min",
			Preference::Max => "max",
			Preference::Avg => "avg",
		})
	}
}

/// Parses a Markov order from text.
///
/// # Errors
/// Returns [`NameSetError::InvalidOrder`] for anything other than a
/// non-negative integer (`"-1"`, `"1.5"`, `"three"`).
pub fn parse_order(input: &str) -> Result<usize, NameSetError> {
	input
		.trim()
		.parse::<usize>()
		.map_err(|_| NameSetError::InvalidOrder(input.to_owned()))
}

/// Converts a signed order, rejecting negative values.
pub fn order_from_i64(order: i64) -> Result<usize, NameSetError> {
	usize::try_from(order).map_err(|_| NameSetError::InvalidOrder(order.to_string()))
}

/// Generation parameters for [`NameSet::make_name`](super::name_set::NameSet::make_name).
///
/// # Defaults
/// - Training names and names in the history are rejected
/// - The winning name is added to the history
/// - `DEFAULT_N_CANDIDATES` candidates, each given `DEFAULT_MAX_ATTEMPTS` attempts
/// - `Preference::Avg`, no banned words
///
/// Missing fields take their default when deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MakeNameOptions {
	/// Reject names that are verbatim training names.
	pub exclude_real_names: bool,

	/// Reject names already in the (possibly shared) history.
	pub exclude_history: bool,

	/// Record the returned name into the history.
	pub add_to_history: bool,

	/// Number of candidate slots to fill before ranking.
	pub n_candidates: usize,

	/// Ranking policy among the valid candidates.
	pub preference: Preference,

	/// Generation attempts per candidate slot. The only bound against a
	/// validator that never accepts anything.
	pub max_attempts: usize,

	/// Substrings that invalidate a candidate, ignoring case.
	pub banned_words: BannedWords,
}

impl Default for MakeNameOptions {
	fn default() -> Self {
		Self {
			exclude_real_names: true,
			exclude_history: true,
			add_to_history: true,
			n_candidates: DEFAULT_N_CANDIDATES,
			preference: Preference::Avg,
			max_attempts: DEFAULT_MAX_ATTEMPTS,
			banned_words: BannedWords::default(),
		}
	}
}

impl MakeNameOptions {
	/// Options that allow training names and history repeats and leave the
	/// history untouched.
	pub fn permissive() -> Self {
		Self {
			exclude_real_names: false,
			exclude_history: false,
			add_to_history: false,
			..Self::default()
		}
	}

	/// Sets the preference from its textual form.
	///
	/// # Errors
	/// Returns [`NameSetError::InvalidPreference`] if `preference` is not
	/// min, max or avg.
	pub fn set_preference(&mut self, preference: &str) -> Result<(), NameSetError> {
		self.preference = preference.parse()?;
		Ok(())
	}
}
