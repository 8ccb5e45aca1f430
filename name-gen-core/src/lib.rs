//! Markov chain name generation library.
//!
//! This crate generates plausible new names from a list of example names,
//! including:
//! - Character-level Markov chains of any fixed order
//! - Candidate ranking by a pluggable length metric
//! - Histories shared between generators to avoid repeats across them
//! - Multiset set algebra (`+`, `-`, `|`, `&`) between name-sets
//!
//! ```
//! use name_gen_core::{LengthMetric, MakeNameOptions, NameSet};
//!
//! let elves = NameSet::new(["Elrond", "Elwing", "Earendil"], 2, LengthMetric::Chars);
//! if let Some(name) = elves.make_name(&MakeNameOptions::default()) {
//!     assert!(!elves.contains(&name));
//!     assert!(elves.history().contains(&name));
//! }
//! ```

/// Corpus clean-up helpers.
pub mod clean;

/// Errors and compatibility warnings.
pub mod error;

/// Markov models, name-sets and generation.
pub mod model;

/// Corpus loading.
///
/// Only `read_names` is exposed
mod io;

pub use error::{CompatibilityWarning, NameSetError, Operation, Reconciled};
pub use io::read_names;
pub use model::algebra::Operand;
pub use model::filter::BannedWords;
pub use model::history::History;
pub use model::length::{LengthMetric, estimate_syllables};
pub use model::name_set::NameSet;
pub use model::options::{
	DEFAULT_MAX_ATTEMPTS, DEFAULT_N_CANDIDATES, DEFAULT_ORDER, MakeNameOptions, Preference, order_from_i64,
	parse_order,
};
pub use model::stress::StressReport;
