use std::fmt;
use std::io;

use thiserror::Error;

/// Errors reported by name-set construction, mutation and configuration.
///
/// Every variant is local to the call that produced it; nothing here is
/// fatal to the process.
#[derive(Debug, Error)]
pub enum NameSetError {
	/// The requested Markov order is not a non-negative integer.
	#[error("invalid order '{0}': must be a non-negative integer")]
	InvalidOrder(String),

	/// The requested candidate preference is not one of min, max or avg.
	#[error("invalid candidate preference '{0}': expected min, max or avg")]
	InvalidPreference(String),

	/// `remove` was called with a name that is not in the training data.
	#[error("name '{0}' is not in the name set")]
	NameNotFound(String),

	/// The corpus file could not be read.
	#[error("failed to read names: {0}")]
	Io(#[from] io::Error),
}

/// Operator that produced a [`CompatibilityWarning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
	Add,
	Subtract,
	Union,
	Intersect,
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let verb = match self {
			Operation::Add => "adding",
			Operation::Subtract => "subtracting",
			Operation::Union => "taking union of",
			Operation::Intersect => "taking intersection of",
		};
		f.write_str(verb)
	}
}

/// Non-fatal diagnostic raised when two name-sets with different
/// configurations are combined.
///
/// The operation always proceeds with the left operand's configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompatibilityWarning {
	#[error("{operation} name set of order {right} with name set of order {left}; result will be of order {left}")]
	Order {
		operation: Operation,
		left: usize,
		right: usize,
	},

	#[error("{operation} name set with length metric '{right}' with name set with length metric '{left}'; result will use '{left}'")]
	LengthMetric {
		operation: Operation,
		left: String,
		right: String,
	},
}

/// A computed value together with the compatibility warnings raised while
/// computing it.
///
/// Callers decide whether to surface or ignore the warnings; they are also
/// logged at `warn` level when raised.
#[derive(Debug)]
#[must_use]
pub struct Reconciled<T> {
	pub value: T,
	pub warnings: Vec<CompatibilityWarning>,
}

impl<T> Reconciled<T> {
	pub(crate) fn new(value: T, warnings: Vec<CompatibilityWarning>) -> Self {
		Self { value, warnings }
	}

	/// Returns `true` if the operands had matching configurations.
	pub fn is_clean(&self) -> bool {
		self.warnings.is_empty()
	}

	/// Drops the warnings and returns the value.
	pub fn into_value(self) -> T {
		self.value
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn order_warning_names_both_orders() {
		let warning = CompatibilityWarning::Order { operation: Operation::Add, left: 3, right: 2 };
		let message = warning.to_string();
		assert!(message.starts_with("adding name set of order 2"));
		assert!(message.ends_with("result will be of order 3"));
	}

	#[test]
	fn not_found_message() {
		let error = NameSetError::NameNotFound("Alice".to_owned());
		assert_eq!(error.to_string(), "name 'Alice' is not in the name set");
	}
}
