use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::name_set::NameSet;
use super::options::MakeNameOptions;

/// Outcome of [`NameSet::stress_test`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressReport {
	/// Number of training names.
	pub training_names: usize,
	/// Distinct names in the history at the end of the run.
	pub unique_names: usize,
	/// Names generated before the first failure.
	pub total_names: usize,
	/// `true` if the run stopped on a failed generation rather than the cap.
	pub exhausted: bool,
}

impl StressReport {
	pub fn names_per_training_name(&self) -> f64 {
		if self.training_names == 0 {
			0.0
		} else {
			self.total_names as f64 / self.training_names as f64
		}
	}

	pub fn unique_percent(&self) -> f64 {
		if self.total_names == 0 {
			0.0
		} else {
			100.0 * self.unique_names as f64 / self.total_names as f64
		}
	}
}

impl NameSet {
	/// Measures how many names can be generated before the history fills up.
	///
	/// Runs on a copy with an empty history, generating until the first
	/// failure or until `max_names` names were made. The receiver is not
	/// modified.
	pub fn stress_test(&self, options: &MakeNameOptions, max_names: usize) -> StressReport {
		self.stress_test_with(options, max_names, &mut rand::rng())
	}

	pub fn stress_test_with<R: Rng + ?Sized>(
		&self,
		options: &MakeNameOptions,
		max_names: usize,
		rng: &mut R,
	) -> StressReport {
		if self.is_empty() {
			return StressReport::default();
		}
		if !options.add_to_history {
			warn!("add_to_history is disabled; unique name count will not be accurate");
		}

		let copy = self.clone();
		copy.clear_history();

		let mut report = StressReport { training_names: self.len(), ..StressReport::default() };
		while report.total_names < max_names {
			if copy.make_name_with(options, None, &mut *rng).is_none() {
				report.exhausted = true;
				break;
			}
			report.total_names += 1;
		}
		report.unique_names = copy.history().len();
		debug!("stress test: {report:?}");
		report
	}
}
