use std::fmt;
use std::rc::Rc;

/// Scoring function used to compare the "length" of names.
///
/// The metric drives candidate selection and the cached corpus average of a
/// [`NameSet`](super::name_set::NameSet).
///
/// # Equality
/// Built-in metrics compare by kind. Two custom metrics are equal only when
/// they share the same function instance, so cloning a custom metric keeps it
/// equal to the original while two separately built closures never are.
#[derive(Clone, Default)]
pub enum LengthMetric {
	/// Number of characters (default).
	#[default]
	Chars,
	/// Estimated syllable count, see [`estimate_syllables`].
	Syllables,
	/// Caller supplied function, labelled for diagnostics.
	Custom {
		label: String,
		func: Rc<dyn Fn(&str) -> f64>,
	},
}

impl LengthMetric {
	/// Wraps a caller supplied scoring function.
	pub fn custom<F>(label: impl Into<String>, func: F) -> Self
	where
		F: Fn(&str) -> f64 + 'static,
	{
		LengthMetric::Custom { label: label.into(), func: Rc::new(func) }
	}

	/// Scores one name.
	pub fn measure(&self, name: &str) -> f64 {
		match self {
			LengthMetric::Chars => name.chars().count() as f64,
			LengthMetric::Syllables => estimate_syllables(name) as f64,
			LengthMetric::Custom { func, .. } => func(name),
		}
	}

	/// Sum of the metric over every name, added left to right from `0.0`.
	///
	/// Appending a name to a list and adding its measure to the previous
	/// total gives a bit-identical result.
	pub fn total<I, S>(&self, names: I) -> f64
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		names.into_iter().fold(0.0, |sum, name| sum + self.measure(name.as_ref()))
	}

	/// Short human readable name of the metric.
	pub fn label(&self) -> &str {
		match self {
			LengthMetric::Chars => "chars",
			LengthMetric::Syllables => "syllables",
			LengthMetric::Custom { label, .. } => label,
		}
	}
}

impl PartialEq for LengthMetric {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(LengthMetric::Chars, LengthMetric::Chars) => true,
			(LengthMetric::Syllables, LengthMetric::Syllables) => true,
			(LengthMetric::Custom { func: a, .. }, LengthMetric::Custom { func: b, .. }) => Rc::ptr_eq(a, b),
			_ => false,
		}
	}
}

impl fmt::Debug for LengthMetric {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "LengthMetric({})", self.label())
	}
}

impl fmt::Display for LengthMetric {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

const VOWELS: &str = "aeiouyAEIOUY";
// An apostrophe counts as a consonant.
const CONSONANTS: &str = "bcdfghjklmnpqrstvwxzBCDFGHJKLMNPQRSTVWXZ'";
const SYLLABLE_BREAKS: &str = " -";

/// Syllables spoken for a digit, if `c` is one.
fn digit_syllables(c: char) -> Option<usize> {
	match c {
		'7' | '0' => Some(2),
		'1'..='9' => Some(1),
		_ => None,
	}
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
	Onset,
	Nucleus,
	Coda,
}

/// Estimates the number of syllables in a name.
///
/// Counts alternations between runs of consonants and vowels. Spaces and
/// hyphens close the current syllable, digits add the syllables of their
/// spoken form. Only an estimate: "antidisestablishmentarianism" has 12
/// syllables and is estimated at 10.
pub fn estimate_syllables(name: &str) -> usize {
	let Some(last) = name.chars().last() else {
		return 0;
	};

	let mut syllables = 0;
	let mut section = Section::Onset;
	for c in name.chars() {
		if let Some(spoken) = digit_syllables(c) {
			syllables += spoken;
		} else if SYLLABLE_BREAKS.contains(c) {
			syllables += 1;
			section = Section::Onset;
		} else if VOWELS.contains(c) {
			match section {
				Section::Onset => section = Section::Nucleus,
				Section::Coda => {
					syllables += 1;
					section = Section::Nucleus;
				}
				Section::Nucleus => {}
			}
		} else if CONSONANTS.contains(c) && section == Section::Nucleus {
			section = Section::Coda;
		}
	}

	// The syllable in progress has not been counted yet.
	if !SYLLABLE_BREAKS.contains(last) && digit_syllables(last).is_none() {
		syllables += 1;
	}

	syllables
}
