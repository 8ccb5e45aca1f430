use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::history::History;

/// Case-insensitive set of substrings that may not appear in a generated name.
///
/// Words are stored case-folded (see [`fold_case`]).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct BannedWords {
	words: BTreeSet<String>,
}

impl BannedWords {
	pub fn new<I, S>(words: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut banned = Self::default();
		banned.extend(words);
		banned
	}

	pub fn insert(&mut self, word: &str) {
		self.words.insert(fold_case(word));
	}

	pub fn extend<I, S>(&mut self, words: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.words.extend(words.into_iter().map(|word| fold_case(word.as_ref())));
	}

	pub fn contains(&self, word: &str) -> bool {
		self.words.contains(&fold_case(word))
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.words.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}

impl From<Vec<String>> for BannedWords {
	fn from(words: Vec<String>) -> Self {
		Self::new(words)
	}
}

impl From<BannedWords> for Vec<String> {
	fn from(banned: BannedWords) -> Self {
		banned.words.into_iter().collect()
	}
}

/// Lower-cases `text` and expands the characters whose case folding is
/// longer than their lower case: `ß` and `ẞ` become `ss`, `ſ` becomes `s`,
/// and the Latin `ﬀ`..`ﬆ` ligatures are split.
///
/// Both banned words and candidates go through this, so `"ss"` matches
/// `"Straße"` and `"STRASSE"` alike.
pub fn fold_case(text: &str) -> String {
	let mut folded = String::with_capacity(text.len());
	for c in text.chars().flat_map(char::to_lowercase) {
		match c {
			'ß' => folded.push_str("ss"),
			'ſ' => folded.push('s'),
			'ﬀ' => folded.push_str("ff"),
			'ﬁ' => folded.push_str("fi"),
			'ﬂ' => folded.push_str("fl"),
			'ﬃ' => folded.push_str("ffi"),
			'ﬄ' => folded.push_str("ffl"),
			'ﬅ' | 'ﬆ' => folded.push_str("st"),
			_ => folded.push(c),
		}
	}
	folded
}

/// Returns `true` if `name` contains none of the banned words, ignoring case.
pub fn is_clean(name: &str, banned_words: &BannedWords) -> bool {
	if banned_words.is_empty() {
		return true;
	}
	let folded = fold_case(name);
	!banned_words.iter().any(|word| folded.contains(word))
}

/// Predicate deciding whether a raw candidate may be returned.
///
/// A candidate is valid when it is non-empty, accepted by the validator, not
/// a training name (if `corpus` is set), not in the history (if `history` is
/// set) and free of banned words.
pub struct ValidityFilter<'a> {
	corpus: Option<&'a HashSet<String>>,
	history: Option<&'a History>,
	validator: &'a dyn Fn(&str) -> bool,
	banned_words: &'a BannedWords,
}

impl<'a> ValidityFilter<'a> {
	/// Pass `None` for `corpus` or `history` to allow repeats of those names.
	pub fn new(
		corpus: Option<&'a HashSet<String>>,
		history: Option<&'a History>,
		validator: &'a dyn Fn(&str) -> bool,
		banned_words: &'a BannedWords,
	) -> Self {
		Self { corpus, history, validator, banned_words }
	}

	pub fn is_valid(&self, name: &str) -> bool {
		!name.is_empty()
			&& (self.validator)(name)
			&& !self.corpus.is_some_and(|corpus| corpus.contains(name))
			&& !self.history.is_some_and(|history| history.contains(name))
			&& is_clean(name, self.banned_words)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn accept_all(_: &str) -> bool {
		true
	}

	#[test]
	fn banned_words_ignore_case() {
		let banned = BannedWords::new(["no"]);
		assert!(!is_clean("Nolan", &banned));
		assert!(!is_clean("BRUNO", &banned));
		assert!(is_clean("Alan", &banned));

		let shouting = BannedWords::new(["NAME"]);
		assert!(!is_clean("name2", &shouting));
		assert!(shouting.contains("Name"));
	}

	#[test]
	fn banned_words_fold_sharp_s_and_ligatures() {
		let banned = BannedWords::new(["ss"]);
		assert!(!is_clean("Straße", &banned));
		assert!(!is_clean("STRASSE", &banned));
		assert!(is_clean("Strase", &banned));

		let sharp = BannedWords::new(["Maß"]);
		assert!(sharp.contains("MASS"));
		assert!(!is_clean("Massimo", &sharp));
		assert!(!is_clean("ﬁnn", &BannedWords::new(["FI"])));
		assert_eq!(fold_case("ẞIG"), "ssig");
	}

	#[test]
	fn filter_checks_every_rule() {
		let corpus: HashSet<String> = ["Ada".to_owned()].into();
		let history = History::new();
		history.insert("Bo");
		let banned = BannedWords::new(["x"]);
		let short = |name: &str| name.len() < 4;

		let filter = ValidityFilter::new(Some(&corpus), Some(&history), &short, &banned);
		assert!(filter.is_valid("Cy"));
		assert!(!filter.is_valid(""));
		assert!(!filter.is_valid("Ada"));
		assert!(!filter.is_valid("Bo"));
		assert!(!filter.is_valid("Max"));
		assert!(!filter.is_valid("Dolly"));
	}

	#[test]
	fn filter_can_allow_repeats() {
		let banned = BannedWords::default();
		let filter = ValidityFilter::new(None, None, &accept_all, &banned);
		assert!(filter.is_valid("Ada"));
		assert!(!filter.is_valid(""));
	}

	#[test]
	fn banned_words_serialize_as_a_list() {
		let banned: BannedWords = serde_json::from_str(r#"["Foo", "bar"]"#).unwrap();
		assert!(banned.contains("foo"));
		assert_eq!(serde_json::to_string(&banned).unwrap(), r#"["bar","foo"]"#);
	}
}
