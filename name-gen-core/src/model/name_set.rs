use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Index;
use std::path::Path;
use std::slice;

use log::debug;
use rand::Rng;

use super::filter::ValidityFilter;
use super::history::History;
use super::length::LengthMetric;
use super::markov_chain::MarkovChain;
use super::options::{DEFAULT_ORDER, MakeNameOptions};
use super::selection;
use crate::error::NameSetError;
use crate::{clean, io};

fn accept_all(_: &str) -> bool {
	true
}

/// Training names plus the Markov chain built from them.
///
/// A `NameSet` owns an ordered list of training names (duplicates are kept
/// and weight the chain), a membership cache over the distinct names, the
/// chain itself, a length metric with the cached metric sum, and a history of
/// names already produced. The history may be shared with other name-sets,
/// see [`NameSet::link_histories`].
///
/// # Invariants
/// - `names_set` is exactly the set of distinct values in `names`
/// - `chain` equals `MarkovChain::from_names(&names, order)`
/// - `total_len` equals [`LengthMetric::total`] over `names`, bit for bit
///
/// Every mutator keeps these in sync. Equality compares every field,
/// including the derived ones and the history contents.
#[derive(Debug, PartialEq)]
pub struct NameSet {
	names: Vec<String>,
	names_set: HashSet<String>,
	chain: MarkovChain,
	metric: LengthMetric,
	total_len: f64,
	history: History,
}

impl NameSet {
	/// Creates a name-set over `names` with the given order and metric.
	///
	/// The input is copied; the name-set never aliases the caller's data.
	pub fn new<I, S>(names: I, order: usize, metric: LengthMetric) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let names: Vec<String> = names.into_iter().map(Into::into).collect();
		Self {
			names_set: names.iter().cloned().collect(),
			chain: MarkovChain::from_names(&names, order),
			total_len: metric.total(&names),
			metric,
			names,
			history: History::new(),
		}
	}

	/// Loads names from a text file, one per line.
	///
	/// With `clean_up`, surrounding symbols are stripped and blank names
	/// dropped (see [`clean::clean`]).
	///
	/// # Errors
	/// Returns [`NameSetError::Io`] if the file cannot be read.
	pub fn from_file<P: AsRef<Path>>(
		path: P,
		order: usize,
		metric: LengthMetric,
		clean_up: bool,
	) -> Result<Self, NameSetError> {
		let mut names = io::read_names(path)?;
		if clean_up {
			names = clean::clean(&names);
		}
		Ok(Self::new(names, order, metric))
	}

	/// Markov order, i.e. how many preceding characters are matched.
	pub fn order(&self) -> usize {
		self.chain.order()
	}

	pub fn length_metric(&self) -> &LengthMetric {
		&self.metric
	}

	/// Average length of the training names under the length metric.
	pub fn avg_name_len(&self) -> f64 {
		if self.names.is_empty() {
			0.0
		} else {
			self.total_len / self.names.len() as f64
		}
	}

	/// Transition table built from the training names.
	pub fn chain(&self) -> &MarkovChain {
		&self.chain
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	/// Returns `true` if `name` is a training name.
	pub fn contains(&self, name: &str) -> bool {
		self.names_set.contains(name)
	}

	pub fn get(&self, index: usize) -> Option<&str> {
		self.names.get(index).map(String::as_str)
	}

	pub fn names(&self) -> &[String] {
		&self.names
	}

	pub fn iter(&self) -> slice::Iter<'_, String> {
		self.names.iter()
	}

	/// Appends `name` whether or not it is already present.
	pub fn append(&mut self, name: &str) {
		self.names.push(name.to_owned());
		self.names_set.insert(name.to_owned());
		self.chain.add_name(name);
		self.total_len += self.metric.measure(name);
	}

	/// Appends `name` only if it is not already present.
	pub fn add(&mut self, name: &str) {
		if !self.contains(name) {
			self.append(name);
		}
	}

	/// Removes one occurrence of `name`.
	///
	/// # Errors
	/// Returns [`NameSetError::NameNotFound`] if `name` is not a training name.
	pub fn remove(&mut self, name: &str) -> Result<(), NameSetError> {
		if self.remove_one(name) {
			Ok(())
		} else {
			Err(NameSetError::NameNotFound(name.to_owned()))
		}
	}

	/// Removes the first occurrence of `name`, returning whether one existed.
	pub(super) fn remove_one(&mut self, name: &str) -> bool {
		let Some(index) = self.names.iter().position(|n| n == name) else {
			return false;
		};
		let removed = self.names.remove(index);
		if !self.names.contains(&removed) {
			self.names_set.remove(&removed);
		}
		self.forget(&removed);
		self.total_len = self.metric.total(&self.names);
		true
	}

	/// Subtracts one occurrence's transitions from the chain. Callers
	/// recompute `total_len` afterwards.
	fn forget(&mut self, name: &str) {
		let complete = self.chain.remove_name(name);
		debug_assert!(complete, "chain was missing transitions of '{name}'");
	}

	/// Removes duplicates so each distinct name occurs once.
	///
	/// Equivalent to repeatedly removing the first occurrence of a duplicated
	/// name: the last occurrence of each name is the one kept.
	pub fn remove_duplicates(&mut self) {
		if self.names.len() == self.names_set.len() {
			return;
		}

		let mut remaining: HashMap<String, usize> = HashMap::with_capacity(self.names_set.len());
		for name in &self.names {
			*remaining.entry(name.clone()).or_insert(0) += 1;
		}

		let all = std::mem::take(&mut self.names);
		let mut dropped = Vec::new();
		for name in all {
			let left = remaining.get_mut(&name).map(|count| {
				*count -= 1;
				*count
			});
			if left == Some(0) {
				self.names.push(name);
			} else {
				dropped.push(name);
			}
		}
		for name in dropped {
			self.forget(&name);
		}
		self.total_len = self.metric.total(&self.names);
	}

	/// Changes the order and rebuilds the chain.
	pub fn change_order(&mut self, order: usize) {
		debug!("changing order {} -> {}", self.order(), order);
		self.chain.rebuild(&self.names, order);
	}

	/// Changes the length metric and recomputes the cached length sum.
	pub fn change_length_metric(&mut self, metric: LengthMetric) {
		debug!("changing length metric {} -> {}", self.metric, metric);
		self.total_len = metric.total(&self.names);
		self.metric = metric;
	}

	/// Replaces the training names and rebuilds every derived field.
	pub(super) fn rebuild_from(&mut self, names: Vec<String>) {
		let order = self.order();
		self.names_set = names.iter().cloned().collect();
		self.chain.rebuild(&names, order);
		self.total_len = self.metric.total(&names);
		self.names = names;
	}

	/// Concatenates another name-set with the same order and metric.
	pub(super) fn absorb(&mut self, other: &NameSet) {
		debug_assert_eq!(self.order(), other.order());
		self.names.extend(other.names.iter().cloned());
		self.names_set.extend(other.names_set.iter().cloned());
		self.chain.merge(&other.chain);
		self.total_len = self.metric.total(&self.names);
	}

	/// Handle to this name-set's history.
	pub fn history(&self) -> &History {
		&self.history
	}

	/// Independent copy of the history.
	pub fn history_snapshot(&self) -> HashSet<String> {
		self.history.snapshot()
	}

	/// Adds one name to the history, and so to every linked history.
	pub fn add_to_history(&self, name: &str) {
		self.history.insert(name);
	}

	/// Adds a collection of names to the history.
	///
	/// A single name goes through [`NameSet::add_to_history`]; a bare `&str`
	/// is not a collection and is rejected at compile time.
	pub fn extend_history<I, S>(&self, names: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.history.extend(names);
	}

	/// Clears the history, for every linked name-set too.
	pub fn clear_history(&self) {
		self.history.clear();
	}

	/// Links the histories of this name-set and `others`.
	///
	/// Their current histories are combined into one shared history, so adding
	/// a name through any of them adds it for all. Links they had before
	/// are broken; former partners keep their own shared history.
	pub fn link_histories<'a, I>(&mut self, others: I)
	where
		I: IntoIterator<Item = &'a mut NameSet>,
	{
		let mut others: Vec<&'a mut NameSet> = others.into_iter().collect();
		let shared = History::link(
			std::iter::once(&self.history).chain(others.iter().map(|other| &other.history)),
		);
		debug!("linking {} histories ({} names)", others.len() + 1, shared.len());
		for other in &mut others {
			other.history = shared.share();
		}
		self.history = shared;
	}

	/// Breaks any history link, keeping the current contents.
	pub fn unlink_history(&mut self) {
		if self.history.link_count() > 1 {
			debug!("unlinking history ({} names)", self.history.len());
		}
		self.history = self.history.detached();
	}

	/// Generates one name with the thread RNG and no extra validator.
	///
	/// Returns `None` if no valid candidate was found within the attempt
	/// budget.
	pub fn make_name(&self, options: &MakeNameOptions) -> Option<String> {
		self.make_name_with(options, None, &mut rand::rng())
	}

	/// Generates one name.
	///
	/// `validator` rejects candidates it returns `false` for. With
	/// `options.add_to_history` the returned name is recorded in the
	/// (possibly shared) history.
	pub fn make_name_with<R: Rng + ?Sized>(
		&self,
		options: &MakeNameOptions,
		validator: Option<&dyn Fn(&str) -> bool>,
		rng: &mut R,
	) -> Option<String> {
		let validator: &dyn Fn(&str) -> bool = match validator {
			Some(validator) => validator,
			None => &accept_all,
		};
		let filter = ValidityFilter::new(
			options.exclude_real_names.then_some(&self.names_set),
			options.exclude_history.then_some(&self.history),
			validator,
			&options.banned_words,
		);

		let name = selection::select(
			options.n_candidates,
			options.max_attempts,
			options.preference,
			&self.metric,
			self.avg_name_len(),
			|| self.chain.generate_raw(&mut *rng),
			|candidate| filter.is_valid(candidate),
		);

		match &name {
			Some(name) if options.add_to_history => self.history.insert(name),
			Some(_) => (),
			None => debug!(
				"no valid name after {} candidates x {} attempts",
				options.n_candidates, options.max_attempts
			),
		}
		name
	}

	/// Generates `n` names on a copy, leaving this name-set and its history
	/// untouched. Failed generations are kept as `None`.
	pub fn sample(&self, n: usize, options: &MakeNameOptions) -> Vec<Option<String>> {
		let copy = self.clone();
		let mut rng = rand::rng();
		(0..n).map(|_| copy.make_name_with(options, None, &mut rng)).collect()
	}
}

impl Default for NameSet {
	fn default() -> Self {
		Self::new(Vec::<String>::new(), DEFAULT_ORDER, LengthMetric::default())
	}
}

/// Deep copy. The copy's history holds the same names but is never linked.
impl Clone for NameSet {
	fn clone(&self) -> Self {
		Self {
			names: self.names.clone(),
			names_set: self.names_set.clone(),
			chain: self.chain.clone(),
			metric: self.metric.clone(),
			total_len: self.total_len,
			history: self.history.detached(),
		}
	}
}

/// Collects names with the default order and metric.
impl<S: Into<String>> FromIterator<S> for NameSet {
	fn from_iter<I: IntoIterator<Item = S>>(names: I) -> Self {
		Self::new(names, DEFAULT_ORDER, LengthMetric::default())
	}
}

impl Index<usize> for NameSet {
	type Output = str;

	fn index(&self, index: usize) -> &str {
		&self.names[index]
	}
}

impl<'a> IntoIterator for &'a NameSet {
	type Item = &'a String;
	type IntoIter = slice::Iter<'a, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.names.iter()
	}
}

impl fmt::Display for NameSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}, order = {}", self.names, self.order())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::filter::BannedWords;
	use crate::model::options::Preference;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	const NAMES: [&str; 5] = ["Alice", "Bob", "Carla", "Dmitri", "Eve"];

	fn names_set() -> NameSet {
		NameSet::new(NAMES, 3, LengthMetric::Chars)
	}

	fn assert_consistent(set: &NameSet) {
		let rebuilt = NameSet::new(set.names().to_vec(), set.order(), set.length_metric().clone());
		assert_eq!(set.names_set, rebuilt.names_set);
		assert_eq!(set.chain, rebuilt.chain);
		assert_eq!(set.total_len, rebuilt.total_len);
	}

	#[test]
	fn new_builds_every_cache() {
		let set = NameSet::new(["a", "bb", "a"], 2, LengthMetric::Chars);
		assert_eq!(set.len(), 3);
		assert_eq!(set.names_set.len(), 2);
		assert!((set.avg_name_len() - 4.0 / 3.0).abs() < 1e-12);
		assert_eq!(NameSet::default().avg_name_len(), 0.0);
		assert_eq!(NameSet::default().order(), DEFAULT_ORDER);
	}

	#[test]
	fn append_always_adds() {
		let mut set = names_set();
		set.append("Bob");
		set.append("Zed");
		assert_eq!(set.len(), 7);
		assert_eq!(set.names().iter().filter(|n| *n == "Bob").count(), 2);
		assert_consistent(&set);
	}

	#[test]
	fn add_skips_present_names() {
		let mut set = names_set();
		set.add("Bob");
		assert_eq!(set.len(), 5);
		set.add("Zed");
		assert_eq!(set.len(), 6);
		assert_eq!(set.get(5), Some("Zed"));
	}

	#[test]
	fn remove_one_occurrence() {
		let mut set = NameSet::new(["Bob", "Ann", "Bob"], 2, LengthMetric::Chars);
		set.remove("Bob").unwrap();
		assert_eq!(set.names(), ["Ann", "Bob"]);
		assert!(set.contains("Bob"));
		assert_consistent(&set);

		set.remove("Bob").unwrap();
		assert!(!set.contains("Bob"));
		assert_consistent(&set);

		assert!(matches!(set.remove("Bob"), Err(NameSetError::NameNotFound(n)) if n == "Bob"));
		set.remove("Ann").unwrap();
		assert!(set.is_empty());
		assert_eq!(set.avg_name_len(), 0.0);
		assert!(set.chain().is_empty());
	}

	#[test]
	fn remove_uses_the_metric() {
		let mut set = NameSet::new(["Anna", "Bo"], 3, LengthMetric::Syllables);
		set.remove("Anna").unwrap();
		assert_eq!(set.avg_name_len(), 1.0);
	}

	#[test]
	fn fractional_metric_matches_rebuild() {
		let tenth = LengthMetric::custom("tenth", |_| 0.1);
		let mut set = NameSet::new(["a", "b", "c"], 2, tenth.clone());
		set.remove("a").unwrap();
		assert_eq!(set.total_len, tenth.total(set.names()));
		assert_consistent(&set);

		set.append("d");
		set.append("d");
		assert_consistent(&set);
		set.remove_duplicates();
		assert_consistent(&set);

		set.sum_assign(&NameSet::new(["e", "f", "g"], 2, tenth.clone()));
		assert_consistent(&set);
		assert_eq!(set, NameSet::new(set.names().to_vec(), 2, tenth));
	}

	#[test]
	fn remove_duplicates_keeps_last_occurrences() {
		let mut set = NameSet::new(["a", "b", "a", "c", "b", "a"], 1, LengthMetric::Chars);
		set.remove_duplicates();
		assert_eq!(set.names(), ["c", "b", "a"]);
		assert_consistent(&set);
	}

	#[test]
	fn change_order_rebuilds_chain() {
		let mut set = names_set();
		set.change_order(1);
		assert_eq!(set.order(), 1);
		assert_eq!(set, NameSet::new(NAMES, 1, LengthMetric::Chars));
	}

	#[test]
	fn change_metric_recomputes_average() {
		let mut set = NameSet::new(["Anna", "Bob"], 3, LengthMetric::Chars);
		assert_eq!(set.avg_name_len(), 3.5);
		set.change_length_metric(LengthMetric::Syllables);
		assert_eq!(set.avg_name_len(), 1.5);
		assert_eq!(set.length_metric(), &LengthMetric::Syllables);
	}

	#[test]
	fn equality_includes_history() {
		let a = names_set();
		let b = names_set();
		assert_eq!(a, b);
		b.add_to_history("Zed");
		assert_ne!(a, b);
		assert_ne!(a, NameSet::new(NAMES, 2, LengthMetric::Chars));
		assert_ne!(a, NameSet::new(NAMES, 3, LengthMetric::Syllables));
	}

	#[test]
	fn clone_is_deep_and_unlinked() {
		let mut a = names_set();
		let mut b = NameSet::new(["Zed"], 3, LengthMetric::Chars);
		a.link_histories([&mut b]);
		a.add_to_history("Ann");

		let mut copy = a.clone();
		assert_eq!(copy, a);
		assert!(!copy.history().is_linked_with(a.history()));

		copy.append("Xavier");
		copy.add_to_history("Yan");
		assert_eq!(a.len(), 5);
		assert!(!a.history().contains("Yan"));
		assert!(!b.history().contains("Yan"));
	}

	#[test]
	fn single_name_without_exclusion() {
		let set = NameSet::new(["name1"], 3, LengthMetric::Chars);
		let options = MakeNameOptions { exclude_real_names: false, ..MakeNameOptions::default() };
		let mut rng = SmallRng::seed_from_u64(11);

		assert_eq!(set.make_name_with(&options, None, &mut rng).as_deref(), Some("name1"));
		// Now in the history, so excluded.
		assert_eq!(set.make_name_with(&options, None, &mut rng), None);
		assert_eq!(set.history_snapshot(), HashSet::from(["name1".to_owned()]));
	}

	#[test]
	fn real_names_are_excluded_by_default() {
		let set = NameSet::new(["name 1", "name2"], 3, LengthMetric::Chars);
		let mut rng = SmallRng::seed_from_u64(5);
		assert_eq!(set.make_name_with(&MakeNameOptions::default(), None, &mut rng), None);
	}

	#[test]
	fn add_to_history_can_be_disabled() {
		let set = NameSet::new(["name1"], 3, LengthMetric::Chars);
		let options = MakeNameOptions { exclude_real_names: false, add_to_history: false, ..MakeNameOptions::default() };
		let mut rng = SmallRng::seed_from_u64(1);
		for _ in 0..5 {
			assert_eq!(set.make_name_with(&options, None, &mut rng).as_deref(), Some("name1"));
		}
		assert!(set.history().is_empty());
	}

	#[test]
	fn validator_rejects_candidates() {
		let set = names_set();
		let options = MakeNameOptions::permissive();
		let mut rng = SmallRng::seed_from_u64(9);
		let never = |_: &str| false;
		assert_eq!(set.make_name_with(&options, Some(&never), &mut rng), None);

		let five = |name: &str| name.chars().count() == 5;
		for _ in 0..20 {
			let name = set.make_name_with(&options, Some(&five), &mut rng);
			assert_eq!(name.map(|n| n.chars().count()), Some(5));
		}
	}

	#[test]
	fn banned_words_block_generation() {
		let set = NameSet::new(["NAME1", "name2", " NaMe 3 "], 3, LengthMetric::Chars);
		let options = MakeNameOptions {
			banned_words: BannedWords::new(["name"]),
			..MakeNameOptions::permissive()
		};
		let mut rng = SmallRng::seed_from_u64(2);
		assert_eq!(set.make_name_with(&options, None, &mut rng), None);
	}

	#[test]
	fn preference_picks_among_candidates() {
		let set = NameSet::new(["hey", "hi", "hello"], 3, LengthMetric::Chars);
		let mut rng = SmallRng::seed_from_u64(4);
		let mut options = MakeNameOptions { n_candidates: 40, ..MakeNameOptions::permissive() };

		options.preference = Preference::Min;
		assert_eq!(set.make_name_with(&options, None, &mut rng).as_deref(), Some("hi"));
		options.preference = Preference::Avg;
		assert_eq!(set.make_name_with(&options, None, &mut rng).as_deref(), Some("hey"));
		options.preference = Preference::Max;
		assert_eq!(set.make_name_with(&options, None, &mut rng).as_deref(), Some("hello"));
	}

	#[test]
	fn linked_histories_propagate() {
		let mut a = names_set();
		let mut b = NameSet::new(["Zed"], 3, LengthMetric::Chars);
		a.add_to_history("Ann");
		b.add_to_history("Bea");

		a.link_histories([&mut b]);
		assert_eq!(a.history_snapshot(), b.history_snapshot());
		assert_eq!(a.history().len(), 2);

		a.add_to_history("Cal");
		assert!(b.history().contains("Cal"));

		b.unlink_history();
		assert!(b.history().contains("Cal"));
		a.add_to_history("Dov");
		assert!(!b.history().contains("Dov"));
		b.add_to_history("Eli");
		assert!(!a.history().contains("Eli"));
	}

	#[test]
	fn relinking_breaks_previous_groups() {
		let mut a = names_set();
		let mut b = names_set();
		let mut c = names_set();
		a.link_histories([&mut b]);
		c.link_histories([&mut b]);

		c.add_to_history("Fay");
		assert!(b.history().contains("Fay"));
		assert!(!a.history().contains("Fay"));
	}

	#[test]
	fn clear_history_clears_linked_sets() {
		let mut a = names_set();
		let mut b = names_set();
		a.link_histories([&mut b]);
		a.extend_history(["Gus", "Hal"]);
		b.clear_history();
		assert!(a.history().is_empty());
	}

	#[test]
	fn sample_leaves_receiver_untouched() {
		let set = NameSet::new(["name1"], 3, LengthMetric::Chars);
		let options = MakeNameOptions { exclude_real_names: false, ..MakeNameOptions::default() };
		let samples = set.sample(3, &options);
		assert_eq!(samples, vec![Some("name1".to_owned()), None, None]);
		assert!(set.history().is_empty());
	}

	#[test]
	fn display_lists_names_and_order() {
		let set = NameSet::new(["a", "b"], 2, LengthMetric::Chars);
		assert_eq!(set.to_string(), r#"["a", "b"], order = 2"#);
		assert_eq!(&set[1], "b");
		assert_eq!((&set).into_iter().count(), 2);
	}
}
