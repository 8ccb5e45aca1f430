use std::collections::HashMap;

use rand::Rng;

use super::state::{Continuation, State};

/// Running context of at most `order` trailing characters.
///
/// Shared by the builder and the generator so both truncate contexts the
/// same way.
struct Context {
	text: String,
	len: usize,
	order: usize,
}

impl Context {
	fn new(order: usize) -> Self {
		Self { text: String::new(), len: 0, order }
	}

	fn as_str(&self) -> &str {
		&self.text
	}

	/// Appends `c` and drops the leftmost character if the context grows
	/// past the order.
	fn push(&mut self, c: char) {
		self.text.push(c);
		self.len += 1;
		if self.len > self.order {
			self.text.remove(0);
			self.len -= 1;
		}
	}
}

/// Character-level Markov chain of a fixed order.
///
/// Maps every context key (a string of `0..=order` characters) to the
/// multiset of continuations observed after it in the training names.
///
/// # Invariants
/// - For every position of every training name, the preceding context
///   (truncated to `order` trailing characters) is a key whose multiset holds
///   the following character, or `End` after the last one, once per occurrence
/// - No stored state is empty
/// - The empty context is the only context seen at the start of a name
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkovChain {
	order: usize,

	/// Mapping from a context key to its continuation multiset
	states: HashMap<String, State>,
}

impl MarkovChain {
	/// Creates an empty chain of the given order.
	pub fn new(order: usize) -> Self {
		Self { order, states: HashMap::new() }
	}

	/// Builds a chain from scratch over `names`.
	///
	/// Runs in time proportional to the total character count.
	pub fn from_names<I, S>(names: I, order: usize) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut chain = Self::new(order);
		for name in names {
			chain.add_name(name.as_ref());
		}
		chain
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Returns the continuation multiset of a context key.
	pub fn state(&self, key: &str) -> Option<&State> {
		self.states.get(key)
	}

	/// Iterates over every context key.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.states.keys().map(String::as_str)
	}

	/// Number of distinct context keys.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Adds the contribution of one name.
	pub fn add_name(&mut self, name: &str) {
		self.for_each_transition(name, |states, key, next| {
			states.entry(key.to_owned()).or_default().add_transition(next);
		});
	}

	/// Removes the contribution of one occurrence of `name`.
	///
	/// States left empty are deleted, so the result matches a full rebuild
	/// without that occurrence. Returns `false` if some transition of the name
	/// was missing, which means the name was not part of the training data.
	pub fn remove_name(&mut self, name: &str) -> bool {
		let mut complete = true;
		self.for_each_transition(name, |states, key, next| {
			let Some(state) = states.get_mut(key) else {
				complete = false;
				return;
			};
			complete &= state.remove_transition(next);
			if state.is_empty() {
				states.remove(key);
			}
		});
		complete
	}

	/// Rebuilds the whole chain with a new order.
	pub fn rebuild<I, S>(&mut self, names: I, order: usize)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		*self = Self::from_names(names, order);
	}

	/// Merges another chain into this one by per-key multiset concatenation.
	///
	/// Both chains are expected to share the same order; the caller is
	/// responsible for reconciling them first.
	pub fn merge(&mut self, other: &Self) {
		debug_assert_eq!(self.order, other.order, "merging chains of different order");
		for (key, state) in &other.states {
			if let Some(existing) = self.states.get_mut(key) {
				existing.merge(state);
			} else {
				self.states.insert(key.clone(), state.clone());
			}
		}
	}

	/// Walks the chain once from the empty context and returns the raw,
	/// unfiltered string.
	///
	/// A missing or empty state ends the name. There is no step bound:
	/// every context reachable from a built chain holds a path to `End`.
	pub fn generate_raw<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
		let mut name = String::new();
		let mut context = Context::new(self.order);
		loop {
			let next = self
				.states
				.get(context.as_str())
				.and_then(|state| state.predict(rng));
			match next {
				Some(Continuation::Char(c)) => {
					name.push(c);
					context.push(c);
				}
				Some(Continuation::End) | None => break,
			}
		}
		name
	}

	/// Calls `apply` with each (context, continuation) pair of `name`.
	fn for_each_transition<F>(&mut self, name: &str, mut apply: F)
	where
		F: FnMut(&mut HashMap<String, State>, &str, Continuation),
	{
		let mut context = Context::new(self.order);
		for c in name.chars() {
			apply(&mut self.states, context.as_str(), Continuation::Char(c));
			context.push(c);
		}
		apply(&mut self.states, context.as_str(), Continuation::End);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	fn counts(chain: &MarkovChain, key: &str) -> Vec<(Continuation, usize)> {
		chain.state(key).map(|s| s.iter().collect()).unwrap_or_default()
	}

	#[test]
	fn order_two_table() {
		let chain = MarkovChain::from_names(["name 1", "name2"], 2);
		assert_eq!(chain.len(), 8);
		assert_eq!(counts(&chain, ""), vec![(Continuation::Char('n'), 2)]);
		assert_eq!(counts(&chain, "na"), vec![(Continuation::Char('m'), 2)]);
		assert_eq!(
			counts(&chain, "me"),
			vec![(Continuation::Char(' '), 1), (Continuation::Char('2'), 1)]
		);
		assert_eq!(counts(&chain, " 1"), vec![(Continuation::End, 1)]);
		assert_eq!(counts(&chain, "e2"), vec![(Continuation::End, 1)]);
	}

	#[test]
	fn order_three_table() {
		let chain = MarkovChain::from_names(["name 1", "name2", "name3", "name4"], 3);
		assert_eq!(chain.state("").map(|s| s.count(Continuation::Char('n'))), Some(4));
		assert_eq!(chain.state("").map(State::len), Some(4));
		assert_eq!(counts(&chain, "nam"), vec![(Continuation::Char('e'), 4)]);
		assert_eq!(counts(&chain, "me "), vec![(Continuation::Char('1'), 1)]);
		assert_eq!(counts(&chain, "e 1"), vec![(Continuation::End, 1)]);
	}

	#[test]
	fn order_zero_uses_only_the_empty_context() {
		let chain = MarkovChain::from_names(["ab", "b"], 0);
		assert_eq!(chain.keys().collect::<Vec<_>>(), vec![""]);
		assert_eq!(
			counts(&chain, ""),
			vec![
				(Continuation::Char('a'), 1),
				(Continuation::Char('b'), 2),
				(Continuation::End, 2),
			]
		);
	}

	#[test]
	fn multibyte_contexts_are_truncated_by_character() {
		let chain = MarkovChain::from_names(["éàü"], 1);
		assert_eq!(counts(&chain, "à"), vec![(Continuation::Char('ü'), 1)]);
		assert_eq!(counts(&chain, "ü"), vec![(Continuation::End, 1)]);
	}

	#[test]
	fn remove_matches_full_rebuild() {
		let mut chain = MarkovChain::from_names(["ba", "ab", "abc"], 2);
		assert!(chain.remove_name("ab"));
		assert_eq!(chain, MarkovChain::from_names(["ba", "abc"], 2));
		assert!(chain.remove_name("ba"));
		assert!(chain.remove_name("abc"));
		assert!(chain.is_empty());
	}

	#[test]
	fn remove_unknown_name_reports_it() {
		let mut chain = MarkovChain::from_names(["abc"], 2);
		assert!(!chain.remove_name("xyz"));
	}

	#[test]
	fn merge_is_concatenation() {
		let mut left = MarkovChain::from_names(["anna"], 2);
		left.merge(&MarkovChain::from_names(["bob", "anna"], 2));
		assert_eq!(left, MarkovChain::from_names(["anna", "bob", "anna"], 2));
	}

	#[test]
	fn single_name_walk_reproduces_the_name() {
		let chain = MarkovChain::from_names(["name1"], 3);
		let mut rng = SmallRng::seed_from_u64(3);
		for _ in 0..20 {
			assert_eq!(chain.generate_raw(&mut rng), "name1");
		}
	}

	#[test]
	fn empty_chain_generates_empty_string() {
		let mut rng = SmallRng::seed_from_u64(3);
		assert_eq!(MarkovChain::new(3).generate_raw(&mut rng), "");
	}
}
