use std::collections::BTreeMap;

use rand::Rng;

/// A symbol that can follow a context in the Markov chain.
///
/// `End` marks the end of a name. It is a distinct variant rather than a
/// reserved character, so it can never collide with input text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Continuation {
	Char(char),
	End,
}

/// Multiset of continuations observed after one context key.
///
/// Conceptually a node in the Markov chain whose outgoing edges are weighted
/// by how many times they were observed. Frequencies are never stored as
/// explicit weights: a continuation seen `k` times simply has `k` occurrences.
///
/// ## Invariants
/// - Every stored occurrence count is strictly positive
/// - `total` equals the sum of all occurrence counts
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
	/// Outgoing transitions indexed by continuation.
	/// Example: { Char('e') => 42, Char('a') => 3, End => 7 }
	transitions: BTreeMap<Continuation, usize>,
	total: usize,
}

impl State {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `next`.
	pub fn add_transition(&mut self, next: Continuation) {
		*self.transitions.entry(next).or_insert(0) += 1;
		self.total += 1;
	}

	/// Removes exactly one occurrence of `next`.
	///
	/// Returns `false` if `next` was never observed from this state.
	pub fn remove_transition(&mut self, next: Continuation) -> bool {
		let Some(occurrence) = self.transitions.get_mut(&next) else {
			return false;
		};
		*occurrence -= 1;
		if *occurrence == 0 {
			self.transitions.remove(&next);
		}
		self.total -= 1;
		true
	}

	/// Number of occurrences of `next` in this multiset.
	pub fn count(&self, next: Continuation) -> usize {
		self.transitions.get(&next).copied().unwrap_or(0)
	}

	/// Total number of occurrences, duplicates included.
	pub fn len(&self) -> usize {
		self.total
	}

	pub fn is_empty(&self) -> bool {
		self.total == 0
	}

	/// Iterates over distinct continuations and their multiplicities.
	pub fn iter(&self) -> impl Iterator<Item = (Continuation, usize)> + '_ {
		self.transitions.iter().map(|(next, occurrence)| (*next, *occurrence))
	}

	/// Draws one occurrence uniformly at random.
	///
	/// A continuation present `k` times is `k` times as likely as one present
	/// once. Returns `None` if the state has no transitions.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Continuation> {
		if self.total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..self.total);
		for (next, occurrence) in &self.transitions {
			if r < *occurrence {
				return Some(*next);
			}
			r -= occurrence;
		}

		// Unreachable while `total` matches the stored counts.
		None
	}

	/// Adds every occurrence of `other` to this multiset.
	pub fn merge(&mut self, other: &Self) {
		for (next, occurrence) in &other.transitions {
			*self.transitions.entry(*next).or_insert(0) += *occurrence;
		}
		self.total += other.total;
	}
}
