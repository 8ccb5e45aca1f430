//! Markov name generation.
//!
//! This module provides:
//! - The character-level transition table (`MarkovChain`) and its states
//! - Length metrics used to rank candidates (`LengthMetric`)
//! - The shared generation history (`History`)
//! - Candidate validation and selection
//! - The `NameSet` aggregate and its set algebra

/// Multiset-aware `+`, `-`, `|` and `&` over name-sets.
pub mod algebra;

/// Banned words and the candidate validity predicate.
pub mod filter;

/// Set of already produced names, shareable between name-sets.
pub mod history;

/// Length metrics and the syllable estimate.
pub mod length;

/// Fixed-order character Markov chain: table builder and raw generator.
pub mod markov_chain;

/// Training names, chain, metric cache and history in one aggregate.
pub mod name_set;

/// Generation configuration.
pub mod options;

/// Ranking of valid candidates by length preference.
pub mod selection;

/// Continuation multiset of a single context key.
pub mod state;

/// Exhaustion measurement of a name-set.
pub mod stress;
