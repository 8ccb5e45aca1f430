//! Multiset-aware set algebra over name-sets.
//!
//! | operator | in place | duplicates |
//! |----------|----------|------------|
//! | `+`  | `+=` / [`NameSet::sum_assign`] | kept from both sides |
//! | `-`  | `-=` / [`NameSet::difference_assign`] | one removed per occurrence on the right |
//! | `\|` | `\|=` / [`NameSet::union_assign`] | all removed |
//! | `&`  | `&=` / [`NameSet::intersection_assign`] | minimum multiplicity of both sides |
//!
//! The right operand is another name-set or any collection of names. A bare
//! string is not a collection and does not convert into an [`Operand`]:
//!
//! ```compile_fail
//! use name_gen_core::model::name_set::NameSet;
//!
//! let set: NameSet = ["Alice", "Bob"].into_iter().collect();
//! let _ = &set + "Carol";
//! ```
//!
//! Results keep the left operand's order and length metric. Non-mutating
//! forms return a name-set with an empty history; in-place forms leave the
//! left operand's history untouched.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::ops::{Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign};

use log::warn;

use super::name_set::NameSet;
use crate::error::{CompatibilityWarning, Operation, Reconciled};

/// Right-hand side of a set-algebra operation.
#[derive(Debug)]
pub enum Operand<'a> {
	/// Another name-set, whose order and metric are reconciled with the left
	/// operand's.
	Set(&'a NameSet),
	/// Plain names, interpreted with the left operand's order and metric.
	Names(Vec<Cow<'a, str>>),
}

impl Operand<'_> {
	fn names(&self) -> Vec<&str> {
		match self {
			Operand::Set(set) => set.iter().map(String::as_str).collect(),
			Operand::Names(names) => names.iter().map(AsRef::as_ref).collect(),
		}
	}
}

impl<'a> From<&'a NameSet> for Operand<'a> {
	fn from(set: &'a NameSet) -> Self {
		Operand::Set(set)
	}
}

impl<'a, S: AsRef<str>> From<&'a [S]> for Operand<'a> {
	fn from(names: &'a [S]) -> Self {
		Operand::Names(names.iter().map(|name| Cow::Borrowed(name.as_ref())).collect())
	}
}

impl<'a, S: AsRef<str>, const N: usize> From<&'a [S; N]> for Operand<'a> {
	fn from(names: &'a [S; N]) -> Self {
		Operand::from(names.as_slice())
	}
}

impl<'a, S: AsRef<str>> From<&'a Vec<S>> for Operand<'a> {
	fn from(names: &'a Vec<S>) -> Self {
		Operand::from(names.as_slice())
	}
}

impl<'a, S: AsRef<str>> From<&'a HashSet<S>> for Operand<'a> {
	fn from(names: &'a HashSet<S>) -> Self {
		Operand::Names(names.iter().map(|name| Cow::Borrowed(name.as_ref())).collect())
	}
}

impl<'a, S: AsRef<str>> From<&'a BTreeSet<S>> for Operand<'a> {
	fn from(names: &'a BTreeSet<S>) -> Self {
		Operand::Names(names.iter().map(|name| Cow::Borrowed(name.as_ref())).collect())
	}
}

impl<S: AsRef<str>> From<Vec<S>> for Operand<'_> {
	fn from(names: Vec<S>) -> Self {
		Operand::Names(names.iter().map(|name| Cow::Owned(name.as_ref().to_owned())).collect())
	}
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for Operand<'_> {
	fn from(names: [S; N]) -> Self {
		Operand::Names(names.iter().map(|name| Cow::Owned(name.as_ref().to_owned())).collect())
	}
}

impl NameSet {
	/// Warnings for every configuration mismatch between `self` and `other`.
	fn compatibility(&self, other: &NameSet, operation: Operation) -> Vec<CompatibilityWarning> {
		let mut warnings = Vec::new();
		if self.order() != other.order() {
			warnings.push(CompatibilityWarning::Order {
				operation,
				left: self.order(),
				right: other.order(),
			});
		}
		if self.length_metric() != other.length_metric() {
			warnings.push(CompatibilityWarning::LengthMetric {
				operation,
				left: self.length_metric().label().to_owned(),
				right: other.length_metric().label().to_owned(),
			});
		}
		for warning in &warnings {
			warn!("{warning}");
		}
		warnings
	}

	/// Returns `other` rebuilt with this name-set's order and metric if they
	/// differ.
	fn reconcile<'b>(&self, other: &'b NameSet) -> Cow<'b, NameSet> {
		let mut other = Cow::Borrowed(other);
		if self.order() != other.order() {
			other.to_mut().change_order(self.order());
		}
		if self.length_metric() != other.length_metric() {
			other.to_mut().change_length_metric(self.length_metric().clone());
		}
		other
	}

	/// Adds every name of `rhs`, duplicates included, merging the chains.
	pub fn sum_assign<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Vec<CompatibilityWarning> {
		match rhs.into() {
			Operand::Set(other) => {
				let warnings = self.compatibility(other, Operation::Add);
				let other = self.reconcile(other);
				self.absorb(&other);
				warnings
			}
			Operand::Names(names) => {
				let other = NameSet::new(names, self.order(), self.length_metric().clone());
				self.absorb(&other);
				Vec::new()
			}
		}
	}

	/// Removes one occurrence per name in `rhs`; names absent from `self`
	/// are ignored.
	pub fn difference_assign<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Vec<CompatibilityWarning> {
		let rhs = rhs.into();
		let warnings = match &rhs {
			Operand::Set(other) => self.compatibility(other, Operation::Subtract),
			Operand::Names(_) => Vec::new(),
		};
		for name in rhs.names() {
			self.remove_one(name);
		}
		warnings
	}

	/// Adds the names of `rhs` not yet present, then drops every duplicate.
	pub fn union_assign<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Vec<CompatibilityWarning> {
		let rhs = rhs.into();
		let warnings = match &rhs {
			Operand::Set(other) => self.compatibility(other, Operation::Union),
			Operand::Names(_) => Vec::new(),
		};
		let new_names: Vec<&str> = rhs.names().into_iter().filter(|name| !self.contains(name)).collect();
		let addition = NameSet::new(new_names, self.order(), self.length_metric().clone());
		self.absorb(&addition);
		self.remove_duplicates();
		warnings
	}

	/// Keeps, per distinct name, the smaller of the two multiplicities.
	pub fn intersection_assign<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Vec<CompatibilityWarning> {
		let rhs = rhs.into();
		let warnings = match &rhs {
			Operand::Set(other) => self.compatibility(other, Operation::Intersect),
			Operand::Names(_) => Vec::new(),
		};

		let mut available: HashMap<&str, usize> = HashMap::new();
		for name in rhs.names() {
			*available.entry(name).or_insert(0) += 1;
		}
		let shared: Vec<String> = self
			.iter()
			.filter(|name| match available.get_mut(name.as_str()) {
				Some(count) if *count > 0 => {
					*count -= 1;
					true
				}
				_ => false,
			})
			.cloned()
			.collect();

		self.rebuild_from(shared);
		warnings
	}

	/// `self + rhs` with the warnings raised.
	pub fn sum<'a>(&self, rhs: impl Into<Operand<'a>>) -> Reconciled<NameSet> {
		self.apply(rhs, |set, rhs| set.sum_assign(rhs))
	}

	/// `self - rhs` with the warnings raised.
	pub fn difference<'a>(&self, rhs: impl Into<Operand<'a>>) -> Reconciled<NameSet> {
		self.apply(rhs, |set, rhs| set.difference_assign(rhs))
	}

	/// `self | rhs` with the warnings raised.
	pub fn union<'a>(&self, rhs: impl Into<Operand<'a>>) -> Reconciled<NameSet> {
		self.apply(rhs, |set, rhs| set.union_assign(rhs))
	}

	/// `self & rhs` with the warnings raised.
	pub fn intersection<'a>(&self, rhs: impl Into<Operand<'a>>) -> Reconciled<NameSet> {
		self.apply(rhs, |set, rhs| set.intersection_assign(rhs))
	}

	/// Runs an in-place operation on a copy whose history is then emptied.
	fn apply<'a, R, F>(&self, rhs: R, operation: F) -> Reconciled<NameSet>
	where
		R: Into<Operand<'a>>,
		F: FnOnce(&mut NameSet, R) -> Vec<CompatibilityWarning>,
	{
		let mut result = self.clone();
		let warnings = operation(&mut result, rhs);
		result.clear_history();
		Reconciled::new(result, warnings)
	}
}

macro_rules! impl_operator {
	($op:ident, $method:ident, $named:ident, $op_assign:ident, $method_assign:ident, $named_assign:ident) => {
		impl<'a, R: Into<Operand<'a>>> $op<R> for &NameSet {
			type Output = NameSet;

			fn $method(self, rhs: R) -> NameSet {
				self.$named(rhs).into_value()
			}
		}

		impl<'a, R: Into<Operand<'a>>> $op_assign<R> for NameSet {
			fn $method_assign(&mut self, rhs: R) {
				self.$named_assign(rhs);
			}
		}
	};
}

impl_operator!(Add, add, sum, AddAssign, add_assign, sum_assign);
impl_operator!(Sub, sub, difference, SubAssign, sub_assign, difference_assign);
impl_operator!(BitOr, bitor, union, BitOrAssign, bitor_assign, union_assign);
impl_operator!(BitAnd, bitand, intersection, BitAndAssign, bitand_assign, intersection_assign);
