use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Set of names already produced or reserved.
///
/// A `History` is a handle to a shared cell. Several name-sets holding
/// handles to the same cell form a link group: adding or clearing through any
/// handle is visible through all of them. [`History::detached`] materializes an
/// independent cell with the current contents, which is how copies and
/// unlinking sever the group.
///
/// `Clone` is deliberately not implemented, so a handle can only be shared
/// through [`History::link`].
#[derive(Default)]
pub struct History {
	names: Rc<RefCell<HashSet<String>>>,
}

impl History {
	pub fn new() -> Self {
		Self::default()
	}

	fn from_names(names: HashSet<String>) -> Self {
		Self { names: Rc::new(RefCell::new(names)) }
	}

	pub fn contains(&self, name: &str) -> bool {
		self.names.borrow().contains(name)
	}

	pub fn insert(&self, name: &str) {
		self.names.borrow_mut().insert(name.to_owned());
	}

	pub fn extend<I, S>(&self, names: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut shared = self.names.borrow_mut();
		shared.extend(names.into_iter().map(|name| name.as_ref().to_owned()));
	}

	/// Clears the shared cell, for every member of the link group.
	pub fn clear(&self) {
		self.names.borrow_mut().clear();
	}

	pub fn len(&self) -> usize {
		self.names.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.borrow().is_empty()
	}

	/// Independent copy of the current contents.
	pub fn snapshot(&self) -> HashSet<String> {
		self.names.borrow().clone()
	}

	/// New handle to a fresh cell holding the current contents.
	pub fn detached(&self) -> Self {
		Self::from_names(self.snapshot())
	}

	/// Builds one shared cell holding the union of every given history.
	///
	/// Install the returned handle (and clones made with
	/// [`History::share`]) into every member of the new link group.
	pub fn link<'a, I>(histories: I) -> Self
	where
		I: IntoIterator<Item = &'a History>,
	{
		let mut union = HashSet::new();
		for history in histories {
			union.extend(history.names.borrow().iter().cloned());
		}
		Self::from_names(union)
	}

	/// Another handle to the same cell.
	pub(crate) fn share(&self) -> Self {
		Self { names: Rc::clone(&self.names) }
	}

	/// Returns `true` if both handles point to the same cell.
	pub fn is_linked_with(&self, other: &History) -> bool {
		Rc::ptr_eq(&self.names, &other.names)
	}

	/// Number of handles currently sharing this cell.
	pub fn link_count(&self) -> usize {
		Rc::strong_count(&self.names)
	}
}

/// Histories compare by contents, not by identity.
impl PartialEq for History {
	fn eq(&self, other: &Self) -> bool {
		self.is_linked_with(other) || *self.names.borrow() == *other.names.borrow()
	}
}

impl Eq for History {}

impl fmt::Debug for History {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.names.borrow().iter()).finish()
	}
}
