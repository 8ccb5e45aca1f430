//! Clean-up of scraped training data.
//!
//! Name lists copied from the web often carry markers such as `*`, `†` or
//! footnote brackets around the names, and blank lines. These helpers never
//! modify their input; they return new lists.

/// Strips non-alphanumeric characters from both ends of `name`.
///
/// Symbols between alphanumeric characters are kept:
/// `"? Test-string 2!"` becomes `"Test-string 2"`.
pub fn strip_non_alnum(name: &str) -> &str {
	name.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Applies [`strip_non_alnum`] to every name.
pub fn clean_extra_symbols<I, S>(names: I) -> Vec<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	names
		.into_iter()
		.map(|name| strip_non_alnum(name.as_ref()).to_owned())
		.collect()
}

/// Drops names made only of symbols (or empty), and names in `blank_names`.
pub fn clean_blanks<I, S>(names: I, blank_names: &[&str]) -> Vec<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	names
		.into_iter()
		.filter(|name| {
			let name = name.as_ref();
			!strip_non_alnum(name).is_empty() && !blank_names.contains(&name)
		})
		.map(|name| name.as_ref().to_owned())
		.collect()
}

/// Strips surrounding symbols, then drops blank names.
pub fn clean<I, S>(names: I) -> Vec<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	clean_blanks(clean_extra_symbols(names), &[])
}
