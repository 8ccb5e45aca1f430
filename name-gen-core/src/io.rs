use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

/// Appends `.txt` to a path that has no extension.
///
/// Example:
/// `data/elves` → `data/elves.txt`, `data/elves.csv` is kept as is
pub(crate) fn with_default_extension(path: &Path) -> Cow<'_, Path> {
	if path.extension().is_some() {
		Cow::Borrowed(path)
	} else {
		let mut owned = PathBuf::from(path);
		owned.set_extension("txt");
		Cow::Owned(owned)
	}
}

/// Decodes bytes as UTF-8, falling back to latin-1.
///
/// Spreadsheet exports are often latin-1; every byte maps to the code point
/// of the same value, so the fallback never fails.
fn decode(bytes: Vec<u8>) -> String {
	match String::from_utf8(bytes) {
		Ok(text) => text,
		Err(error) => {
			warn!("names are not valid UTF-8, falling back to latin-1; some symbols may be wrong");
			error.into_bytes().into_iter().map(char::from).collect()
		}
	}
}

/// Reads a text file with one name per line.
///
/// - Assumes a `.txt` extension when none is given
/// - Strips newlines, carriage returns and tabs from both ends of each line
pub fn read_names<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<String>> {
	let path = with_default_extension(path.as_ref());
	let text = decode(fs::read(&path)?);
	Ok(text
		.lines()
		.map(|line| line.trim_matches(['\n', '\r', '\t']).to_owned())
		.collect())
}
