use std::fs;
use std::path::Path;

use crate::schema::compression::{Compression, inflate};
use crate::schema::{Result, SchemaError};

/// Ordered list of type-description strings, one per remote type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
	entries: Vec<Box<str>>,
	compression: Compression,
}

impl Catalogue {
	/// Build from explicit entries.
	pub fn new<I, S>(entries: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Box<str>>,
	{
		Self {
			entries: entries.into_iter().map(Into::into).collect(),
			compression: Compression::None,
		}
	}

	/// Split host text output into entries.
	///
	/// A line starting with a word opens an entry; indented lines and lines
	/// starting with `}` continue it. Blank lines close the current entry.
	pub fn parse(text: &str) -> Self {
		let mut entries = Vec::new();
		let mut current: Option<String> = None;

		for line in text.lines() {
			if line.trim().is_empty() {
				entries.extend(current.take());
				continue;
			}

			let continues = line.starts_with([' ', '\t']) || line.starts_with('}');
			match current.as_mut() {
				Some(entry) if continues => {
					entry.push('\n');
					entry.push_str(line);
				}
				_ => {
					entries.extend(current.take());
					current = Some(line.to_owned());
				}
			}
		}
		entries.extend(current);

		Self::new(entries)
	}

	/// Parse a JSON array of description strings.
	pub fn from_json(bytes: &[u8]) -> Result<Self> {
		let entries: Vec<String> = serde_json::from_slice(bytes)?;
		Ok(Self::new(entries))
	}

	/// Decode catalogue bytes, choosing JSON when the content opens with `[`.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		let first = bytes.iter().find(|byte| !byte.is_ascii_whitespace());
		if first == Some(&b'[') {
			return Self::from_json(bytes);
		}
		let text = std::str::from_utf8(bytes).map_err(|_| SchemaError::CatalogueNotUtf8)?;
		Ok(Self::parse(text))
	}

	/// Read a catalogue file, inflating zstd frames transparently.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let raw = fs::read(path)?;
		let (compression, bytes) = inflate(raw)?;
		let mut catalogue = Self::from_bytes(&bytes)?;
		catalogue.compression = compression;
		Ok(catalogue)
	}

	/// Entries in source order.
	pub fn entries(&self) -> &[Box<str>] {
		&self.entries
	}

	/// Compression detected by [`Catalogue::open`].
	pub fn compression(&self) -> Compression {
		self.compression
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the catalogue has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
