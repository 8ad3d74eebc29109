use std::io::Read;

use crate::schema::{Result, SchemaError};

/// Upper bound for an inflated catalogue.
const MAX_CATALOGUE_BYTES: usize = 64 * 1024 * 1024;
/// zstd frame magic.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression detected on a catalogue file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
	/// Plain text or JSON.
	#[default]
	None,
	/// Single zstd frame.
	Zstd,
}

impl Compression {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Inflate `raw` when it opens with a zstd frame; other bytes pass through.
pub(crate) fn inflate(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	inflate_with_limit(raw, MAX_CATALOGUE_BYTES)
}

fn inflate_with_limit(raw: Vec<u8>, limit: usize) -> Result<(Compression, Vec<u8>)> {
	if !raw.starts_with(&ZSTD_MAGIC) {
		return Ok((Compression::None, raw));
	}

	let decoder = zstd::stream::read::Decoder::new(raw.as_slice())?;
	let mut out = Vec::new();
	// One byte past the limit is enough to tell an oversized frame apart.
	decoder.take(limit as u64 + 1).read_to_end(&mut out)?;
	if out.len() > limit {
		return Err(SchemaError::DecompressedTooLarge { limit });
	}

	tracing::debug!(packed = raw.len(), inflated = out.len(), "inflated zstd catalogue");
	Ok((Compression::Zstd, out))
}
