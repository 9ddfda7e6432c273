use std::{fs, io, path::Path};

/// Documents shorter than this after decoding carry no usable content.
const MIN_TEXT_CHARS: usize = 10;

/// Reads a plain-text document tolerating the encodings these files show
/// up in: UTF-8 (with or without BOM), UTF-16 with BOM, and Latin-1 as
/// the last resort. Returns `None` when the decoded text is too short to
/// be a document.
pub fn read_text_file(path: &Path) -> io::Result<Option<String>> {
	let bytes = fs::read(path)?;
	let text = decode(&bytes);

	if text.trim().chars().count() < MIN_TEXT_CHARS {
		return Ok(None);
	}

	Ok(Some(text))
}

fn decode(bytes: &[u8]) -> String {
	if let Some(stripped) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
		return decode_utf8_or_latin1(stripped);
	}
	if let Some(stripped) = bytes.strip_prefix(&[0xFF, 0xFE]) {
		return decode_utf16(stripped, u16::from_le_bytes);
	}
	if let Some(stripped) = bytes.strip_prefix(&[0xFE, 0xFF]) {
		return decode_utf16(stripped, u16::from_be_bytes);
	}

	decode_utf8_or_latin1(bytes)
}

fn decode_utf8_or_latin1(bytes: &[u8]) -> String {
	match std::str::from_utf8(bytes) {
		Ok(text) => text.to_string(),
		// Latin-1 maps every byte to the code point of the same value.
		Err(_) => bytes.iter().map(|byte| *byte as char).collect(),
	}
}

fn decode_utf16(bytes: &[u8], combine: fn([u8; 2]) -> u16) -> String {
	let units: Vec<u16> =
		bytes.chunks_exact(2).map(|chunk| combine([chunk[0], chunk[1]])).collect();

	char::decode_utf16(units)
		.map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_plain_utf8() {
		assert_eq!(decode("Formación académica".as_bytes()), "Formación académica");
	}

	#[test]
	fn decodes_utf16_le_with_bom() {
		let mut bytes = vec![0xFF, 0xFE];

		for unit in "perfil técnico".encode_utf16() {
			bytes.extend_from_slice(&unit.to_le_bytes());
		}

		assert_eq!(decode(&bytes), "perfil técnico");
	}

	#[test]
	fn decodes_utf16_be_with_bom() {
		let mut bytes = vec![0xFE, 0xFF];

		for unit in "skills".encode_utf16() {
			bytes.extend_from_slice(&unit.to_be_bytes());
		}

		assert_eq!(decode(&bytes), "skills");
	}

	#[test]
	fn falls_back_to_latin1_for_invalid_utf8() {
		// "Formación" written in Latin-1: ó is a bare 0xF3 byte.
		let bytes = b"Formaci\xf3n";

		assert_eq!(decode(bytes), "Formación");
	}

	#[test]
	fn strips_utf8_bom() {
		let bytes = b"\xef\xbb\xbfperfil";

		assert_eq!(decode(bytes), "perfil");
	}
}
