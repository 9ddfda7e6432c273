use unicode_normalization::UnicodeNormalization;

/// Canonicalizes raw section text: NFKC fold (PDF extraction leaves
/// ligatures and fullwidth forms behind), lowercase, every character that
/// is not a letter, digit, or comma becomes a space, whitespace runs
/// collapse to single spaces, edges are trimmed.
pub fn normalize(text: &str) -> String {
	let folded: String = text.nfkc().collect();
	let mut cleaned = String::with_capacity(folded.len());

	for ch in folded.chars() {
		if ch.is_alphanumeric() {
			for lower in ch.to_lowercase() {
				cleaned.push(lower);
			}
		} else if ch == ',' {
			cleaned.push(ch);
		} else {
			cleaned.push(' ');
		}
	}

	let mut out = String::with_capacity(cleaned.len());

	for token in cleaned.split_whitespace() {
		if !out.is_empty() {
			out.push(' ');
		}

		out.push_str(token);
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lowercases_and_strips_punctuation() {
		assert_eq!(normalize("Backend Engineer (Python/Rust)!"), "backend engineer python rust");
	}

	#[test]
	fn keeps_accented_latin_letters_and_commas() {
		assert_eq!(normalize("Formación: ingeniería, diseño"), "formación ingeniería, diseño");
	}

	#[test]
	fn collapses_whitespace_runs_including_newlines() {
		assert_eq!(normalize("a\n\n  b\t c"), "a b c");
	}

	#[test]
	fn empty_input_yields_empty_output() {
		assert_eq!(normalize(""), "");
		assert_eq!(normalize("  \n\t "), "");
	}

	#[test]
	fn folds_compatibility_forms() {
		assert_eq!(normalize("ｏｆｆｉｃｅ ﬁle"), "office file");
	}
}
