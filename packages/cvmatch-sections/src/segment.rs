use cvmatch_domain::SectionKind;

use crate::patterns::PatternSet;

/// A detected section: a contiguous byte span over the raw document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionSpan {
	pub kind: SectionKind,
	pub start: usize,
	pub end: usize,
}

impl SectionSpan {
	pub fn text_in<'a>(&self, raw_text: &'a str) -> &'a str {
		raw_text.get(self.start..self.end).unwrap_or("")
	}
}

/// Locates the ordered set of labeled sections in a raw document.
///
/// Each section's start is the first occurrence of any of its keyword
/// alternatives in the lower-cased text; sections with no match are
/// omitted. Surviving starts are stable-sorted ascending, so two sections
/// matching at the same offset keep pattern-declaration order (the first
/// ends up as a zero-length span). Every span ends where the next begins
/// and the last runs to end of document. Returns an empty list when no
/// pattern matches anywhere.
pub fn segment(raw_text: &str, patterns: &PatternSet) -> Vec<SectionSpan> {
	let lowered = raw_text.to_lowercase();
	let mut starts: Vec<(SectionKind, usize)> = Vec::new();

	for pattern in patterns.iter() {
		if let Some(start) = pattern.first_match(&lowered) {
			starts.push((pattern.kind, start));
		}
	}

	if starts.is_empty() {
		return Vec::new();
	}

	starts.sort_by_key(|(_, start)| *start);

	let mut spans = Vec::with_capacity(starts.len());

	for (idx, (kind, start)) in starts.iter().enumerate() {
		let end = starts.get(idx + 1).map(|(_, next)| *next).unwrap_or(raw_text.len());

		spans.push(SectionSpan { kind: *kind, start: *start, end });
	}

	spans
}
