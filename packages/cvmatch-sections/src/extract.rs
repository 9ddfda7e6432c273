use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

use cvmatch_domain::{CvDocument, JdDocument, SectionKind, normalize};

use crate::{
	patterns::{cv_patterns, jd_patterns},
	segment::{SectionSpan, segment},
};

const FREE_TEXT_TOKEN_LIMIT: usize = 200;
const FALLBACK_LINE_LIMIT: usize = 5;
const SHORT_LINE_TOKEN_LIMIT: usize = 5;
const BULLET_PREFIXES: [char; 3] = ['-', '•', '*'];

static YEAR_PATTERN: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").ok());

const CV_EDUCATION_KEYWORDS: &[&str] = &[
	"licenciatura",
	"licenciado",
	"ingeniero",
	"ingeniería",
	"técnico",
	"máster",
	"master",
	"doctorado",
	"phd",
	"grado",
	"bachiller",
	"profesional",
	"maestría",
	"diplomado",
	"curso",
	"certificación",
	"certificado",
	"formación",
	"especialización",
	"postgrado",
];

const JD_EDUCATION_KEYWORDS: &[&str] = &[
	"ingeniería",
	"licenciatura",
	"título",
	"grado",
	"carrera",
	"universitario",
	"técnico",
	"profesional",
	"maestría",
	"máster",
	"doctorado",
	"postgrado",
	"certificación",
	"diplomado",
];

const POSITION_KEYWORDS: &[&str] = &[
	"director",
	"gerente",
	"jefe",
	"coordinador",
	"supervisor",
	"analista",
	"desarrollador",
	"ingeniero",
	"técnico",
	"asistente",
	"consultor",
	"encargado",
	"responsable",
];

const TASK_VERBS: &[&str] = &[
	"desarrollar",
	"diseñar",
	"implementar",
	"crear",
	"gestionar",
	"administrar",
	"coordinar",
	"mantener",
	"analizar",
];

// Entries that normalization makes unmatchable ("c++", "node.js") are kept
// for vocabulary completeness; they only ever miss.
const TECHNICAL_SKILLS: &[&str] = &[
	"java",
	"python",
	"c++",
	"javascript",
	"html",
	"css",
	"sql",
	"php",
	"ruby",
	"excel",
	"word",
	"powerpoint",
	"linux",
	"windows",
	"docker",
	"aws",
	"azure",
	"office",
	"sap",
	"jira",
	"git",
	"react",
	"angular",
	"vue",
	"node.js",
	"django",
	"flask",
	"spring",
	"rest",
	"api",
	"mongodb",
	"mysql",
	"postgresql",
	"oracle",
	"databricks",
	"spark",
	"powerbi",
	"power bi",
	"tableau",
	"data warehouse",
	"etl",
	"power automate",
	"machine learning",
	"data lake",
	"big data",
	"hadoop",
	"kubernetes",
	"microservices",
	"jenkins",
	"devops",
	"agile",
	"scrum",
];

/// An extracted document plus whether any heuristic fallback fired along
/// the way, so callers can tell "parsed cleanly" from "best effort"
/// without reading logs.
#[derive(Clone, Debug)]
pub struct Extraction<D> {
	pub document: D,
	pub used_fallback: bool,
}

/// Turns raw résumé text into its structured record. Never fails: sections
/// the segmenter misses extract to empty fields.
pub fn extract_cv(raw_text: &str) -> Extraction<CvDocument> {
	let spans = segment(raw_text, cv_patterns());
	let mut used_fallback = spans.is_empty();
	let span_text = |kind| text_for(&spans, raw_text, kind);

	let profile = extract_free_text(span_text(SectionKind::Profile), false);
	let experience = extract_keyword_lines(span_text(SectionKind::Experience), POSITION_KEYWORDS, false);
	let education =
		extract_keyword_lines(span_text(SectionKind::Education), CV_EDUCATION_KEYWORDS, false);
	let skills = extract_skills(span_text(SectionKind::Skills), false);

	used_fallback |= experience.used_fallback || education.used_fallback || skills.used_fallback;

	Extraction {
		document: CvDocument {
			profile,
			experience: experience.value,
			education: education.value,
			skills: skills.value,
		},
		used_fallback,
	}
}

/// Turns raw job-posting text into its structured record. A posting with
/// no recognizable headings becomes a description-only record.
pub fn extract_jd(raw_text: &str) -> Extraction<JdDocument> {
	let spans = segment(raw_text, jd_patterns());

	if spans.is_empty() {
		tracing::debug!("No JD sections detected; treating the whole text as the description.");

		return Extraction {
			document: JdDocument {
				description: extract_free_text(raw_text, false),
				..JdDocument::default()
			},
			used_fallback: true,
		};
	}

	let span_text = |kind| text_for(&spans, raw_text, kind);

	// JD spans begin with the heading line that matched; drop it before
	// extraction when the span has more than one line.
	let description = extract_free_text(span_text(SectionKind::Description), true);
	let responsibilities = extract_responsibilities(span_text(SectionKind::Responsibilities));
	let education =
		extract_keyword_lines(span_text(SectionKind::Education), JD_EDUCATION_KEYWORDS, true);
	let skills = extract_skills(span_text(SectionKind::Skills), true);

	let used_fallback =
		responsibilities.used_fallback || education.used_fallback || skills.used_fallback;

	Extraction {
		document: JdDocument {
			description,
			responsibilities: responsibilities.value,
			education: education.value,
			skills: skills.value,
		},
		used_fallback,
	}
}

fn text_for<'a>(spans: &[SectionSpan], raw_text: &'a str, kind: SectionKind) -> &'a str {
	spans.iter().find(|span| span.kind == kind).map(|span| span.text_in(raw_text)).unwrap_or("")
}

struct FieldOutcome {
	value: String,
	used_fallback: bool,
}

impl FieldOutcome {
	fn empty() -> Self {
		Self { value: String::new(), used_fallback: false }
	}
}

/// One content line of a span: bullet prefix stripped, text normalized.
struct Line {
	bullet: bool,
	text: String,
}

fn section_lines(span_text: &str, drop_heading: bool) -> Vec<Line> {
	let mut raw_lines: Vec<&str> = span_text.trim().lines().collect();

	if drop_heading && raw_lines.len() > 1 {
		raw_lines.remove(0);
	}

	let mut lines = Vec::new();

	for raw in raw_lines {
		let trimmed = raw.trim();

		if trimmed.is_empty() {
			continue;
		}

		let bullet = trimmed.starts_with(BULLET_PREFIXES);
		let body = if bullet {
			trimmed.trim_start_matches(|ch: char| BULLET_PREFIXES.contains(&ch) || ch == ' ')
		} else {
			trimmed
		};
		let text = normalize(body);

		if text.is_empty() {
			continue;
		}

		lines.push(Line { bullet, text });
	}

	lines
}

fn body_after_heading(span_text: &str, drop_heading: bool) -> String {
	let trimmed = span_text.trim();

	if drop_heading {
		let lines: Vec<&str> = trimmed.lines().collect();

		if lines.len() > 1 {
			return lines[1..].join("\n");
		}
	}

	trimmed.to_string()
}

/// Free-text fields keep the whole normalized span, truncated to the
/// first 200 whitespace tokens.
fn extract_free_text(span_text: &str, drop_heading: bool) -> String {
	let normalized = normalize(&body_after_heading(span_text, drop_heading));
	let mut out = String::with_capacity(normalized.len());

	for token in normalized.split_whitespace().take(FREE_TEXT_TOKEN_LIMIT) {
		if !out.is_empty() {
			out.push(' ');
		}

		out.push_str(token);
	}

	out
}

/// Itemized fields keyed on a keyword allow-list or a 4-digit year. When
/// the pass misses entirely, the first non-empty lines stand in verbatim,
/// then the full normalized text.
fn extract_keyword_lines(span_text: &str, keywords: &[&str], drop_heading: bool) -> FieldOutcome {
	let trimmed = span_text.trim();

	if trimmed.is_empty() {
		return FieldOutcome::empty();
	}

	let lines = section_lines(trimmed, drop_heading);
	let items: Vec<&str> = lines
		.iter()
		.filter(|line| contains_any(&line.text, keywords) || contains_year(&line.text))
		.map(|line| line.text.as_str())
		.collect();

	if !items.is_empty() {
		return FieldOutcome { value: items.join(", "), used_fallback: false };
	}

	let fallback: Vec<&str> =
		lines.iter().take(FALLBACK_LINE_LIMIT).map(|line| line.text.as_str()).collect();

	if fallback.is_empty() {
		return FieldOutcome {
			value: normalize(&body_after_heading(trimmed, drop_heading)),
			used_fallback: true,
		};
	}

	FieldOutcome { value: fallback.join(", "), used_fallback: true }
}

/// Responsibility items are bullets or task-verb sentences; prose before
/// the first match is taken as-is.
fn extract_responsibilities(span_text: &str) -> FieldOutcome {
	let trimmed = span_text.trim();

	if trimmed.is_empty() {
		return FieldOutcome::empty();
	}

	let lines = section_lines(trimmed, true);
	let mut items: Vec<&str> = Vec::new();

	for line in &lines {
		if line.bullet || starts_with_task_verb(&line.text) {
			items.push(line.text.as_str());
		} else if items.is_empty() {
			items.push(line.text.as_str());
		}
	}

	if items.is_empty() {
		return FieldOutcome { value: normalize(&body_after_heading(trimmed, true)), used_fallback: true };
	}

	FieldOutcome { value: items.join(", "), used_fallback: false }
}

/// Skill items are bullets, lines naming a known technology, or short
/// lines. The fallback scans the vocabulary over the whole span; items
/// are deduplicated preserving first occurrence.
fn extract_skills(span_text: &str, drop_heading: bool) -> FieldOutcome {
	let trimmed = span_text.trim();

	if trimmed.is_empty() {
		return FieldOutcome::empty();
	}

	let lines = section_lines(trimmed, drop_heading);
	let mut items: Vec<String> = Vec::new();

	for line in &lines {
		if line.bullet
			|| contains_any(&line.text, TECHNICAL_SKILLS)
			|| line.text.split_whitespace().count() <= SHORT_LINE_TOKEN_LIMIT
		{
			items.push(line.text.clone());
		}
	}

	let mut used_fallback = false;

	if items.is_empty() {
		used_fallback = true;

		let normalized = normalize(&body_after_heading(trimmed, drop_heading));

		for skill in TECHNICAL_SKILLS {
			if normalized.contains(skill) {
				items.push((*skill).to_string());
			}
		}

		if items.is_empty() {
			return FieldOutcome { value: normalized, used_fallback: true };
		}
	}

	FieldOutcome { value: dedup_preserving_order(items).join(", "), used_fallback }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
	keywords.iter().any(|keyword| text.contains(keyword))
}

fn contains_year(text: &str) -> bool {
	YEAR_PATTERN.as_ref().map(|regex| regex.is_match(text)).unwrap_or(false)
}

fn starts_with_task_verb(text: &str) -> bool {
	TASK_VERBS.iter().any(|verb| {
		text.strip_prefix(verb)
			.map(|rest| rest.chars().next().map(|ch| !ch.is_alphanumeric()).unwrap_or(true))
			.unwrap_or(false)
	})
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
	let mut seen = HashSet::new();

	items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}
