use std::sync::LazyLock;

use regex::Regex;

use cvmatch_domain::SectionKind;

/// Keyword alternation locating one section's first occurrence.
pub struct SectionPattern {
	pub kind: SectionKind,
	regex: Option<Regex>,
}

impl SectionPattern {
	fn new(kind: SectionKind, pattern: &str) -> Self {
		let regex = match Regex::new(pattern) {
			Ok(regex) => Some(regex),
			Err(err) => {
				tracing::error!(
					section = kind.as_str(),
					error = %err,
					"Section pattern failed to compile.",
				);

				None
			},
		};

		Self { kind, regex }
	}

	/// Byte offset of the leftmost occurrence of any alternative.
	pub fn first_match(&self, lowered: &str) -> Option<usize> {
		self.regex.as_ref().and_then(|regex| regex.find(lowered)).map(|found| found.start())
	}
}

/// The ordered patterns searched for one document side. Declaration order
/// is the tie-breaker when two sections start at the same offset.
pub struct PatternSet {
	patterns: Vec<SectionPattern>,
}

impl PatternSet {
	fn new(entries: &[(SectionKind, &str)]) -> Self {
		Self {
			patterns: entries
				.iter()
				.map(|(kind, pattern)| SectionPattern::new(*kind, pattern))
				.collect(),
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = &SectionPattern> {
		self.patterns.iter()
	}
}

// The CV vocabularies deliberately overlap (e.g. "experiencia" appears in
// both the profile and experience alternations); first match wins and ties
// keep declaration order.
static CV_PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
	PatternSet::new(&[
		(
			SectionKind::Profile,
			r"datos\s+personales|información\s+personal|perfil|sobre\s+mi|acerca\s+de\s+mi|experiencia|habilidad|competencia|capacidad|aptitud|conocimiento",
		),
		(SectionKind::Education, r"educación|formación|estudios|certificaciones|cursos"),
		(
			SectionKind::Experience,
			r"experiencia|experiencia\s+laboral|experiencia\s+profesional",
		),
		(
			SectionKind::Skills,
			r"habilidades|competencias|capacidades|aptitudes|conocimientos|skills|stack|tecnologías",
		),
	])
});

static JD_PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
	PatternSet::new(&[
		(
			SectionKind::Description,
			r"sobre el rol|descripción del puesto|acerca del rol|oportunidad laboral|acerca de la posición|descripción|sobre nosotros|buscamos|búsqueda|busqueda|oportunidad",
		),
		(
			SectionKind::Responsibilities,
			r"responsabilidades|funciones|tareas|actividades|lo que harás|objetivos|responsabilidades clave|objetivo",
		),
		(
			SectionKind::Education,
			r"formación|académica|académicos|educación|estudios|certificación|certificaciones|profesional|perfil|experiencia requerida",
		),
		(
			SectionKind::Skills,
			r"habilidades|competencias|conocimientos|skills|competencias clave|certificaciones|tecnologías|herramientas|lenguajes|sistemas|stack",
		),
	])
});

/// Résumé-side vocabulary (held experience, owned skills).
pub fn cv_patterns() -> &'static PatternSet {
	&CV_PATTERNS
}

/// Job-posting-side vocabulary (required experience, requested skills).
pub fn jd_patterns() -> &'static PatternSet {
	&JD_PATTERNS
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cv_profile_pattern_matches_experience_vocabulary_too() {
		let lowered = "experiencia laboral en banca";
		let profile = cv_patterns().iter().find(|p| p.kind == SectionKind::Profile).unwrap();
		let experience =
			cv_patterns().iter().find(|p| p.kind == SectionKind::Experience).unwrap();

		assert_eq!(profile.first_match(lowered), Some(0));
		assert_eq!(experience.first_match(lowered), Some(0));
	}

	#[test]
	fn first_match_is_leftmost_across_alternatives() {
		let skills = jd_patterns().iter().find(|p| p.kind == SectionKind::Skills).unwrap();

		// "conocimientos" appears before "skills"; leftmost wins.
		assert_eq!(skills.first_match("conocimientos y skills"), Some(0));
	}
}
