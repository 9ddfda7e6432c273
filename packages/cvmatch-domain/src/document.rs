use serde::{Deserialize, Serialize};

/// One semantic kind of document section. CV documents carry the first
/// four, JD documents the last two plus education and skills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
	Profile,
	Experience,
	Education,
	Skills,
	Description,
	Responsibilities,
}

impl SectionKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Profile => "profile",
			Self::Experience => "experience",
			Self::Education => "education",
			Self::Skills => "skills",
			Self::Description => "description",
			Self::Responsibilities => "responsibilities",
		}
	}
}

/// Which of the two embedding encoders a section is embedded with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncoderKind {
	Short,
	Long,
}

impl EncoderKind {
	/// Vector width is a property of the encoder, not of the input.
	pub const fn dimensions(self) -> usize {
		match self {
			Self::Short => 384,
			Self::Long => 768,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Short => "short",
			Self::Long => "long",
		}
	}
}

/// One CV-field-to-JD-field association scored with a single encoder.
#[derive(Clone, Copy, Debug)]
pub struct MappedPair {
	pub cv: SectionKind,
	pub jd: SectionKind,
	pub encoder: EncoderKind,
}

impl MappedPair {
	/// Composite key used for score weights and persisted section scores.
	pub fn key(&self) -> String {
		format!("{}_{}", self.cv.as_str(), self.jd.as_str())
	}
}

/// The fixed CV -> JD section bijection. Short-text sections (profile,
/// skills) embed with the short encoder, narrative sections with the long
/// one; the JD side always inherits the mapped CV field's encoder.
pub const MAPPED_PAIRS: [MappedPair; 4] = [
	MappedPair {
		cv: SectionKind::Profile,
		jd: SectionKind::Description,
		encoder: EncoderKind::Short,
	},
	MappedPair {
		cv: SectionKind::Experience,
		jd: SectionKind::Responsibilities,
		encoder: EncoderKind::Long,
	},
	MappedPair { cv: SectionKind::Education, jd: SectionKind::Education, encoder: EncoderKind::Long },
	MappedPair { cv: SectionKind::Skills, jd: SectionKind::Skills, encoder: EncoderKind::Short },
];

/// Structured record extracted from a résumé. Every field is always
/// present; sections the segmenter never found extract to "".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CvDocument {
	pub profile: String,
	pub experience: String,
	pub education: String,
	pub skills: String,
}

impl CvDocument {
	pub fn field(&self, kind: SectionKind) -> Option<&str> {
		match kind {
			SectionKind::Profile => Some(&self.profile),
			SectionKind::Experience => Some(&self.experience),
			SectionKind::Education => Some(&self.education),
			SectionKind::Skills => Some(&self.skills),
			_ => None,
		}
	}
}

/// Structured record extracted from a job description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JdDocument {
	pub description: String,
	pub responsibilities: String,
	pub education: String,
	pub skills: String,
}

impl JdDocument {
	pub fn field(&self, kind: SectionKind) -> Option<&str> {
		match kind {
			SectionKind::Description => Some(&self.description),
			SectionKind::Responsibilities => Some(&self.responsibilities),
			SectionKind::Education => Some(&self.education),
			SectionKind::Skills => Some(&self.skills),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mapped_pairs_cover_every_cv_field_once() {
		let keys: Vec<String> = MAPPED_PAIRS.iter().map(MappedPair::key).collect();

		assert_eq!(keys, vec![
			"profile_description",
			"experience_responsibilities",
			"education_education",
			"skills_skills",
		]);
	}

	#[test]
	fn encoder_dimensions_are_fixed_per_kind() {
		assert_eq!(EncoderKind::Short.dimensions(), 384);
		assert_eq!(EncoderKind::Long.dimensions(), 768);
	}

	#[test]
	fn jd_side_inherits_the_cv_fields_encoder() {
		for pair in MAPPED_PAIRS {
			match pair.cv {
				SectionKind::Profile | SectionKind::Skills =>
					assert_eq!(pair.encoder, EncoderKind::Short),
				_ => assert_eq!(pair.encoder, EncoderKind::Long),
			}
		}
	}

	#[test]
	fn cv_document_rejects_jd_only_fields() {
		let cv = CvDocument::default();

		assert!(cv.field(SectionKind::Description).is_none());
		assert!(cv.field(SectionKind::Profile).is_some());
	}

	#[test]
	fn documents_serialize_with_snake_case_keys() {
		let jd = JdDocument {
			description: "a".to_string(),
			responsibilities: "b".to_string(),
			education: "c".to_string(),
			skills: "d".to_string(),
		};
		let json = serde_json::to_value(&jd).unwrap();

		assert_eq!(json["responsibilities"], "b");
	}
}
