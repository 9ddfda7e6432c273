use std::{
	collections::BTreeMap,
	fs, io,
	path::{Path, PathBuf},
};

use serde::Serialize;

use cvmatch_config::Config;
use cvmatch_domain::{CvDocument, MatchTier};
use cvmatch_sections::{Extraction, extract_cv, extract_jd};
use cvmatch_service::MatchService;
use cvmatch_storage::ComparisonRecord;

use crate::read::read_text_file;

/// Walks the data directories, extracts every document, compares every CV
/// against every JD, persists both artifacts, and prints ranked results.
pub async fn run(config: Config) -> color_eyre::Result<()> {
	let extracted_dir = config.runner.output_dir.join("extracted");
	let scores_dir = config.runner.output_dir.join("scores");
	let cv_dir = config.runner.cv_dir.clone();
	let jd_dir = config.runner.jd_dir.clone();

	let cvs = process_documents(&cv_dir, &extracted_dir, "cv", extract_cv)?;
	let jds = process_documents(&jd_dir, &extracted_dir, "jd", extract_jd)?;

	if cvs.is_empty() || jds.is_empty() {
		tracing::warn!(cvs = cvs.len(), jds = jds.len(), "Not enough documents to compare.");

		return Ok(());
	}

	tracing::info!(cvs = cvs.len(), jds = jds.len(), "Starting comparisons.");

	let service = MatchService::new(config);
	let mut by_jd: BTreeMap<String, Vec<ComparisonRecord>> = BTreeMap::new();

	for (cv_name, cv) in &cvs {
		for (jd_name, jd) in &jds {
			let comparison = service.compare(cv, jd).await?;
			let record = ComparisonRecord {
				cv_name: cv_name.clone(),
				jd_name: jd_name.clone(),
				scores: comparison.section_scores,
				total_score: comparison.total_score,
			};

			cvmatch_storage::write_comparison(&scores_dir, &record)?;
			tracing::info!(
				cv = %record.cv_name,
				jd = %record.jd_name,
				score = record.total_score,
				"Comparison complete.",
			);

			by_jd.entry(jd_name.clone()).or_default().push(record);
		}
	}

	for records in by_jd.values_mut() {
		records.sort_by(|a, b| {
			b.total_score.partial_cmp(&a.total_score).unwrap_or(std::cmp::Ordering::Equal)
		});
	}

	print_results(&by_jd);
	log_best_matches(&scores_dir, &cvs)?;

	Ok(())
}

fn process_documents<D, F>(
	dir: &Path,
	extracted_dir: &Path,
	kind: &'static str,
	extract: F,
) -> color_eyre::Result<Vec<(String, D)>>
where
	D: Serialize,
	F: Fn(&str) -> Extraction<D>,
{
	let mut documents = Vec::new();

	for path in text_files(dir)? {
		let Some(raw) = read_text_file(&path)? else {
			tracing::warn!(kind, path = %path.display(), "Skipping unreadable or empty file.");

			continue;
		};
		let stem = file_stem(&path);
		let extraction = extract(&raw);

		if extraction.used_fallback {
			tracing::warn!(kind, name = %stem, "Extraction used heuristic fallbacks.");
		}

		cvmatch_storage::write_document(extracted_dir, &stem, &extraction.document)?;
		tracing::info!(kind, name = %stem, "Document processed.");

		documents.push((stem, extraction.document));
	}

	Ok(documents)
}

fn text_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
	let mut paths = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.extension().and_then(|ext| ext.to_str()) == Some("txt") {
			paths.push(path);
		}
	}

	paths.sort();

	Ok(paths)
}

fn file_stem(path: &Path) -> String {
	path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("document").to_string()
}

fn print_results(by_jd: &BTreeMap<String, Vec<ComparisonRecord>>) {
	println!();
	println!("{}", "=".repeat(50));
	println!(" CV-JD MATCH RESULTS");
	println!("{}", "=".repeat(50));

	for (jd_name, records) in by_jd {
		println!();
		println!("JD: {jd_name}");
		println!("{}", "-".repeat(jd_name.len() + 4));

		for (rank, record) in records.iter().enumerate() {
			let tier = MatchTier::classify(record.total_score);

			println!("  #{} CV: {}", rank + 1, record.cv_name);
			println!("     Score: {:.1}% | Tier: {}", record.total_score * 100.0, tier.as_str());
			println!("     Section scores:");

			for (section, score) in &record.scores {
				println!("     - {section}: {:.1}%", score * 100.0);
			}

			println!();
		}
	}
}

fn log_best_matches(scores_dir: &Path, cvs: &[(String, CvDocument)]) -> color_eyre::Result<()> {
	for (cv_name, _) in cvs {
		if let Some(best) = cvmatch_storage::best_match_for(scores_dir, cv_name)? {
			tracing::info!(cv = %cv_name, jd = %best.jd_name, score = best.total_score, "Best match.");
		}
	}

	Ok(())
}
