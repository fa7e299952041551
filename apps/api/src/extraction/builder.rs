//! CV record assembly — wires the extraction stages together.

use crate::extraction::languages::detect_languages;
use crate::extraction::normalize::TextNormalizer;
use crate::extraction::sections::segment;
use crate::extraction::skills::normalize_skills;
use crate::models::cv::CvRecord;
use crate::taxonomy::TaxonomyLookup;

/// Builds a structured CV record from raw résumé text.
///
/// Normalize → segment → normalize skills → detect languages. Degenerate
/// input (empty or heading-free text) yields an empty-but-valid record, not
/// an error. The embedding vector is not computed here; the caller requests
/// it from the embedding service and attaches it when persisting.
pub async fn build_cv_record(
    text: &str,
    email: Option<String>,
    taxonomy: &dyn TaxonomyLookup,
) -> CvRecord {
    let normalized = TextNormalizer::new().normalize(text);
    let segmented = segment(&normalized);
    let skills = normalize_skills(&segmented.skills, taxonomy).await;
    let languages = detect_languages(&normalized);

    CvRecord {
        email,
        education: segmented.education,
        experience: segmented.experience,
        skills,
        languages,
    }
}
