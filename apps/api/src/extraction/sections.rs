//! Section segmentation — splits normalized CV text into labeled sections.

use std::collections::HashSet;

/// A heading containing one of these ends the current section; the rest of
/// the document is dropped until a known section heading appears.
const STOP_KEYWORDS: &[&str] = &[
    "interests",
    "references",
    "objective",
    "summary",
    "certification",
];

const EDUCATION_KEYWORDS: &[&str] = &["education"];
const EXPERIENCE_KEYWORDS: &[&str] = &["experience", "experiences", "work"];
const SKILL_KEYWORDS: &[&str] = &["skill", "skills"];

/// Minimum length of a skill token after trimming.
const MIN_SKILL_TOKEN_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Education,
    Experience,
    Skills,
}

/// Output of segmentation: deduplicated, insertion-ordered entries per
/// section. Skill lines are already split into tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentedCv {
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub skills: Vec<String>,
}

/// Splits normalized text into education/experience/skills entries.
///
/// Works line by line with a current-section state. Heading detection is
/// substring-based on a lowercased, punctuation-stripped form of the line;
/// heading lines are consumed, never stored. Keyword classes are checked in
/// a fixed order — stop, education, experience, skills — so a line matching
/// several classes resolves deterministically to the first.
pub fn segment(text: &str) -> SegmentedCv {
    let mut current = Section::None;
    let mut education = Vec::new();
    let mut experience = Vec::new();
    let mut skill_lines = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let comparison = comparison_form(trimmed);

        if contains_any(&comparison, STOP_KEYWORDS) {
            current = Section::None;
        } else if contains_any(&comparison, EDUCATION_KEYWORDS) {
            current = Section::Education;
        } else if contains_any(&comparison, EXPERIENCE_KEYWORDS) {
            current = Section::Experience;
        } else if contains_any(&comparison, SKILL_KEYWORDS) {
            current = Section::Skills;
        } else {
            match current {
                Section::None => {} // outside any known section
                Section::Education => education.push(trimmed.to_string()),
                Section::Experience => experience.push(trimmed.to_string()),
                Section::Skills => skill_lines.push(trimmed.to_string()),
            }
        }
    }

    SegmentedCv {
        education: dedup_preserving_order(education),
        experience: dedup_preserving_order(experience),
        skills: dedup_preserving_order(tokenize_skills(&skill_lines)),
    }
}

/// Lowercases and strips everything but word characters and whitespace, so
/// "Education:" and "EDUCATION" compare equal.
fn comparison_form(line: &str) -> String {
    line.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

/// Skill lines hold comma/period-separated inventories; split them into
/// trimmed tokens and drop fragments shorter than `MIN_SKILL_TOKEN_LEN`.
fn tokenize_skills(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| line.split([',', '.', '\n']))
        .map(str::trim)
        .filter(|token| token.chars().count() >= MIN_SKILL_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

fn dedup_preserving_order(entries: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}
