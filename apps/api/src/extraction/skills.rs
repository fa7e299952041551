//! Skill normalization — resolves raw skill tokens against the external
//! taxonomy, with a keyword-table fallback when the oracle finds nothing.

use std::collections::BTreeSet;

use tracing::warn;

use crate::taxonomy::TaxonomyLookup;

/// Category keyword table used when the taxonomy yields no matches for the
/// whole batch. Phrases are matched as substrings of the case-folded,
/// concatenated token text; a match contributes its title-cased form.
const FALLBACK_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "it",
        &[
            "python",
            "java",
            "javascript",
            "typescript",
            "sql",
            "docker",
            "kubernetes",
            "linux",
            "aws",
            "react",
            "machine learning",
            "data analysis",
        ],
    ),
    (
        "marketing",
        &[
            "seo",
            "content marketing",
            "social media",
            "branding",
            "google ads",
            "email marketing",
        ],
    ),
    (
        "finance",
        &[
            "accounting",
            "financial analysis",
            "auditing",
            "taxation",
            "bookkeeping",
            "budgeting",
        ],
    ),
    (
        "management",
        &[
            "project management",
            "leadership",
            "agile",
            "scrum",
            "operations",
            "stakeholder management",
        ],
    ),
    (
        "engineering",
        &[
            "autocad",
            "solidworks",
            "matlab",
            "cad",
            "circuit design",
            "quality control",
        ],
    ),
    (
        "design",
        &[
            "photoshop",
            "illustrator",
            "figma",
            "ui design",
            "ux design",
            "graphic design",
        ],
    ),
    (
        "sales",
        &[
            "negotiation",
            "crm",
            "salesforce",
            "lead generation",
            "b2b sales",
            "cold calling",
        ],
    ),
    (
        "medicine",
        &[
            "patient care",
            "nursing",
            "clinical research",
            "pharmacology",
            "first aid",
        ],
    ),
    (
        "education",
        &[
            "teaching",
            "curriculum",
            "lesson planning",
            "classroom management",
            "tutoring",
        ],
    ),
    (
        "law",
        &[
            "legal research",
            "litigation",
            "contract law",
            "compliance",
            "due diligence",
        ],
    ),
];

/// Resolves raw skill tokens to canonical titles.
///
/// Every token is offered to the taxonomy; a failed lookup is logged and
/// counts as "no matches" for that token without aborting the batch. The
/// keyword fallback runs only when the oracle produced nothing for the
/// entire batch — all-or-nothing, never per token.
pub async fn normalize_skills(
    tokens: &[String],
    taxonomy: &dyn TaxonomyLookup,
) -> BTreeSet<String> {
    let mut canonical = BTreeSet::new();

    for token in tokens {
        match taxonomy.lookup(token).await {
            Ok(titles) => canonical.extend(titles),
            Err(e) => warn!("Taxonomy lookup failed for {token:?}: {e}"),
        }
    }

    if canonical.is_empty() {
        return fallback_skills(tokens);
    }
    canonical
}

/// Batch-level keyword fallback over the fixed category table.
pub fn fallback_skills(tokens: &[String]) -> BTreeSet<String> {
    let haystack = tokens.join(" ").to_lowercase();

    let mut matched = BTreeSet::new();
    for (_category, phrases) in FALLBACK_KEYWORDS {
        for phrase in *phrases {
            if haystack.contains(phrase) {
                matched.insert(title_case(phrase));
            }
        }
    }
    matched
}

/// "machine learning" -> "Machine Learning".
fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{TaxonomyError, TaxonomyLookup};
    use async_trait::async_trait;

    /// Oracle that finds nothing, ever.
    struct EmptyOracle;

    #[async_trait]
    impl TaxonomyLookup for EmptyOracle {
        async fn lookup(&self, _term: &str) -> Result<Vec<String>, TaxonomyError> {
            Ok(vec![])
        }
    }

    /// Oracle that fails every lookup.
    struct FailingOracle;

    #[async_trait]
    impl TaxonomyLookup for FailingOracle {
        async fn lookup(&self, _term: &str) -> Result<Vec<String>, TaxonomyError> {
            Err(TaxonomyError::Api {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    /// Oracle that resolves "python" and fails on everything else.
    struct PythonOnlyOracle;

    #[async_trait]
    impl TaxonomyLookup for PythonOnlyOracle {
        async fn lookup(&self, term: &str) -> Result<Vec<String>, TaxonomyError> {
            if term == "python" {
                Ok(vec!["Python (computer programming)".to_string()])
            } else {
                Err(TaxonomyError::Api {
                    status: 500,
                    message: "boom".to_string(),
                })
            }
        }
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_fallback_triggers_only_when_whole_batch_empty() {
        let result = normalize_skills(&tokens(&["python", "docker"]), &EmptyOracle).await;
        assert_eq!(
            result,
            BTreeSet::from(["Python".to_string(), "Docker".to_string()])
        );
    }

    #[tokio::test]
    async fn test_no_fallback_when_any_token_resolves() {
        let result = normalize_skills(&tokens(&["python", "docker"]), &PythonOnlyOracle).await;
        // "docker" failed and was swallowed; the batch still has a match,
        // so the fallback table never runs.
        assert_eq!(
            result,
            BTreeSet::from(["Python (computer programming)".to_string()])
        );
    }

    #[tokio::test]
    async fn test_lookup_failures_swallowed_then_fallback() {
        let result = normalize_skills(&tokens(&["python"]), &FailingOracle).await;
        assert_eq!(result, BTreeSet::from(["Python".to_string()]));
    }

    #[tokio::test]
    async fn test_empty_tokens_yield_empty_set() {
        let result = normalize_skills(&[], &EmptyOracle).await;
        assert!(result.is_empty());
    }

    #[test]
    fn test_fallback_matches_multi_word_phrases() {
        let result = fallback_skills(&tokens(&["Machine Learning", "project management"]));
        assert_eq!(
            result,
            BTreeSet::from([
                "Machine Learning".to_string(),
                "Project Management".to_string()
            ])
        );
    }

    #[test]
    fn test_fallback_unknown_tokens_yield_empty_set() {
        assert!(fallback_skills(&tokens(&["underwater basket weaving"])).is_empty());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("python"), "Python");
        assert_eq!(title_case("machine learning"), "Machine Learning");
    }
}
