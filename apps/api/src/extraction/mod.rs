// CV information-extraction pipeline.
// Normalize -> segment -> skill normalization -> language detection.
// Taxonomy lookups go through the TaxonomyLookup handle — no direct HTTP here.

pub mod builder;
pub mod handlers;
pub mod languages;
pub mod normalize;
pub mod sections;
pub mod skills;
