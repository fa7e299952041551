// Recommendation engine: cosine ranking over stored and freshly-embedded
// vectors. All index/catalog/embedding access goes through the AppState
// trait handles.

pub mod handlers;
pub mod orchestrator;
pub mod ranker;
