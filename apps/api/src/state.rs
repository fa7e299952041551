use std::sync::Arc;

use crate::catalog::JobCatalog;
use crate::embedding::Embedder;
use crate::search::CvIndex;
use crate::taxonomy::TaxonomyLookup;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every external collaborator is carried as a trait object so tests can swap
/// in stubs and no module reaches for a process-wide singleton.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<dyn CvIndex>,
    pub embedder: Arc<dyn Embedder>,
    pub taxonomy: Arc<dyn TaxonomyLookup>,
    pub catalog: Arc<dyn JobCatalog>,
}
