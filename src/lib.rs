// src/lib.rs
pub mod error;
pub mod matching;
pub mod models;
pub mod reconciliation;
pub mod sources;
pub mod utils;

pub use error::{ReconError, SourceKind};
pub use matching::matcher::{match_listings, GreedyMatcher, ListingMatcher};
pub use matching::name::normalize_name;
pub use matching::similarity::{similarity, SimilarityScorer};
pub use reconciliation::report::{build_report, ReconciliationStatus, Report, SourceWarnings};
pub use reconciliation::service::ReconciliationService;
