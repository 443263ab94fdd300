// src/models/mod.rs
pub mod listing;
pub mod matching;

pub use listing::{ExternalListing, InternalListing};
pub use matching::{MatchCandidate, MatchResult, MatchedPair};
