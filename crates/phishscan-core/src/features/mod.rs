//! The 30 phishing heuristics.
//!
//! Evaluators are grouped by data source: [`lexical`] reads only the parsed
//! URL, [`network`] reads registry/DNS/search results, [`content`] reads the
//! shared page snapshot. Each returns an [`Evaluation`] tagged as computed or
//! fallback; fallback values come from one table, [`Feature::fallback`].

pub mod content;
pub mod lexical;
pub mod network;
mod signal;
mod vector;

pub use signal::{Evaluation, Feature, Signal};
pub use vector::FeatureVector;
