//! phishscan core: turns one URL into the 30-signal phishing feature vector.
//!
//! Entry point is [`extractor::Extractor`]. Network access goes through the
//! collaborator traits in [`fetch`], [`registry`] and [`dns`].

pub mod config;
pub mod logging;

pub mod dns;
pub mod error;
pub mod extractor;
pub mod features;
pub mod fetch;
pub mod page;
pub mod registry;
pub mod search;
pub mod url_model;

pub use error::{ExtractError, UpstreamError};
pub use extractor::{Collaborators, ExtractionReport, Extractor};
pub use features::{Feature, FeatureVector, Signal};
