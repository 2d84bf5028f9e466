//! CLI command handlers, one per file.

mod batch;
mod completions;
mod extract;
mod features;

pub use batch::run_batch;
pub use completions::run_completions;
pub use extract::run_extract;
pub use features::run_features;
