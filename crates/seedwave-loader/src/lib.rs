pub mod loader;
pub mod model;

pub use loader::BulkLoader;
pub use model::{BatchFailure, LoadSummary};
