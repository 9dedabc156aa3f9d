pub mod batch;
pub mod error;
pub mod generator;
pub mod identity;
pub mod model;

pub use batch::into_batches;
pub use error::GeneratorError;
pub use generator::{GenerationMode, ReadingGenerator};
pub use identity::hash_seed;
pub use model::{Reading, TemperatureRange};
