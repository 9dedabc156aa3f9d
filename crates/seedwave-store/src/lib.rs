pub mod error;
pub mod mongo;
pub mod store;

pub use error::StoreError;
pub use mongo::{MongoReadingStore, MongoSettings};
pub use store::ReadingStore;
