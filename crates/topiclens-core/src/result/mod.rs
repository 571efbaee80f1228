//! Generation results and their client-side persistence.

pub mod model;
pub mod store;

pub use model::{GenerationResult, LiveResponse, ResponseMetadata, StoredResult};
pub use store::ResultStore;
