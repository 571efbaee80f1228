//! TopicLens Core Library
//!
//! Domain models and generation logic for TopicLens: answering a question
//! about an image with a generative model, resolving its topic and units,
//! and rendering the result.

pub mod client;
pub mod config;
pub mod error;
pub mod generate;
pub mod model;
pub mod render;
pub mod result;
pub mod topic;
pub mod validation;

pub use config::Config;
pub use error::{TopicLensError, TopicLensResult};
pub use result::{GenerationResult, StoredResult};
pub use topic::Topic;
