//! Result generation for the demo and live endpoints.
//!
//! Both entry points are plain async functions over their inputs; the live
//! path receives the model as an injected [`GenerativeModel`](crate::model::GenerativeModel).

pub mod demo;
pub mod live;

pub use demo::demo_result;
pub use live::{generate_live, LiveTimeouts};
