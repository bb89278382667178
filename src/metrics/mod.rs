//! Process resource sampling around a unit of work, and the aggregate record
//! produced for each run.
mod collector;
mod types;
mod usage;


pub use collector::measure;
pub use types::{AggregateResult, ResourceSample, ResourceUsage};
pub use usage::sample_resources;
