mod runner;
mod summary;

pub use runner::{RunReport, run_strategy, run_with_fetcher};
