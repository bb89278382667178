//! Core library for the `wavebench` CLI.
//!
//! The binary fires a fixed batch of HTTP GET requests at one endpoint
//! through a bounded worker pool, retries failures locally and in waves,
//! and reports throughput together with the CPU and memory cost of the run.
//! The modules here are the building blocks of that binary; library APIs may
//! change with the CLI.
pub mod app;
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod scheduler;
pub mod sinks;
