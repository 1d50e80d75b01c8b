pub mod config;
pub mod discover;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod shutdown;
pub mod worker;
