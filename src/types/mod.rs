pub mod config;
pub mod indicator;
pub mod phase;
pub mod report;
pub mod scoring;
