pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod params;
pub mod provision;
pub mod report;
pub mod sqs;
