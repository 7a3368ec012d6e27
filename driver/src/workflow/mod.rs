pub mod config;
pub mod predictions;
pub mod runner;
