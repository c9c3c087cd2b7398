//! Common functionality for seedcov.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod cli;
pub mod country;
pub mod coverage;
pub mod distance;
pub mod error;
pub mod id;
pub mod input;
pub mod log;
pub mod model;
pub mod output;
pub mod scenario;
pub mod settings;
pub mod study;
pub mod sweep;
pub mod target;

#[cfg(test)]
mod fixture;

/// Get the directory where seedcov reads its program settings from.
pub fn get_seedcov_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("seedcov");

    path
}
