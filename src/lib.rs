//! Synthetic Churn Data Library
//!
//! This module exports the configuration accessor, the dataset generator
//! and the CSV writer for testing and integration.

pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod logging;
pub mod output;
