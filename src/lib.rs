//! Core library functions for the station network analyzer

pub mod centrality;
pub mod community;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod paths;
pub mod report;
pub mod storage;

pub use anyhow::{Result, anyhow};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use report::NetworkReport;
