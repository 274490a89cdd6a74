pub mod ai;
pub mod analysis_context;
pub mod chunk;
pub mod cli;
pub mod config;
pub mod evidence;
pub mod finding;
pub mod report_data;
pub mod severity_stats;
pub mod validation_outcome;
