use std::path::PathBuf;
use crate::config::constants;

/// File discovery and batching thresholds for one scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub application_name: String,
    pub max_file_size: u64,
    pub chunk_size: usize,
    pub batch_size: u64,
    pub max_workers: usize,
    pub supported_extensions: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl ScanConfig {
    pub fn with_defaults(input_path: PathBuf, output_path: PathBuf, application_name: String) -> Self {
        Self {
            input_path,
            output_path,
            application_name,
            max_file_size: constants::DEFAULT_MAX_FILE_SIZE,
            chunk_size: constants::DEFAULT_CHUNK_SIZE,
            batch_size: constants::DEFAULT_BATCH_SIZE,
            max_workers: constants::DEFAULT_MAX_WORKERS,
            supported_extensions: constants::SUPPORTED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            exclude_patterns: constants::DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(|pattern| pattern.to_string())
                .collect(),
        }
    }
}
