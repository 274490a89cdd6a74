pub mod checker_config;
pub mod llm_config;
pub mod scan_config;
