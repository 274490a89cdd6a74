pub mod analyzer;
pub mod file_collector;
pub mod providers;
pub mod report_formatter;
pub mod response_parser;
pub mod retry_policy;
