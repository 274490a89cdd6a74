pub mod commands;
pub mod confidence;
pub mod provider_kind;
pub mod severity;
pub mod verdict;
