pub mod finding_validation;
pub mod security_analysis;
