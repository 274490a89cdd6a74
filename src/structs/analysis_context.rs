/// Context attached to one batch analysis request.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    pub file_paths: Vec<String>,
    pub batch_size: usize,
}
