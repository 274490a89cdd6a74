/// A size-bounded slice of one file's content. Concatenating a file's chunks
/// in emitted order reproduces the original content exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub content: String,
    pub start_line: usize,
}
