use std::fs;
use std::path::{Path, PathBuf};
use crate::errors::{ScannerError, ScannerResult};
use crate::structs::chunk::Chunk;
use crate::structs::config::scan_config::ScanConfig;

/// Discovers eligible source files, chunks oversized ones, and packs files
/// into batches for the provider.
pub struct FileCollector {
    config: ScanConfig,
}

impl FileCollector {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Collect all eligible source files as (path, byte size) pairs. A
    /// missing root is a configuration error; everything below the root is
    /// best-effort, inaccessible entries are skipped with a warning.
    pub fn collect_files(&self) -> ScannerResult<Vec<(PathBuf, u64)>> {
        let root = &self.config.input_path;
        if !root.exists() {
            return Err(ScannerError::config_error(
                &format!("input path does not exist: {}", root.display()),
                Some("pass an existing file or directory to --input"),
            ));
        }

        let mut files = Vec::new();

        if root.is_file() {
            if self.is_eligible(root) {
                match fs::metadata(root) {
                    Ok(metadata) => files.push((root.clone(), metadata.len())),
                    Err(e) => log::warn!("⚠️ Cannot access {}: {}", root.display(), e),
                }
            }
        } else {
            self.walk_directory(root, &mut files);
        }

        Ok(files)
    }

    fn walk_directory(&self, dir: &Path, files: &mut Vec<(PathBuf, u64)>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("⚠️ Cannot read directory {}: {}", dir.display(), e);
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            if path.is_dir() {
                // Prune excluded subtrees before descending
                if !self.is_excluded(&name) {
                    self.walk_directory(&path, files);
                }
                continue;
            }

            if !self.is_eligible(&path) {
                continue;
            }

            match fs::metadata(&path) {
                Ok(metadata) => {
                    let size = metadata.len();
                    if size <= self.config.max_file_size {
                        files.push((path, size));
                    } else {
                        log::warn!("⚠️ Skipping large file: {} ({} bytes)", path.display(), size);
                    }
                }
                Err(e) => log::warn!("⚠️ Cannot access {}: {}", path.display(), e),
            }
        }
    }

    fn is_eligible(&self, path: &Path) -> bool {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };

        if self.is_excluded(&name) {
            return false;
        }

        let extension = match path.extension() {
            Some(ext) => format!(".{}", ext.to_string_lossy().to_lowercase()),
            None => return false,
        };

        self.config
            .supported_extensions
            .iter()
            .any(|supported| supported == &extension)
    }

    fn is_excluded(&self, name: &str) -> bool {
        for pattern in &self.config.exclude_patterns {
            if let Some(suffix) = pattern.strip_prefix('*') {
                if name.ends_with(suffix) {
                    return true;
                }
            } else if let Some(prefix) = pattern.strip_suffix('*') {
                if name.starts_with(prefix) {
                    return true;
                }
            } else if name.contains(pattern.as_str()) || name == pattern {
                return true;
            }
        }
        false
    }

    /// Read a file as size-bounded chunks with starting line numbers. Decode
    /// errors are tolerated via lossy replacement; an unreadable file yields
    /// an empty chunk list and a warning, never an error.
    pub fn read_file_chunked(&self, path: &Path) -> Vec<Chunk> {
        let content = match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                log::warn!("⚠️ Error reading {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_size = 0usize;
        let mut line_number = 1usize;
        let mut chunk_start_line = 1usize;

        for line in content.split_inclusive('\n') {
            let line_size = line.len();

            if current_size + line_size > self.config.chunk_size && !current.is_empty() {
                chunks.push(Chunk {
                    content: std::mem::take(&mut current),
                    start_line: chunk_start_line,
                });
                current_size = 0;
                chunk_start_line = line_number;
            }

            current.push_str(line);
            current_size += line_size;
            line_number += 1;
        }

        if !current.is_empty() {
            chunks.push(Chunk {
                content: current,
                start_line: chunk_start_line,
            });
        }

        chunks
    }

    /// Pack files into batches by ascending size. Greedy and deliberately
    /// simple: small files combine first, a single file larger than the
    /// batch threshold becomes its own batch.
    pub fn create_batches(&self, files: &[(PathBuf, u64)]) -> Vec<Vec<PathBuf>> {
        let mut sorted: Vec<(PathBuf, u64)> = files.to_vec();
        sorted.sort_by_key(|(_, size)| *size);

        let mut batches = Vec::new();
        let mut current: Vec<PathBuf> = Vec::new();
        let mut current_size = 0u64;

        for (path, size) in sorted {
            if current_size + size > self.config.batch_size && !current.is_empty() {
                batches.push(std::mem::take(&mut current));
                current_size = 0;
            }
            current.push(path);
            current_size += size;
        }

        if !current.is_empty() {
            batches.push(current);
        }

        batches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn collector_for(root: &Path) -> FileCollector {
        let config = ScanConfig::with_defaults(
            root.to_path_buf(),
            root.join("out"),
            "test".to_string(),
        );
        FileCollector::new(config)
    }

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn collects_only_eligible_files() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "app.py", b"print('hi')\n");
        write_file(dir.path(), "notes.txt", b"not code\n");
        write_file(dir.path(), "bundle.min.js", b"minified\n");

        let collector = collector_for(dir.path());
        let files = collector.collect_files().unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].0.ends_with("app.py"));
    }

    #[test]
    fn excluded_directories_are_pruned() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("node_modules").join("pkg");
        fs::create_dir_all(&nested).unwrap();
        write_file(&nested, "index.js", b"ignored\n");
        write_file(dir.path(), "main.js", b"kept\n");

        let collector = collector_for(dir.path());
        let files = collector.collect_files().unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].0.ends_with("main.js"));
    }

    #[test]
    fn oversized_files_are_skipped_with_the_small_one_kept() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "big.py", &vec![b'x'; 2 * 1024 * 1024]);
        write_file(dir.path(), "small.py", &vec![b'y'; 500]);

        let collector = collector_for(dir.path());
        let files = collector.collect_files().unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].0.ends_with("small.py"));
        assert_eq!(files[0].1, 500);

        let batches = collector.create_batches(&files);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 1);
    }

    #[test]
    fn single_file_root_is_admitted() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "only.rb", b"puts 1\n");

        let config = ScanConfig::with_defaults(path.clone(), dir.path().join("out"), "test".to_string());
        let collector = FileCollector::new(config);
        let files = collector.collect_files().unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, path);
    }

    #[test]
    fn missing_root_is_a_configuration_error() {
        let collector = collector_for(Path::new("/nonexistent/threatcode-test"));
        assert!(collector.collect_files().is_err());
    }

    #[test]
    fn wildcard_patterns_match_prefix_and_suffix() {
        let dir = TempDir::new().unwrap();
        let mut config = ScanConfig::with_defaults(
            dir.path().to_path_buf(),
            dir.path().join("out"),
            "test".to_string(),
        );
        config.exclude_patterns = vec!["*.generated.ts".to_string(), "temp*".to_string()];
        let collector = FileCollector::new(config);

        assert!(collector.is_excluded("api.generated.ts"));
        assert!(collector.is_excluded("temp_backup.py"));
        assert!(!collector.is_excluded("api.ts"));
    }

    #[test]
    fn chunk_concatenation_reproduces_the_file() {
        let dir = TempDir::new().unwrap();
        let lines: String = (0..200).map(|i| format!("line number {}\n", i)).collect();
        let path = write_file(dir.path(), "long.py", lines.as_bytes());

        let mut config = ScanConfig::with_defaults(
            dir.path().to_path_buf(),
            dir.path().join("out"),
            "test".to_string(),
        );
        config.chunk_size = 256;
        let collector = FileCollector::new(config);

        let chunks = collector.read_file_chunked(&path);
        assert!(chunks.len() > 1);
        assert_eq!(chunks[0].start_line, 1);

        let rebuilt: String = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(rebuilt, lines);

        // Starting lines track the cumulative line count of prior chunks
        let mut expected_start = 1;
        for chunk in &chunks {
            assert_eq!(chunk.start_line, expected_start);
            expected_start += chunk.content.matches('\n').count();
        }
    }

    #[test]
    fn every_chunk_respects_the_size_threshold() {
        let dir = TempDir::new().unwrap();
        let lines: String = (0..100).map(|i| format!("{}: some content here\n", i)).collect();
        let path = write_file(dir.path(), "sized.py", lines.as_bytes());

        let mut config = ScanConfig::with_defaults(
            dir.path().to_path_buf(),
            dir.path().join("out"),
            "test".to_string(),
        );
        config.chunk_size = 128;
        let collector = FileCollector::new(config);

        for chunk in collector.read_file_chunked(&path) {
            assert!(chunk.content.len() <= 128);
        }
    }

    #[test]
    fn unreadable_file_yields_empty_chunks() {
        let dir = TempDir::new().unwrap();
        let collector = collector_for(dir.path());
        let chunks = collector.read_file_chunked(&dir.path().join("missing.py"));
        assert!(chunks.is_empty());
    }

    #[test]
    fn batches_never_exceed_the_threshold_except_single_oversized() {
        let dir = TempDir::new().unwrap();
        let mut config = ScanConfig::with_defaults(
            dir.path().to_path_buf(),
            dir.path().join("out"),
            "test".to_string(),
        );
        config.batch_size = 1000;
        let collector = FileCollector::new(config);

        let files = vec![
            (PathBuf::from("a.py"), 300u64),
            (PathBuf::from("b.py"), 400u64),
            (PathBuf::from("c.py"), 500u64),
            (PathBuf::from("huge.py"), 5000u64),
        ];
        let sizes: std::collections::HashMap<_, _> =
            files.iter().map(|(p, s)| (p.clone(), *s)).collect();

        let batches = collector.create_batches(&files);

        for batch in &batches {
            let total: u64 = batch.iter().map(|p| sizes[p]).sum();
            if total > 1000 {
                assert_eq!(batch.len(), 1);
            }
        }

        // Every file lands in exactly one batch
        let placed: usize = batches.iter().map(|b| b.len()).sum();
        assert_eq!(placed, files.len());
    }

    #[test]
    fn small_files_pack_together_ascending() {
        let dir = TempDir::new().unwrap();
        let mut config = ScanConfig::with_defaults(
            dir.path().to_path_buf(),
            dir.path().join("out"),
            "test".to_string(),
        );
        config.batch_size = 1000;
        let collector = FileCollector::new(config);

        let files = vec![
            (PathBuf::from("big.py"), 950u64),
            (PathBuf::from("tiny.py"), 10u64),
            (PathBuf::from("small.py"), 50u64),
        ];
        let batches = collector.create_batches(&files);

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0], vec![PathBuf::from("tiny.py"), PathBuf::from("small.py")]);
        assert_eq!(batches[1], vec![PathBuf::from("big.py")]);
    }
}
