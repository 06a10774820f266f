use crate::combat_log::{LogLine, LogParser, ParseError, ReaderError};
use encoding_rs::WINDOWS_1252;
use memchr::memchr_iter;
use memmap2::Mmap;
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;

/// Bulk file reader: memory-maps a log export and parses all lines in
/// parallel, preserving line order. Per-line failures are collected,
/// never fatal.
pub struct Reader {
    path: PathBuf,
}

impl Reader {
    pub fn from(file_path: PathBuf) -> Self {
        Reader { path: file_path }
    }

    pub fn read_log_file(&self) -> Result<(Vec<LogLine>, Vec<ParseError>), ReaderError> {
        let file = fs::File::open(&self.path).map_err(|source| ReaderError::OpenFile {
            path: self.path.clone(),
            source,
        })?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(|source| ReaderError::MemoryMap {
            path: self.path.clone(),
            source,
        })?;
        let bytes = mmap.as_ref();

        // Find all line boundaries
        let mut line_ranges: Vec<(usize, usize)> = Vec::new();
        let mut start = 0;
        for end in memchr_iter(b'\n', bytes) {
            if end > start {
                line_ranges.push((start, end));
            }
            start = end + 1;
        }
        if start < bytes.len() {
            line_ranges.push((start, bytes.len()));
        }

        let parser = LogParser::new();
        let results: Vec<Result<LogLine, ParseError>> = line_ranges
            .par_iter()
            .enumerate()
            .filter_map(|(idx, &(start, end))| {
                let (line, _, _) = WINDOWS_1252.decode(&bytes[start..end]);
                let line = line.trim_end_matches('\r');
                // CRLF files leave a bare `\r` on blank lines.
                if line.is_empty() {
                    return None;
                }
                Some(parser.parse_line(idx as u64 + 1, line))
            })
            .collect();

        let mut events = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();
        for result in results {
            match result {
                Ok(event) => events.push(event),
                Err(error) => {
                    tracing::warn!(%error, "skipping unparseable line");
                    skipped.push(error);
                }
            }
        }

        Ok((events, skipped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{name}-{}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn crlf_blank_lines_are_not_diagnostics() {
        let path = write_temp(
            "hitsplat-reader-crlf",
            b"02-04-2024 01:19:00.000 CST\tLogged in player is Ada\r\n\
              \r\n\
              02-04-2024 01:19:01.200 CST\tScurrius dies\r\n",
        );

        let (events, skipped) = Reader::from(path.clone()).read_log_file().unwrap();
        let _ = fs::remove_file(path);

        assert_eq!(events.len(), 2);
        assert!(skipped.is_empty());
        // Line numbers still count the blank line.
        assert_eq!(events[1].line_number, 3);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let result = Reader::from(PathBuf::from("/nonexistent/hitsplat.log")).read_log_file();
        assert!(matches!(result, Err(ReaderError::OpenFile { .. })));
    }
}
