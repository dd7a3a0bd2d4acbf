//! Post-write check that every emitted line is standalone JSON.

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Errors raised while validating a session file.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON on line {line}: {source}")]
    InvalidLine {
        /// 1-based line number of the first bad line
        line: usize,
        /// Lines that parsed before it
        valid: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Re-read `path` and parse every line, stopping at the first failure.
///
/// Returns the number of valid lines.
pub fn validate<P: AsRef<Path>>(path: P) -> Result<usize, ValidationError> {
    let path = path.as_ref();
    let io_err = |source| ValidationError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = fs::File::open(path).map_err(io_err)?;
    validate_reader(BufReader::new(file)).map_err(|e| match e {
        ValidationError::Io { source, .. } => io_err(source),
        other => other,
    })
}

/// Same as [`validate`], over any buffered reader.
pub fn validate_reader<R: BufRead>(mut reader: R) -> Result<usize, ValidationError> {
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| ValidationError::Io {
                path: PathBuf::new(),
                source,
            })?;
        if read == 0 {
            return Ok(count);
        }

        serde_json::from_slice::<serde_json::Value>(buf.trim_ascii()).map_err(|source| {
            ValidationError::InvalidLine {
                line: count + 1,
                valid: count,
                source,
            }
        })?;
        count += 1;
    }
}
