// crates/propmap-core/src/loader/mod.rs

//! # Payload Loader
//!
//! Handles the physical layer (file I/O, decompression, UTF-8) and hands the
//! text to the normalizer.

use crate::error::{PropMapError, Result};
use crate::normalize::normalize_str;
use crate::record::PropertyRecord;
use log::debug;
use std::io::Read;
use std::path::{Path, PathBuf};

mod common_io;

pub use common_io::is_gzip;

/// `output/aggregated_data.json`, relative to the working directory.
pub fn default_payload_path() -> PathBuf {
    PathBuf::from(crate::config::DEFAULT_DATA_PATH)
}

/// Reads a payload file as UTF-8 text.
pub fn read_payload_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mut reader = common_io::open_stream(path)?;
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    String::from_utf8(bytes).map_err(|e| {
        PropMapError::MalformedPayload(format!("{} is not valid UTF-8: {e}", path.display()))
    })
}

/// Reads and normalizes a payload file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<PropertyRecord>> {
    let text = read_payload_text(path)?;
    normalize_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = read_payload_text(dir.path().join("does-not-exist.json")).unwrap_err();
        assert!(matches!(err, PropMapError::NotFound(_)));
    }

    #[test]
    fn loads_plain_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.json");
        std::fs::write(&path, r#"[{"latitude": 38.9, "longitude": -77.0}]"#).unwrap();
        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn rejects_non_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.json");
        std::fs::write(&path, [b'[', 0xff, b']']).unwrap();
        let err = read_payload_text(&path).unwrap_err();
        assert!(matches!(err, PropMapError::MalformedPayload(_)));
    }

    #[cfg(feature = "compact")]
    #[test]
    fn loads_gzip_json() {
        use flate2::{write::GzEncoder, Compression};
        use std::io::Write;

        let dir = tempdir().unwrap();
        let path = dir.path().join("payload.json.gz");
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(br#"{"columns": {"latitude": [1.0, 2.0], "longitude": [3.0, 4.0]}}"#)
            .unwrap();
        std::fs::write(&path, enc.finish().unwrap()).unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn gzip_detection_uses_extension() {
        assert!(is_gzip(Path::new("a/aggregated_data.json.gz")));
        assert!(is_gzip(Path::new("A.GZ")));
        assert!(!is_gzip(Path::new("aggregated_data.json")));
    }
}
