//! Command implementations for OxiHuff CLI.

pub mod compress;
pub mod decompress;
pub mod info;

pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use info::cmd_info;

use oxihuff_core::Result as HuffResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Extension appended by `compress`.
pub const COMPRESSED_EXTENSION: &str = "hf";

/// Extension appended by `decompress` when the input has no `.hf` suffix.
pub const FALLBACK_EXTENSION: &str = "out";

/// Boxed error type shared by all commands.
pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Create `path`, run `body` against a buffered writer, and flush.
///
/// If `body` or the flush fails the partial file is removed.
pub fn write_output<T, F>(path: &Path, body: F) -> HuffResult<T>
where
    F: FnOnce(&mut BufWriter<File>) -> HuffResult<T>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    let result = body(&mut writer).and_then(|value| {
        writer.flush()?;
        Ok(value)
    });

    if result.is_err() {
        drop(writer);
        if let Err(e) = std::fs::remove_file(path) {
            log::warn!("could not remove {}: {}", path.display(), e);
        } else {
            log::debug!("removed partial output {}", path.display());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxihuff_core::HuffError;

    #[test]
    fn test_write_output_removes_on_error() {
        let path = std::env::temp_dir().join(format!("oxihuff-cli-partial-{}", std::process::id()));
        let result: HuffResult<()> = write_output(&path, |writer| {
            writer.write_all(b"partial")?;
            Err(HuffError::truncated(8))
        });

        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_output_keeps_on_success() {
        let path = std::env::temp_dir().join(format!("oxihuff-cli-ok-{}", std::process::id()));
        let n = write_output(&path, |writer| {
            writer.write_all(b"done")?;
            Ok(4)
        })
        .unwrap();

        assert_eq!(n, 4);
        assert_eq!(std::fs::read(&path).unwrap(), b"done");
        std::fs::remove_file(&path).unwrap();
    }
}
