//! Decompress command implementation.

use super::{COMPRESSED_EXTENSION, CmdResult, FALLBACK_EXTENSION, write_output};
use oxihuff_codec::decompress;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// `<INPUT>` without its `.hf` suffix, or `<INPUT>.out`.
pub fn default_output(input: &Path) -> PathBuf {
    let has_suffix = input.extension().is_some_and(|ext| ext == COMPRESSED_EXTENSION);
    if has_suffix && input.file_stem().is_some() {
        input.with_extension("")
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".");
        name.push(FALLBACK_EXTENSION);
        PathBuf::from(name)
    }
}

pub fn cmd_decompress(input: &Path, output: Option<&Path>, quiet: bool) -> CmdResult {
    let output = output.map_or_else(|| default_output(input), Path::to_path_buf);
    log::info!("decompress {} -> {}", input.display(), output.display());

    let reader = BufReader::new(File::open(input)?);
    let stats = write_output(&output, |writer| decompress(reader, writer))?;

    if !quiet {
        println!(
            "{}: {} bytes -> {}",
            input.display(),
            stats.output_bytes,
            output.display()
        );
    }

    Ok(())
}
