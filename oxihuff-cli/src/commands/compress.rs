//! Compress command implementation.

use super::{COMPRESSED_EXTENSION, CmdResult, write_output};
use oxihuff_codec::{HeaderMode, HuffConfig, compress};
use oxihuff_core::HuffError;
use std::ffi::OsString;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// `<INPUT>.hf`
pub fn default_output(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(COMPRESSED_EXTENSION);
    PathBuf::from(name)
}

pub fn cmd_compress(
    input: &Path,
    output: Option<&Path>,
    header: HeaderMode,
    quiet: bool,
) -> CmdResult {
    // Fail before creating the output file
    if !header.is_supported() {
        return Err(HuffError::unsupported_method(header.name()).into());
    }

    let output = output.map_or_else(|| default_output(input), Path::to_path_buf);
    log::info!("compress {} -> {}", input.display(), output.display());

    let reader = BufReader::new(File::open(input)?);
    let stats = write_output(&output, |writer| {
        compress(reader, writer, HuffConfig::new(header))
    })?;

    if !quiet {
        println!(
            "{}: {} -> {} bytes ({:.1}% saved)",
            input.display(),
            stats.input_bytes,
            stats.output_bytes(),
            stats.space_savings()
        );
    }

    Ok(())
}
