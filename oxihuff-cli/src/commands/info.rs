//! Info command implementation.

use super::CmdResult;
use oxihuff_codec::{HeaderInfo, inspect};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// JSON view of a header.
#[derive(Debug, Serialize)]
struct InfoOutput {
    file: String,
    size: u64,
    magic: String,
    header_bits: u64,
    leaves: usize,
    depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    codes: Option<Vec<CodeEntry>>,
}

#[derive(Debug, Serialize)]
struct CodeEntry {
    symbol: u16,
    label: String,
    code: String,
}

impl InfoOutput {
    fn new(path: &Path, size: u64, info: &HeaderInfo) -> Self {
        let codes = info.code_table().map(|table| {
            table
                .iter()
                .map(|(symbol, code)| CodeEntry {
                    symbol: symbol.value(),
                    label: symbol.to_string(),
                    code: code.to_string(),
                })
                .collect()
        });

        Self {
            file: path.display().to_string(),
            size,
            magic: format!("{:#010x}", info.magic),
            header_bits: info.header_bits,
            leaves: info.tree.leaf_count(),
            depth: info.tree.depth(),
            codes,
        }
    }
}

pub fn cmd_info(input: &Path, json: bool) -> CmdResult {
    let size = std::fs::metadata(input)?.len();
    let info = inspect(BufReader::new(File::open(input)?))?;
    let output = InfoOutput::new(input, size, &info);

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Huffman Stream Information");
    println!("==========================");
    println!("File: {}", output.file);
    println!("Size: {} bytes", output.size);
    println!("Magic: {}", output.magic);
    println!("Header: {} bits", output.header_bits);
    println!("Leaves: {}", output.leaves);
    println!("Tree depth: {}", output.depth);

    match &output.codes {
        Some(codes) => {
            println!();
            println!("{:>6}  {:<10}  Code", "Symbol", "Label");
            for entry in codes {
                println!("{:>6}  {:<10}  {}", entry.symbol, entry.label, entry.code);
            }
        }
        None => println!("Codes: too long to list"),
    }

    Ok(())
}
