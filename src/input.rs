use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Open a text file and auto-detect gzip compression, returning a boxed BufRead.
/// BGZF is multi-member gzip, so the same decoder covers both `.gz` flavors.
pub fn open_text_reader<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    // Check by file extension (faster than reading magic bytes)
    let is_compressed = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz" || ext == "bgz")
        .unwrap_or(false);

    if is_compressed {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read a list of contig identifiers, one per line. Blank lines are skipped.
pub fn read_name_list<P: AsRef<Path>>(path: P) -> Result<HashSet<String>> {
    let reader = open_text_reader(&path)?;
    let mut names = HashSet::new();

    for line in reader.lines() {
        let line = line?;
        let name = line.trim();
        if !name.is_empty() {
            names.insert(name.to_string());
        }
    }

    Ok(names)
}
