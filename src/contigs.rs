use anyhow::{bail, Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::input::open_text_reader;

/// The retained contigs of an assembly: identifiers, lengths, and a compact
/// index assignment.
///
/// Indices are assigned by lexicographic order of identifier over the
/// non-excluded contigs, so the same assembly always yields the same index
/// space regardless of FASTA record order.
#[derive(Debug, Clone, Default)]
pub struct ContigSet {
    /// Contig identifiers, sorted (index is the position in this vec)
    names: Vec<String>,
    /// Sequence length per contig, parallel to `names`
    lengths: Vec<u64>,
    /// Map from identifier to index for fast lookup
    name_to_idx: HashMap<String, u32>,
}

impl ContigSet {
    /// Build a contig set from (identifier, length) pairs, dropping excluded
    /// identifiers and assigning indices lexicographically.
    pub fn from_lengths(
        contigs: impl IntoIterator<Item = (String, u64)>,
        exclude: &HashSet<String>,
    ) -> Result<Self> {
        let mut pairs: Vec<(String, u64)> = Vec::new();
        let mut seen = HashSet::new();

        for (name, length) in contigs {
            if exclude.contains(&name) {
                continue;
            }
            if !seen.insert(name.clone()) {
                bail!("duplicate contig identifier in assembly: {name}");
            }
            pairs.push((name, length));
        }

        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        let mut names = Vec::with_capacity(pairs.len());
        let mut lengths = Vec::with_capacity(pairs.len());
        let mut name_to_idx = HashMap::with_capacity(pairs.len());

        for (idx, (name, length)) in pairs.into_iter().enumerate() {
            name_to_idx.insert(name.clone(), idx as u32);
            names.push(name);
            lengths.push(length);
        }

        Ok(ContigSet {
            names,
            lengths,
            name_to_idx,
        })
    }

    /// Load contig names and lengths from a FASTA file (optionally gzipped),
    /// dropping identifiers named in `exclude`.
    pub fn from_fasta<P: AsRef<Path>>(path: P, exclude: &HashSet<String>) -> Result<Self> {
        let path = path.as_ref();
        let reader = open_text_reader(path)?;
        let mut fa_in = noodles::fasta::io::Reader::new(reader);

        let mut pairs = Vec::new();
        for result in fa_in.records() {
            let record =
                result.with_context(|| format!("failed to read {}", path.display()))?;
            let name = String::from_utf8(record.name().into())?;
            pairs.push((name, record.sequence().len() as u64));
        }

        Self::from_lengths(pairs, exclude)
    }

    /// Index of a contig identifier, if retained
    pub fn index_of(&self, name: &str) -> Option<u32> {
        self.name_to_idx.get(name).copied()
    }

    /// Identifier for an index (panics on an invalid index)
    pub fn name(&self, idx: u32) -> &str {
        &self.names[idx as usize]
    }

    /// Sequence length for an index (panics on an invalid index)
    pub fn length(&self, idx: u32) -> u64 {
        self.lengths[idx as usize]
    }

    /// Lengths of all retained contigs, indexed by contig index
    pub fn lengths(&self) -> &[u64] {
        &self.lengths
    }

    /// Number of retained contigs
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when no contigs were retained
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
