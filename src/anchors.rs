use anyhow::{bail, Context, Result};
use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::path::Path;

use crate::contigs::ContigSet;
use crate::input::open_text_reader;

/// Per-contig sets of gene-anchor identifiers, used to score sequence
/// redundancy between contig pairs.
///
/// An anchor is a reference-chromosome bin that a gene maps into; two contigs
/// sharing most of their anchors are likely allelic copies of the same locus
/// rather than neighbors on one chromosome.
#[derive(Debug, Clone)]
pub struct AnchorSets {
    /// Anchor set per contig index; contigs absent from the tables keep an
    /// empty set
    sets: Vec<HashSet<String>>,
}

impl AnchorSets {
    /// Anchor sets with every contig unscored
    pub fn empty(contig_count: usize) -> Self {
        AnchorSets {
            sets: vec![HashSet::new(); contig_count],
        }
    }

    /// Anchor sets from pre-built per-contig sets, indexed by contig index
    pub fn from_sets(sets: Vec<HashSet<String>>) -> Self {
        AnchorSets { sets }
    }

    /// Build anchor sets from the anchors table (gene → reference bin) and
    /// the BED table of gene placements on contigs.
    ///
    /// BED lines naming contigs outside `contigs` are ignored: those contigs
    /// cannot appear in any edge. Genes without an anchors entry contribute
    /// nothing.
    pub fn load<P: AsRef<Path>>(anchors_path: P, bed_path: P, contigs: &ContigSet) -> Result<Self> {
        let gene_to_bin = read_anchor_table(anchors_path.as_ref())?;

        let mut sets = vec![HashSet::new(); contigs.len()];
        let bed_path = bed_path.as_ref();
        let reader = open_text_reader(bed_path)?;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("failed to read {}", bed_path.display()))?;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                bail!(
                    "{}:{}: expected at least 4 columns, got {}",
                    bed_path.display(),
                    line_no + 1,
                    fields.len()
                );
            }

            let contig = fields[0];
            let gene = fields[3];

            let Some(idx) = contigs.index_of(contig) else {
                continue;
            };
            if let Some(bin) = gene_to_bin.get(gene) {
                sets[idx as usize].insert(bin.clone());
            }
        }

        Ok(AnchorSets { sets })
    }

    /// Anchor set for a contig index
    pub fn set(&self, idx: u32) -> &HashSet<String> {
        &self.sets[idx as usize]
    }

    /// Redundancy overlap between two contigs: `2·|A∩B| / (|A|+|B|)`.
    ///
    /// Defined as 0 when both sets are empty (the documented degenerate
    /// case, not an error).
    pub fn overlap_ratio(&self, a: u32, b: u32) -> f64 {
        let set_a = &self.sets[a as usize];
        let set_b = &self.sets[b as usize];

        let denom = set_a.len() + set_b.len();
        if denom == 0 {
            return 0.0;
        }

        let shared = set_a.intersection(set_b).count();
        2.0 * shared as f64 / denom as f64
    }
}

/// Parse the anchors table: column 1 is the gene identifier, column 2 the
/// reference bin it anchors to. `#` comments and blank lines are skipped.
fn read_anchor_table(path: &Path) -> Result<HashMap<String, String>> {
    let reader = open_text_reader(path)?;
    let mut gene_to_bin = HashMap::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() < 2 {
            bail!(
                "{}:{}: expected at least 2 columns, got {}",
                path.display(),
                line_no + 1,
                fields.len()
            );
        }

        gene_to_bin.insert(fields[0].to_string(), fields[1].to_string());
    }

    Ok(gene_to_bin)
}
