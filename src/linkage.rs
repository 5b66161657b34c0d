use anyhow::{Context, Result};
use rust_htslib::bam::{self, Read};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Histogram bucket width for partner degrees.
pub const BUCKET_WIDTH: u32 = 10;

/// Per-contig linkage census over a BAM file: how many distinct partner
/// contigs each contig is linked to. A quick way to spot promiscuous
/// contigs (repeats, collapsed regions) before partitioning.
#[derive(Debug, Clone)]
pub struct LinkageCensus {
    /// (contig name, distinct-partner degree), degree descending, ties by
    /// name ascending
    degrees: Vec<(String, u32)>,
}

impl LinkageCensus {
    /// Scan a BAM file and tally distinct partners per contig. The contig
    /// universe is the BAM header; unmapped ends and self-pairs are skipped.
    pub fn from_bam<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = bam::Reader::from_path(path)
            .with_context(|| format!("failed to open {}", path.display()))?;

        let names: Vec<String> = reader
            .header()
            .target_names()
            .iter()
            .map(|raw| String::from_utf8_lossy(raw).into_owned())
            .collect();

        let mut partners: Vec<HashSet<u32>> = vec![HashSet::new(); names.len()];
        let mut record = bam::Record::new();

        while let Some(result) = reader.read(&mut record) {
            result.with_context(|| format!("failed to read {}", path.display()))?;

            let tid = record.tid();
            let mtid = record.mtid();
            if tid < 0 || mtid < 0 || record.pos() < 0 || record.mpos() < 0 {
                continue;
            }
            if tid == mtid {
                continue;
            }

            partners[tid as usize].insert(mtid as u32);
            partners[mtid as usize].insert(tid as u32);
        }

        Ok(Self::from_partner_counts(
            names
                .into_iter()
                .zip(partners.iter().map(|p| p.len() as u32)),
        ))
    }

    /// Build a census from (contig, degree) pairs; contigs with degree 0 are
    /// left out.
    pub fn from_partner_counts(counts: impl IntoIterator<Item = (String, u32)>) -> Self {
        let mut degrees: Vec<(String, u32)> = counts
            .into_iter()
            .filter(|&(_, degree)| degree > 0)
            .collect();
        degrees.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        LinkageCensus { degrees }
    }

    /// Scored contigs with their degrees, degree descending
    pub fn degrees(&self) -> &[(String, u32)] {
        &self.degrees
    }

    /// Bucket the degrees with fixed width [`BUCKET_WIDTH`]: bucket `b`
    /// covers degrees `[b·width, b·width + width - 1]`. The counts sum to
    /// the number of scored contigs.
    pub fn histogram(&self) -> BTreeMap<u32, u32> {
        let mut buckets = BTreeMap::new();
        for &(_, degree) in &self.degrees {
            *buckets.entry(degree / BUCKET_WIDTH).or_insert(0) += 1;
        }
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_sort_descending_with_name_tiebreak() {
        let census = LinkageCensus::from_partner_counts(vec![
            ("ctgA".to_string(), 3),
            ("ctgC".to_string(), 12),
            ("ctgB".to_string(), 3),
            ("ctgD".to_string(), 0),
        ]);

        let got: Vec<(&str, u32)> = census
            .degrees()
            .iter()
            .map(|(n, d)| (n.as_str(), *d))
            .collect();
        assert_eq!(got, vec![("ctgC", 12), ("ctgA", 3), ("ctgB", 3)]);
    }

    #[test]
    fn histogram_preserves_total_count() {
        let census = LinkageCensus::from_partner_counts(
            (0..57).map(|i| (format!("ctg{i:03}"), i + 1)),
        );

        let histogram = census.histogram();
        let total: u32 = histogram.values().sum();
        assert_eq!(total as usize, census.degrees().len());
    }

    #[test]
    fn histogram_buckets_by_fixed_width() {
        let census = LinkageCensus::from_partner_counts(vec![
            ("a".to_string(), 1),
            ("b".to_string(), 9),
            ("c".to_string(), 10),
            ("d".to_string(), 19),
            ("e".to_string(), 20),
        ]);

        let histogram = census.histogram();
        assert_eq!(histogram.get(&0), Some(&2));
        assert_eq!(histogram.get(&1), Some(&2));
        assert_eq!(histogram.get(&2), Some(&1));
    }
}
